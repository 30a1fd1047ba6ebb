//! Result types returned by the conversion entry points.

use crate::pipeline::classify::{Block, CoverInfo};
use serde::{Deserialize, Serialize};

/// A finished conversion: the PDF plus what went into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The serialised PDF document.
    #[serde(skip)]
    pub pdf: Vec<u8>,
    /// Cover material found in the document.
    pub cover: CoverInfo,
    pub stats: ConversionStats,
}

/// Counters and timings for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the output, cover included.
    pub total_pages: usize,
    /// Whether a cover page was rendered.
    pub has_cover: bool,
    /// Source lines after normalisation.
    pub source_lines: usize,
    pub blocks: BlockCounts,
    /// Lines cut to their configured limit.
    pub truncated_lines: usize,
    /// Characters replaced with `?`.
    pub replaced_chars: usize,
    /// Size of the PDF in bytes.
    pub pdf_bytes: usize,
    pub layout_duration_ms: u64,
    pub write_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// How many lines fell into each block kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    pub headings: usize,
    pub paragraphs: usize,
    pub bullets: usize,
    pub numbered: usize,
    pub checkboxes: usize,
    pub checked: usize,
    pub table_rows: usize,
    pub code_lines: usize,
    pub code_blocks: usize,
    pub indented: usize,
    pub rules: usize,
    pub blank: usize,
    pub skipped: usize,
}

impl BlockCounts {
    /// Tally a sequence of blocks.
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Self {
        let mut counts = Self::default();
        let mut fences: usize = 0;
        for block in blocks {
            match block {
                Block::Blank => counts.blank += 1,
                Block::Skipped => counts.skipped += 1,
                Block::Rule => counts.rules += 1,
                Block::FenceToggle => fences += 1,
                Block::CodeLine(_) => counts.code_lines += 1,
                Block::Heading { .. } => counts.headings += 1,
                Block::TableRow(_) => counts.table_rows += 1,
                Block::Checkbox { checked, .. } => {
                    counts.checkboxes += 1;
                    if *checked {
                        counts.checked += 1;
                    }
                }
                Block::Bullet(_) => counts.bullets += 1,
                Block::Numbered(_) => counts.numbered += 1,
                Block::Indented(_) => counts.indented += 1,
                Block::Paragraph(_) => counts.paragraphs += 1,
            }
        }
        // An unterminated fence still opened a block.
        counts.code_blocks = fences.div_ceil(2);
        counts
    }
}

/// One entry of the heading outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    /// 1-indexed source line.
    pub line: usize,
}

/// Structure of a document, computed without rendering it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub cover: CoverInfo,
    pub headings: Vec<HeadingEntry>,
    pub blocks: BlockCounts,
    pub source_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::classify_document;

    #[test]
    fn counts_blocks() {
        let md = "## A\ntext\n- one\n- [x] done\n- [ ] todo\n```\ncode\n```\n| t |\n---\n\n1. n";
        let counts = BlockCounts::from_blocks(&classify_document(md, []));
        assert_eq!(counts.headings, 1);
        assert_eq!(counts.paragraphs, 1);
        assert_eq!(counts.bullets, 1);
        assert_eq!(counts.checkboxes, 2);
        assert_eq!(counts.checked, 1);
        assert_eq!(counts.code_blocks, 1);
        assert_eq!(counts.code_lines, 1);
        assert_eq!(counts.table_rows, 1);
        assert_eq!(counts.rules, 1);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.numbered, 1);
    }

    #[test]
    fn unterminated_fence_counts_as_block() {
        let counts = BlockCounts::from_blocks(&classify_document("```\nabc", []));
        assert_eq!(counts.code_blocks, 1);
    }

    #[test]
    fn stats_serialise() {
        let stats = ConversionStats {
            total_pages: 3,
            has_cover: true,
            ..ConversionStats::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_pages\":3"));
        let back: ConversionStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
