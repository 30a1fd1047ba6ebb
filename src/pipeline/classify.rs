//! Line classification: one [`Block`] per Markdown source line.
//!
//! The report format does not need a full CommonMark tree. Each line is
//! classified on its own from prefix and regex checks, with a single piece of
//! state carried between lines: whether we are inside a fenced code block.
//! The order of the checks matters (a checkbox item is also a bullet, a table
//! row may be indented) and is fixed in [`Classifier::classify`].
//!
//! Before classification, [`extract_cover`] scans the preamble for the
//! document title and `**Key:** value` metadata lines. When a cover page is
//! rendered those lines are shown there and skipped in the body.

use crate::pipeline::text;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Classification result for one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Empty line outside a code block.
    Blank,
    /// Line that produces no output (cover material, blank lines in code).
    Skipped,
    /// Horizontal rule (`---`, `***`, `___`).
    Rule,
    /// Opening or closing code fence.
    FenceToggle,
    /// Line inside a fenced code block, right-trimmed.
    CodeLine(String),
    /// ATX heading; levels deeper than 4 are reported as 4.
    Heading { level: u8, text: String },
    /// Pipe-table row, trimmed.
    TableRow(String),
    /// Task-list item.
    Checkbox { checked: bool, text: String },
    /// Bullet item text without its marker.
    Bullet(String),
    /// Numbered item, marker included.
    Numbered(String),
    /// Code-like line indented by two or more spaces, right-trimmed.
    Indented(String),
    /// Anything else, trimmed.
    Paragraph(String),
}

/// Title and detail lines shown on the cover page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverInfo {
    /// Text of the first `# ` heading.
    pub title: Option<String>,
    /// Preamble metadata rendered as cover lines, e.g. `"Version 1.0"`.
    pub details: Vec<String>,
    /// 0-indexed source lines consumed by the cover.
    #[serde(skip)]
    pub source_lines: Vec<usize>,
}

static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

static RE_METADATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*([A-Za-z][A-Za-z0-9 _/-]{0,23})(?::\*\*|\*\*:)\s*(\S.{0,79})$").unwrap()
});

/// Scan the preamble (everything before the first `## ` heading) for cover
/// material.
pub fn extract_cover(markdown: &str) -> CoverInfo {
    let mut cover = CoverInfo::default();
    let mut in_code = false;

    for (idx, line) in markdown.lines().enumerate() {
        let stripped = line.trim();
        if stripped.starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            continue;
        }
        if stripped.starts_with("## ") {
            break;
        }
        if cover.title.is_none() {
            if let Some(title) = stripped.strip_prefix("# ") {
                cover.title = Some(clean_heading(title));
                cover.source_lines.push(idx);
                continue;
            }
        }
        if let Some(caps) = RE_METADATA.captures(stripped) {
            let key = caps[1].trim();
            let value = text::strip_emphasis(caps[2].trim());
            let detail = match key.to_ascii_lowercase().as_str() {
                "version" => format!("Version {value}"),
                "date" => value,
                _ => format!("{key}: {value}"),
            };
            cover.details.push(detail);
            cover.source_lines.push(idx);
        }
    }

    cover
}

/// Strip links and bold markers from heading text.
pub fn clean_heading(raw: &str) -> String {
    text::strip_bold(&text::strip_links(raw.trim()))
}

/// Stateful line classifier.
#[derive(Debug, Default)]
pub struct Classifier {
    in_code_block: bool,
    skip: HashSet<usize>,
}

impl Classifier {
    /// Create a classifier that reports the given 0-indexed lines as
    /// [`Block::Skipped`].
    pub fn new(skip_lines: impl IntoIterator<Item = usize>) -> Self {
        Self {
            in_code_block: false,
            skip: skip_lines.into_iter().collect(),
        }
    }

    /// Whether the previous line left us inside a fenced code block.
    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    /// Classify line `idx` (0-indexed) with raw content `line`.
    pub fn classify(&mut self, idx: usize, line: &str) -> Block {
        let stripped = line.trim();

        if stripped.is_empty() {
            return if self.in_code_block {
                Block::Skipped
            } else {
                Block::Blank
            };
        }

        if !self.in_code_block && self.skip.contains(&idx) {
            return Block::Skipped;
        }

        if !self.in_code_block && matches!(stripped, "---" | "***" | "___") {
            return Block::Rule;
        }

        if stripped.starts_with("```") {
            self.in_code_block = !self.in_code_block;
            return Block::FenceToggle;
        }

        if self.in_code_block {
            return Block::CodeLine(line.trim_end().to_string());
        }

        if let Some(block) = classify_heading(stripped) {
            return block;
        }

        if stripped.starts_with('|') {
            return Block::TableRow(stripped.to_string());
        }

        if let Some(block) = classify_checkbox(stripped) {
            return block;
        }

        if let Some(rest) = ["- ", "* ", "+ "]
            .iter()
            .find_map(|marker| stripped.strip_prefix(marker))
        {
            return Block::Bullet(rest.to_string());
        }

        if RE_NUMBERED.is_match(stripped) {
            return Block::Numbered(stripped.to_string());
        }

        if line.starts_with("  ") {
            return Block::Indented(line.trim_end().to_string());
        }

        Block::Paragraph(stripped.to_string())
    }
}

fn classify_heading(stripped: &str) -> Option<Block> {
    let hashes = stripped.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = stripped[hashes..].strip_prefix(' ')?;
    Some(Block::Heading {
        level: hashes.min(4) as u8,
        text: clean_heading(rest),
    })
}

fn classify_checkbox(stripped: &str) -> Option<Block> {
    let (checked, rest) = if let Some(rest) = stripped.strip_prefix("- [ ]") {
        (false, rest)
    } else if let Some(rest) = stripped
        .strip_prefix("- [x]")
        .or_else(|| stripped.strip_prefix("- [X]"))
    {
        (true, rest)
    } else {
        return None;
    };
    Some(Block::Checkbox {
        checked,
        text: rest.trim_start().to_string(),
    })
}

/// Classify every line of `markdown`, skipping `skip_lines`.
pub fn classify_document(
    markdown: &str,
    skip_lines: impl IntoIterator<Item = usize>,
) -> Vec<Block> {
    let mut classifier = Classifier::new(skip_lines);
    markdown
        .lines()
        .enumerate()
        .map(|(idx, line)| classifier.classify(idx, line))
        .collect()
}
