//! Conversion entry points.
//!
//! [`convert`] resolves a path or URL and hands the text to [`convert_str`],
//! which runs the pipeline stages in order and assembles the
//! [`ConversionOutput`]. [`convert_to_file`] adds an atomic write on top, and
//! [`inspect`] stops after classification to report the document structure.

use crate::config::RenderConfig;
use crate::error::Md2PdfError;
use crate::output::{BlockCounts, ConversionOutput, ConversionStats, DocumentOutline, HeadingEntry};
use crate::pipeline::classify::{self, Block};
use crate::pipeline::layout::{self, CoverPage};
use crate::pipeline::{input, preprocess, write};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Name used for in-memory inputs in logs and errors.
const MEMORY_SOURCE: &str = "<memory>";

/// Convert a Markdown file or URL to a PDF report.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_str` — Local file path or HTTP/HTTPS URL to a Markdown document
/// * `config` — Rendering configuration
///
/// # Errors
/// - File not found / permission denied / not UTF-8
/// - Download failure or timeout for URLs
/// - The document is empty
/// - printpdf failed to serialise the document
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &RenderConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    render(&resolved.source, &resolved.markdown, config).await
}

/// Convert Markdown text held in memory.
///
/// # Example
/// ```rust,no_run
/// use md2pdf_report::{convert_str, RenderConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let md = "# Release Notes\n\n**Version:** 2.1\n\n## Changes\n- faster export\n";
/// let output = convert_str(md, &RenderConfig::default()).await?;
/// std::fs::write("release-notes.pdf", &output.pdf)?;
/// # Ok(())
/// # }
/// ```
pub async fn convert_str(
    markdown: &str,
    config: &RenderConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    render(MEMORY_SOURCE, markdown, config).await
}

/// Convert a Markdown document and write the PDF directly to a file.
///
/// Missing parent directories are created. The PDF is written to a temporary
/// file in the target directory and then renamed over `output_path`, so a
/// failed run never leaves a truncated PDF behind.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<ConversionStats, Md2PdfError> {
    let output = convert(input_str, config).await?;
    let path = output_path.as_ref().to_path_buf();

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| Md2PdfError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    let pdf = output.pdf;
    let target = path.clone();
    tokio::task::spawn_blocking(move || persist_atomically(&dir, &target, &pdf))
        .await
        .map_err(|e| Md2PdfError::Internal(format!("Output task panicked: {}", e)))??;

    info!("Wrote {} bytes to {}", output.stats.pdf_bytes, path.display());
    Ok(output.stats)
}

fn persist_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), Md2PdfError> {
    let write_err = |source: std::io::Error| Md2PdfError::OutputWriteFailed {
        path: target.to_path_buf(),
        source,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &RenderConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2PdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_str, config))
}

/// Report the structure of a document without rendering it.
///
/// Only `config.download_timeout_secs` is used.
pub async fn inspect(
    input_str: impl AsRef<str>,
    config: &RenderConfig,
) -> Result<DocumentOutline, Md2PdfError> {
    let resolved = input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    Ok(outline(&resolved.markdown))
}

/// Classify `markdown` and collect its cover material, headings and counts.
pub fn outline(markdown: &str) -> DocumentOutline {
    let markdown = preprocess::normalise(markdown);
    let blocks = classify::classify_document(&markdown, []);
    let headings = blocks
        .iter()
        .enumerate()
        .filter_map(|(idx, block)| match block {
            Block::Heading { level, text } => Some(HeadingEntry {
                level: *level,
                text: text.clone(),
                line: idx + 1,
            }),
            _ => None,
        })
        .collect();

    DocumentOutline {
        cover: classify::extract_cover(&markdown),
        headings,
        blocks: BlockCounts::from_blocks(&blocks),
        source_lines: blocks.len(),
    }
}

/// Where the CLI writes the PDF when no output path is given:
/// `<stem>.pdf` next to a local input, `<last URL segment>.pdf` (or
/// `report.pdf`) in the working directory for URLs.
pub fn default_output_path(input_str: &str) -> PathBuf {
    if input::is_url(input_str) {
        let stem = input::url_file_stem(input_str).unwrap_or_else(|| "report".to_string());
        PathBuf::from(format!("{stem}.pdf"))
    } else {
        Path::new(input_str).with_extension("pdf")
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────

async fn render(
    source: &str,
    raw_markdown: &str,
    config: &RenderConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let total_start = Instant::now();

    // ── Step 1: Normalise ────────────────────────────────────────────────
    let markdown = preprocess::normalise(raw_markdown);
    if markdown.trim().is_empty() {
        return Err(Md2PdfError::EmptyDocument {
            input: source.to_string(),
        });
    }
    let source_lines = markdown.lines().count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(source_lines);
    }

    // ── Step 2: Cover ────────────────────────────────────────────────────
    let found = classify::extract_cover(&markdown);
    let title = config.title.clone().or_else(|| found.title.clone());
    let cover = build_cover(title.as_deref(), &found.details, config);
    let skip = if cover.is_some() {
        found.source_lines.clone()
    } else {
        Vec::new()
    };
    debug!(
        "Cover: title={:?}, {} detail lines, rendered={}",
        title,
        found.details.len(),
        cover.is_some()
    );

    // ── Step 3: Classify ─────────────────────────────────────────────────
    let blocks = classify::classify_document(&markdown, skip);
    let counts = BlockCounts::from_blocks(&blocks);

    // ── Step 4: Layout ───────────────────────────────────────────────────
    let layout_start = Instant::now();
    let laid_out = layout::lay_out(&blocks, cover.as_ref(), title.as_deref(), config);
    let layout_duration_ms = layout_start.elapsed().as_millis() as u64;
    let total_pages = laid_out.pages.len();
    let truncated_lines = laid_out.truncated_lines;
    let replaced_chars = laid_out.replaced_chars;
    info!("Laid out {} pages in {}ms", total_pages, layout_duration_ms);

    if replaced_chars > 0 {
        warn!(
            "{} characters outside latin-1 were replaced with '?'",
            replaced_chars
        );
    }
    if truncated_lines > 0 {
        debug!("{} lines were truncated", truncated_lines);
    }

    // ── Step 5: Write ────────────────────────────────────────────────────
    let write_start = Instant::now();
    let doc_title = title.unwrap_or_else(|| source.to_string());
    let pdf = write::write_pdf_async(laid_out, doc_title).await?;
    let write_duration_ms = write_start.elapsed().as_millis() as u64;

    let stats = ConversionStats {
        total_pages,
        has_cover: cover.is_some(),
        source_lines,
        blocks: counts,
        truncated_lines,
        replaced_chars,
        pdf_bytes: pdf.len(),
        layout_duration_ms,
        write_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} pages, {} bytes, {}ms total",
        total_pages, stats.pdf_bytes, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_pages, pdf.len());
    }

    Ok(ConversionOutput {
        pdf,
        cover: found,
        stats,
    })
}

fn build_cover(
    title: Option<&str>,
    found_details: &[String],
    config: &RenderConfig,
) -> Option<CoverPage> {
    if !config.cover.enabled {
        return None;
    }
    let title = title?;
    let mut details = found_details.to_vec();
    details.extend(config.cover.extra_details.iter().cloned());
    Some(CoverPage {
        title: title.to_string(),
        subtitle: config.cover.subtitle.clone(),
        details,
        taglines: config.cover.taglines.clone(),
    })
}
