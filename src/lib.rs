//! # md2pdf-report
//!
//! Render Markdown documents as print-ready PDF reports.
//!
//! The converter understands the subset of Markdown that technical reports
//! actually use (headings, paragraphs, bullet, numbered and checkbox lists,
//! pipe tables, fenced code and rules) and lays it out line by line with the
//! PDF standard-14 fonts, so no font files are needed at run time. A cover
//! page is built from the document's own title block, and every page after
//! the first carries a running header and a `Page N/M` footer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Input      resolve local file or download from URL
//!  ├─ 2. Normalise  line endings, invisible characters, tabs
//!  ├─ 3. Classify   one Block per line; cover title + metadata
//!  ├─ 4. Layout     cursor-based page flow into a display list
//!  ├─ 5. Write      printpdf serialisation (CPU-bound, spawn_blocking)
//!  └─ 6. Output     PDF bytes + cover info + stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf_report::{convert_to_file, RenderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::builder()
//!         .subtitle("Product Specification")
//!         .build()?;
//!     let stats = convert_to_file("SPEC.md", "SPEC.pdf", &config).await?;
//!     eprintln!("{} pages, {} bytes", stats.total_pages, stats.pdf_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2pdf-report = { version = "0.1", default-features = false }
//! ```
//!
//! ## Character Set
//!
//! The built-in fonts cover latin-1 only. Typographic punctuation, arrows,
//! box-drawing and emoji are folded to ASCII equivalents; anything else
//! becomes `?` and is counted in [`ConversionStats::replaced_chars`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    CoverOptions, HeaderMode, PageSize, RenderConfig, RenderConfigBuilder, Rgb, Theme,
    TruncationLimits,
};
pub use convert::{
    convert, convert_str, convert_sync, convert_to_file, default_output_path, inspect, outline,
};
pub use error::Md2PdfError;
pub use output::{BlockCounts, ConversionOutput, ConversionStats, DocumentOutline, HeadingEntry};
pub use pipeline::classify::{Block, CoverInfo};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
