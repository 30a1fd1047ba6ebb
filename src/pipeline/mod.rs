//! Pipeline stages for Markdown-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ preprocess ──▶ classify ──▶ layout ──▶ write
//! (path/URL)  (normalise)   (Block/line)  (display   (printpdf)
//!                                          list)
//! ```
//!
//! 1. [`input`]      — read a local file or download a URL as UTF-8 text
//! 2. [`preprocess`] — line endings, invisible characters, tabs
//! 3. [`classify`]   — one [`classify::Block`] per line, plus cover extraction
//! 4. [`layout`]     — cursor-based page flow into a per-page display list;
//!    uses [`text`] for latin-1 folding and [`metrics`] for wrapping
//! 5. [`write`]      — display list to PDF bytes; runs in `spawn_blocking`

pub mod classify;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod preprocess;
pub mod text;
pub mod write;
