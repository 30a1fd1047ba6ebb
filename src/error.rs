//! Error types for the md2pdf-report library.
//!
//! Every failure that stops a conversion is a [`Md2PdfError`]. Lossy but
//! recoverable situations (characters outside latin-1, over-long table or
//! code lines) are *not* errors: they are counted in
//! [`crate::output::ConversionStats`] and logged, and the PDF is still
//! produced.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2pdf-report library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file (or downloaded body) is not valid UTF-8 text.
    #[error("Input '{input}' is not valid UTF-8 text (invalid byte at offset {offset})")]
    NotUtf8 { input: String, offset: usize },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The document has nothing to render.
    #[error("Document '{input}' is empty; nothing to render")]
    EmptyDocument { input: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// printpdf refused to build or serialise the document.
    #[error("Failed to produce PDF: {detail}")]
    PdfWriteFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_utf8_display() {
        let e = Md2PdfError::NotUtf8 {
            input: "notes.md".into(),
            offset: 17,
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.md"), "got: {msg}");
        assert!(msg.contains("17"), "got: {msg}");
    }

    #[test]
    fn download_timeout_display() {
        let e = Md2PdfError::DownloadTimeout {
            url: "https://example.org/notes.md".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
        assert!(e.to_string().contains("--download-timeout"));
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error as _;
        let e = Md2PdfError::OutputWriteFailed {
            path: PathBuf::from("/readonly/out.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/readonly/out.pdf"));
        assert!(e.source().is_some());
    }

    #[test]
    fn empty_document_display() {
        let e = Md2PdfError::EmptyDocument {
            input: "<memory>".into(),
        };
        assert!(e.to_string().contains("empty"));
    }
}
