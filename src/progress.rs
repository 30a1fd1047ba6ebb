//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::RenderConfigBuilder::progress_callback`] to receive
//! events as the layout stage walks the document and closes each page.
//!
//! # Example
//!
//! ```rust
//! use md2pdf_report::{ConversionProgressCallback, RenderConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     pages: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for PageCounter {
//!     fn on_page_complete(&self, page_num: usize, lines_done: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {page_num} closed after {lines_done} lines");
//!     }
//! }
//!
//! let counter = Arc::new(PageCounter { pages: AtomicUsize::new(0) });
//!
//! let config = RenderConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it lays out the document.
///
/// Implementations must be `Send + Sync` so a single callback can be shared
/// with whatever task drives the conversion. All methods have default no-op
/// implementations so callers only override what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the Markdown was read and normalised.
    ///
    /// # Arguments
    /// * `total_lines` — number of source lines that will be classified
    fn on_conversion_start(&self, total_lines: usize) {
        let _ = total_lines;
    }

    /// Called each time the layout engine closes a page.
    ///
    /// # Arguments
    /// * `page_num`   — 1-indexed page number that was just closed
    /// * `lines_done` — source lines consumed so far
    fn on_page_complete(&self, page_num: usize, lines_done: usize) {
        let _ = (page_num, lines_done);
    }

    /// Called once after the PDF bytes were produced.
    ///
    /// # Arguments
    /// * `total_pages` — pages in the finished document
    /// * `pdf_bytes`   — size of the serialised PDF
    fn on_conversion_complete(&self, total_pages: usize, pdf_bytes: usize) {
        let _ = (total_pages, pdf_bytes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::RenderConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        started_lines: AtomicUsize,
        pages: AtomicUsize,
        last_lines_done: AtomicUsize,
        finished_bytes: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_lines: usize) {
            self.started_lines.store(total_lines, Ordering::SeqCst);
        }

        fn on_page_complete(&self, _page_num: usize, lines_done: usize) {
            self.pages.fetch_add(1, Ordering::SeqCst);
            self.last_lines_done.store(lines_done, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total_pages: usize, pdf_bytes: usize) {
            self.finished_bytes.store(pdf_bytes, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(120);
        cb.on_page_complete(1, 60);
        cb.on_conversion_complete(2, 4096);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            started_lines: AtomicUsize::new(0),
            pages: AtomicUsize::new(0),
            last_lines_done: AtomicUsize::new(0),
            finished_bytes: AtomicUsize::new(0),
        };

        tracker.on_conversion_start(90);
        tracker.on_page_complete(1, 40);
        tracker.on_page_complete(2, 90);
        tracker.on_conversion_complete(2, 5000);

        assert_eq!(tracker.started_lines.load(Ordering::SeqCst), 90);
        assert_eq!(tracker.pages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.last_lines_done.load(Ordering::SeqCst), 90);
        assert_eq!(tracker.finished_bytes.load(Ordering::SeqCst), 5000);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_page_complete(1, 10);
    }
}
