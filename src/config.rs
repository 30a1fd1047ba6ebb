//! Configuration types for Markdown-to-PDF rendering.
//!
//! All rendering behaviour is controlled through [`RenderConfig`], built via
//! its [`RenderConfigBuilder`]. The defaults reproduce the classic report
//! look: A4 portrait, 10 mm margins, a navy accent colour, a cover page built
//! from the document's own title block, a running header and a
//! `Page N/M` footer.

use crate::error::Md2PdfError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`RenderConfig::builder()`] or using [`RenderConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf_report::{PageSize, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .page_size(PageSize::Letter)
///     .subtitle("Quarterly Review")
///     .tagline("Internal use only")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct RenderConfig {
    /// Physical page size. Default: A4.
    pub page_size: PageSize,

    /// Left, top and right page margin in millimetres. Default: 10.
    pub margin_mm: f32,

    /// Distance from the bottom edge at which content breaks onto a new page,
    /// in millimetres. Default: 20. The footer lives inside this band.
    pub break_margin_mm: f32,

    /// Document title. If None, the first `# ` heading of the document is used.
    pub title: Option<String>,

    /// Cover page settings.
    pub cover: CoverOptions,

    /// Running header on pages after the first. Default: [`HeaderMode::Auto`].
    pub header: HeaderMode,

    /// Draw the `Page N/M` footer. Default: true.
    pub show_footer: bool,

    /// Per-block character limits beyond which lines are cut and end in `...`.
    pub limits: TruncationLimits,

    /// Colour palette.
    pub theme: Theme,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Optional progress callback for per-page events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin_mm: 10.0,
            break_margin_mm: 20.0,
            title: None,
            cover: CoverOptions::default(),
            header: HeaderMode::default(),
            show_footer: true,
            limits: TruncationLimits::default(),
            theme: Theme::default(),
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("page_size", &self.page_size)
            .field("margin_mm", &self.margin_mm)
            .field("break_margin_mm", &self.break_margin_mm)
            .field("title", &self.title)
            .field("cover", &self.cover)
            .field("header", &self.header)
            .field("show_footer", &self.show_footer)
            .field("limits", &self.limits)
            .field("theme", &self.theme)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn margin_mm(mut self, mm: f32) -> Self {
        self.config.margin_mm = mm.max(0.0);
        self
    }

    pub fn break_margin_mm(mut self, mm: f32) -> Self {
        self.config.break_margin_mm = mm.max(0.0);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn cover(mut self, enabled: bool) -> Self {
        self.config.cover.enabled = enabled;
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.config.cover.subtitle = Some(subtitle.into());
        self
    }

    /// Append one italic line to the bottom block of the cover page.
    pub fn tagline(mut self, line: impl Into<String>) -> Self {
        self.config.cover.taglines.push(line.into());
        self
    }

    /// Append one detail line (below the cover rule) in addition to the
    /// details found in the document preamble.
    pub fn cover_detail(mut self, line: impl Into<String>) -> Self {
        self.config.cover.extra_details.push(line.into());
        self
    }

    pub fn header(mut self, mode: HeaderMode) -> Self {
        self.config.header = mode;
        self
    }

    pub fn show_footer(mut self, v: bool) -> Self {
        self.config.show_footer = v;
        self
    }

    pub fn limits(mut self, limits: TruncationLimits) -> Self {
        self.config.limits = limits;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, Md2PdfError> {
        let c = &self.config;
        let (width, height) = c.page_size.dimensions_mm();
        if width < 50.0 || height < 50.0 {
            return Err(Md2PdfError::InvalidConfig(format!(
                "Page must be at least 50×50 mm, got {width}×{height}"
            )));
        }
        if c.margin_mm * 2.0 >= width - 20.0 {
            return Err(Md2PdfError::InvalidConfig(format!(
                "Margins of {} mm leave no room on a {width} mm wide page",
                c.margin_mm
            )));
        }
        if c.break_margin_mm + c.margin_mm >= height / 2.0 {
            return Err(Md2PdfError::InvalidConfig(format!(
                "Break margin of {} mm is too large for a {height} mm tall page",
                c.break_margin_mm
            )));
        }
        c.limits.validate()?;
        Ok(self.config)
    }
}

// ── Plain-data types ─────────────────────────────────────────────────────

/// Physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// 210 × 297 mm (default).
    #[default]
    A4,
    /// 8.5 × 11 in.
    Letter,
    /// Arbitrary size in millimetres.
    Custom { width_mm: f32, height_mm: f32 },
}

impl PageSize {
    /// Width and height in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Running header behaviour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum HeaderMode {
    /// `"{title} - {subtitle}"`, or just the title when there is no subtitle.
    /// No header when the document has no title. (default)
    #[default]
    Auto,
    /// Fixed header text.
    Custom(String),
    /// No running header.
    Off,
}

/// Cover page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverOptions {
    /// Render a cover page when a title is known. Default: true.
    pub enabled: bool,
    /// Line under the title.
    pub subtitle: Option<String>,
    /// Italic lines at the bottom of the cover.
    pub taglines: Vec<String>,
    /// Detail lines appended after those found in the document preamble.
    pub extra_details: Vec<String>,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            subtitle: None,
            taglines: Vec::new(),
            extra_details: Vec::new(),
        }
    }
}

/// Maximum characters per rendered line for blocks that are drawn as a single
/// cell and therefore cannot wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationLimits {
    /// Fenced code and indented lines. Default: 110.
    pub code_line: usize,
    /// Table rows. Default: 130.
    pub table_row: usize,
    /// Bullet items (which do wrap, but long ones are summarised). Default: 160.
    pub bullet: usize,
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            code_line: 110,
            table_row: 130,
            bullet: 160,
        }
    }
}

impl TruncationLimits {
    fn validate(&self) -> Result<(), Md2PdfError> {
        for (name, v) in [
            ("code line", self.code_line),
            ("table row", self.table_row),
            ("bullet", self.bullet),
        ] {
            if v < 8 {
                return Err(Md2PdfError::InvalidConfig(format!(
                    "{name} limit must be ≥ 8 characters, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// A neutral grey with all channels set to `level`.
    pub const fn grey(level: u8) -> Rgb {
        Rgb(level, level, level)
    }
}

/// Colour palette used by the layout stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Title, section headings and their rules. Default: navy (0, 51, 102).
    pub accent: Rgb,
    /// Subsection headings. Default: (51, 51, 51).
    pub subheading: Rgb,
    /// Body text, lists and tables. Default: black.
    pub body: Rgb,
    /// Fenced code. Default: grey 60.
    pub code: Rgb,
    /// Indented code-like lines. Default: grey 80.
    pub indented: Rgb,
    /// Header and footer. Default: grey 128.
    pub chrome: Rgb,
    /// Horizontal rules. Default: grey 180.
    pub rule: Rgb,
    /// Cover subtitle and details. Default: grey 80.
    pub cover_text: Rgb,
    /// Cover tagline. Default: grey 100.
    pub cover_tagline: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Rgb(0, 51, 102),
            subheading: Rgb(51, 51, 51),
            body: Rgb::BLACK,
            code: Rgb::grey(60),
            indented: Rgb::grey(80),
            chrome: Rgb::grey(128),
            rule: Rgb::grey(180),
            cover_text: Rgb::grey(80),
            cover_tagline: Rgb::grey(100),
        }
    }
}
