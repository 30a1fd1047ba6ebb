//! Page-flow layout: turn classified blocks into a per-page display list.
//!
//! ## Model
//!
//! The engine mirrors the classic cursor-based PDF writers: a current
//! position `(x, y)` measured in millimetres from the top-left corner,
//! a current font and colours, and three primitives:
//!
//! - [`Layout::cell`] draws one line of text in a box of height `h` and
//!   moves the cursor to the start of the next line,
//! - [`Layout::multi_cell`] word-wraps text and emits one cell per line,
//! - [`Layout::ln`] moves the cursor down.
//!
//! Whenever a cell would cross `page_height − break_margin`, a page break
//! happens first. Each new page (except the first) gets the running header,
//! and after the last page every page receives its `Page N/M` footer, which is
//! only possible once `M` is known.
//!
//! The output is a [`LaidOutDocument`], a plain display list that the write
//! stage turns into PDF objects. Keeping layout free of PDF types makes every
//! page-break decision testable without parsing PDF bytes.

use crate::config::{HeaderMode, RenderConfig, Rgb, Theme, TruncationLimits};
use crate::pipeline::classify::Block;
use crate::pipeline::metrics::{self, FontFace, PT_TO_MM};
use crate::pipeline::text;
use crate::progress::ConversionProgressCallback;
use tracing::debug;

/// Horizontal padding inside a cell, in millimetres.
const CELL_PADDING_MM: f32 = 1.0;

/// Default stroke width for rules, in millimetres.
const LINE_WIDTH_MM: f32 = 0.2;

/// One drawing instruction. Coordinates are millimetres from the top-left
/// corner of the page; `y` of a text op is its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        face: FontFace,
        size_pt: f32,
        color: Rgb,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width_mm: f32,
    },
}

/// Drawing instructions for one page.
pub type PageOps = Vec<DrawOp>;

/// The complete display list of a document.
#[derive(Debug, Clone, Default)]
pub struct LaidOutDocument {
    pub width_mm: f32,
    pub height_mm: f32,
    pub pages: Vec<PageOps>,
    /// Lines cut to their configured limit.
    pub truncated_lines: usize,
    /// Characters replaced with `?` because latin-1 cannot represent them.
    pub replaced_chars: usize,
}

impl LaidOutDocument {
    /// All text drawn on page `idx` (0-indexed), in drawing order.
    pub fn page_text(&self, idx: usize) -> Vec<&str> {
        self.pages
            .get(idx)
            .map(|ops| {
                ops.iter()
                    .filter_map(|op| match op {
                        DrawOp::Text { text, .. } => Some(text.as_str()),
                        DrawOp::Line { .. } => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Text that goes on the cover page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverPage {
    pub title: String,
    pub subtitle: Option<String>,
    pub details: Vec<String>,
    pub taglines: Vec<String>,
}

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Lay out `blocks`, preceded by `cover` when given.
///
/// `title` feeds the automatic running header.
pub fn lay_out(
    blocks: &[Block],
    cover: Option<&CoverPage>,
    title: Option<&str>,
    config: &RenderConfig,
) -> LaidOutDocument {
    let header = header_text(config, title);
    let progress = config.progress_callback.as_deref();
    let mut layout = Layout::new(config, header, progress);

    if let Some(cover) = cover {
        layout.add_page();
        layout.render_cover(cover);
    }
    layout.add_page();

    for (idx, block) in blocks.iter().enumerate() {
        layout.lines_done = idx;
        layout.render_block(block);
    }
    layout.lines_done = blocks.len();

    layout.finish()
}

fn header_text(config: &RenderConfig, title: Option<&str>) -> Option<String> {
    match &config.header {
        HeaderMode::Off => None,
        HeaderMode::Custom(text) => Some(text.clone()),
        HeaderMode::Auto => title.map(|t| match &config.cover.subtitle {
            Some(sub) => format!("{t} - {sub}"),
            None => t.to_string(),
        }),
    }
}

/// Cursor-based layout engine.
pub struct Layout<'a> {
    width: f32,
    height: f32,
    margin: f32,
    break_at: f32,
    show_footer: bool,
    theme: Theme,
    limits: TruncationLimits,
    header: Option<String>,
    progress: Option<&'a dyn ConversionProgressCallback>,

    pages: Vec<PageOps>,
    x: f32,
    y: f32,
    face: FontFace,
    size_pt: f32,
    text_color: Rgb,
    draw_color: Rgb,
    in_chrome: bool,

    lines_done: usize,
    truncated_lines: usize,
    replaced_chars: usize,
}

impl<'a> Layout<'a> {
    pub fn new(
        config: &RenderConfig,
        header: Option<String>,
        progress: Option<&'a dyn ConversionProgressCallback>,
    ) -> Self {
        let (width, height) = config.page_size.dimensions_mm();
        Self {
            width,
            height,
            margin: config.margin_mm,
            break_at: height - config.break_margin_mm,
            show_footer: config.show_footer,
            theme: config.theme,
            limits: config.limits,
            header: header.map(|h| text::safe_text(&h).0),
            progress,
            pages: Vec::new(),
            x: config.margin_mm,
            y: config.margin_mm,
            face: FontFace::Helvetica,
            size_pt: 12.0,
            text_color: Rgb::BLACK,
            draw_color: Rgb::BLACK,
            in_chrome: false,
            lines_done: 0,
            truncated_lines: 0,
            replaced_chars: 0,
        }
    }

    // ── Primitives ──────────────────────────────────────────────────────

    /// Close the current page (if any) and start a new one.
    pub fn add_page(&mut self) {
        if !self.pages.is_empty() {
            self.page_closed();
        }
        self.pages.push(Vec::new());
        self.x = self.margin;
        self.y = self.margin;

        if self.pages.len() > 1 {
            if let Some(header) = self.header.clone() {
                let saved = (self.face, self.size_pt, self.text_color, self.draw_color);
                self.in_chrome = true;
                self.set_font(FontFace::HelveticaOblique, 8.0);
                self.set_text_color(self.theme.chrome);
                self.cell(0.0, 5.0, &header, Align::Center);
                self.ln(6.0);
                self.in_chrome = false;
                (self.face, self.size_pt, self.text_color, self.draw_color) = saved;
            }
        }
    }

    fn page_closed(&self) {
        debug!("Closed page {} after {} lines", self.pages.len(), self.lines_done);
        if let Some(cb) = self.progress {
            cb.on_page_complete(self.pages.len(), self.lines_done);
        }
    }

    pub fn set_font(&mut self, face: FontFace, size_pt: f32) {
        self.face = face;
        self.size_pt = size_pt;
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Line break: back to the left margin, `h` millimetres down.
    pub fn ln(&mut self, h: f32) {
        self.x = self.margin;
        self.y += h;
    }

    /// Straight line in the current draw colour.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let op = DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.draw_color,
            width_mm: LINE_WIDTH_MM,
        };
        self.push(op);
    }

    /// One line of text in a `w × h` box at the cursor. `w == 0` extends the
    /// box to the right margin. Moves the cursor to the next line.
    pub fn cell(&mut self, w: f32, h: f32, text: &str, align: Align) {
        if !self.in_chrome && self.y + h > self.break_at {
            self.add_page();
        }
        let w = if w <= 0.0 {
            self.width - self.margin - self.x
        } else {
            w
        };
        if !text.is_empty() {
            let op = self.text_op(self.x, self.y, w, h, text, align);
            self.push(op);
        }
        self.ln(h);
    }

    /// Word-wrapped text in a column of width `w`; one cell per line.
    pub fn multi_cell(&mut self, w: f32, h: f32, text: &str) {
        let w = if w <= 0.0 {
            self.width - self.margin - self.x
        } else {
            w
        };
        let x = self.x;
        let usable = w - 2.0 * CELL_PADDING_MM;
        for line in metrics::wrap(self.face, self.size_pt, usable, text) {
            self.x = x;
            self.cell(w, h, &line, Align::Left);
        }
    }

    fn text_op(&self, x: f32, y: f32, w: f32, h: f32, text: &str, align: Align) -> DrawOp {
        let dx = match align {
            Align::Left => CELL_PADDING_MM,
            Align::Center => (w - metrics::string_width(self.face, self.size_pt, text)) / 2.0,
        };
        DrawOp::Text {
            x: x + dx,
            y: y + h / 2.0 + 0.3 * self.size_pt * PT_TO_MM,
            face: self.face,
            size_pt: self.size_pt,
            color: self.text_color,
            text: text.to_string(),
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    /// Fold text into latin-1, counting replacements.
    fn clean(&mut self, s: &str) -> String {
        let (out, replaced) = text::safe_text(s);
        self.replaced_chars += replaced;
        out
    }

    fn clip(&mut self, s: &str, limit: usize) -> String {
        let (out, cut) = text::truncate(s, limit);
        if cut {
            self.truncated_lines += 1;
        }
        out
    }

    /// Stamp footers and hand back the display list.
    pub fn finish(mut self) -> LaidOutDocument {
        if !self.pages.is_empty() {
            self.page_closed();
        }
        let total = self.pages.len();
        if self.show_footer {
            self.in_chrome = true;
            self.set_font(FontFace::HelveticaOblique, 8.0);
            self.set_text_color(self.theme.chrome);
            let footer_y = self.height - 15.0;
            let w = self.width - 2.0 * self.margin;
            for n in 1..=total {
                let op = self.text_op(
                    self.margin,
                    footer_y,
                    w,
                    10.0,
                    &format!("Page {n}/{total}"),
                    Align::Center,
                );
                self.pages[n - 1].push(op);
            }
        }
        LaidOutDocument {
            width_mm: self.width,
            height_mm: self.height,
            pages: self.pages,
            truncated_lines: self.truncated_lines,
            replaced_chars: self.replaced_chars,
        }
    }

    // ── Report styling ──────────────────────────────────────────────────

    /// Width of the text column (between the margins).
    fn column(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn full_width_rule(&mut self, color: Rgb) {
        self.set_draw_color(color);
        let y = self.y;
        self.line(self.margin, y, self.width - self.margin, y);
    }

    /// Break the page when a heading would start below `height − reserve`.
    ///
    /// The threshold never rises above the middle of the usable area, so on
    /// short pages a heading still shares its page with what precedes it.
    fn keep_with_next(&mut self, reserve: f32) {
        let midpoint = self.margin + (self.break_at - self.margin) / 2.0;
        if self.y > (self.height - reserve).max(midpoint) {
            self.add_page();
        }
    }

    pub fn render_cover(&mut self, cover: &CoverPage) {
        let theme = self.theme;
        self.ln(40.0);
        self.set_font(FontFace::HelveticaBold, 28.0);
        self.set_text_color(theme.accent);
        let title = self.clean(&cover.title);
        self.cell(0.0, 15.0, &title, Align::Center);

        self.set_font(FontFace::Helvetica, 16.0);
        self.set_text_color(theme.cover_text);
        if let Some(subtitle) = &cover.subtitle {
            let subtitle = self.clean(subtitle);
            self.cell(0.0, 10.0, &subtitle, Align::Center);
        }
        self.ln(10.0);

        self.set_draw_color(theme.accent);
        let mid = self.width / 2.0;
        let y = self.y;
        self.line(mid - 45.0, y, mid + 45.0, y);
        self.ln(10.0);

        self.set_font(FontFace::Helvetica, 12.0);
        for detail in &cover.details {
            let detail = self.clean(detail);
            self.cell(0.0, 8.0, &detail, Align::Center);
        }

        if !cover.taglines.is_empty() {
            self.ln(30.0);
            self.set_font(FontFace::HelveticaOblique, 10.0);
            self.set_text_color(theme.cover_tagline);
            for line in &cover.taglines {
                let line = self.clean(line);
                self.cell(0.0, 8.0, &line, Align::Center);
            }
        }
    }

    pub fn render_block(&mut self, block: &Block) {
        let theme = self.theme;
        let limits = self.limits;
        match block {
            Block::Blank => self.ln(2.0),
            Block::Skipped => {}
            Block::Rule => {
                self.full_width_rule(theme.rule);
                self.ln(3.0);
            }
            Block::FenceToggle => self.ln(1.0),
            Block::CodeLine(line) => {
                self.set_font(FontFace::Courier, 6.5);
                self.set_text_color(theme.code);
                let line = self.clean(line);
                let line = self.clip(&line, limits.code_line);
                self.cell(0.0, 3.5, &line, Align::Left);
            }
            Block::Heading { level, text } => self.render_heading(*level, text),
            Block::TableRow(row) => {
                self.set_font(FontFace::Courier, 6.5);
                self.set_text_color(theme.body);
                let row = self.clean(&text::strip_bold(row));
                let row = self.clip(&row, limits.table_row);
                self.cell(0.0, 3.8, &row, Align::Left);
            }
            Block::Checkbox { checked, text } => {
                self.set_font(FontFace::Helvetica, 8.0);
                self.set_text_color(theme.body);
                let mark = if *checked { 'x' } else { ' ' };
                let item = format!("  [{mark}] {}", text::strip_bold(text));
                let item = self.clean(item.trim_end());
                self.list_item(&item);
            }
            Block::Bullet(item) => {
                self.set_font(FontFace::Helvetica, 8.0);
                self.set_text_color(theme.body);
                let item = self.clean(&text::strip_bold(item));
                let item = self.clip(&item, limits.bullet);
                self.list_item(&format!("  - {item}"));
            }
            Block::Numbered(item) => {
                self.set_font(FontFace::Helvetica, 8.0);
                self.set_text_color(theme.body);
                let item = self.clean(&text::strip_bold(item));
                self.list_item(&item);
            }
            Block::Indented(line) => {
                self.set_font(FontFace::Courier, 6.5);
                self.set_text_color(theme.indented);
                let line = self.clean(line);
                let line = self.clip(&line, limits.code_line);
                self.cell(0.0, 3.5, &line, Align::Left);
            }
            Block::Paragraph(para) => {
                self.set_font(FontFace::Helvetica, 9.0);
                self.set_text_color(theme.body);
                let para = text::strip_links(&text::strip_emphasis(para));
                let para = self.clean(&para);
                self.set_x(self.margin);
                let w = self.column();
                self.multi_cell(w, 5.0, &para);
            }
        }
    }

    fn list_item(&mut self, item: &str) {
        self.set_x(self.margin);
        let w = self.column();
        self.multi_cell(w, 4.5, item);
    }

    fn render_heading(&mut self, level: u8, heading: &str) {
        let theme = self.theme;
        let heading = self.clean(heading);
        match level {
            1 => {
                self.keep_with_next(97.0);
                self.ln(6.0);
                self.set_font(FontFace::HelveticaBold, 16.0);
                self.set_text_color(theme.accent);
                self.cell(0.0, 10.0, &heading, Align::Left);
                self.full_width_rule(theme.accent);
                self.ln(4.0);
            }
            2 => {
                self.keep_with_next(77.0);
                self.ln(4.0);
                self.set_font(FontFace::HelveticaBold, 14.0);
                self.set_text_color(theme.accent);
                self.cell(0.0, 9.0, &heading, Align::Left);
                self.full_width_rule(theme.accent);
                self.ln(3.0);
            }
            3 => {
                self.keep_with_next(57.0);
                self.ln(3.0);
                self.set_font(FontFace::HelveticaBold, 11.0);
                self.set_text_color(theme.subheading);
                self.cell(0.0, 7.0, &heading, Align::Left);
                self.ln(2.0);
            }
            _ => {
                self.ln(2.0);
                self.set_font(FontFace::HelveticaBold, 10.0);
                self.set_text_color(theme.subheading);
                self.cell(0.0, 6.0, &heading, Align::Left);
                self.ln(1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;
    use crate::pipeline::classify::classify_document;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    fn texts(doc: &LaidOutDocument) -> Vec<Vec<&str>> {
        (0..doc.pages.len()).map(|i| doc.page_text(i)).collect()
    }

    fn baselines(doc: &LaidOutDocument, page: usize) -> Vec<f32> {
        doc.pages[page]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn single_page_without_cover() {
        let blocks = classify_document("Hello world", []);
        let doc = lay_out(&blocks, None, None, &config());
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(texts(&doc)[0], vec!["Hello world", "Page 1/1"]);
    }

    #[test]
    fn cover_page_then_body_with_header() {
        let cover = CoverPage {
            title: "Acme".into(),
            subtitle: Some("Product Spec".into()),
            details: vec!["Version 1.0".into()],
            taglines: vec!["Web + Mobile".into()],
        };
        let mut cfg = config();
        cfg.cover.subtitle = Some("Product Spec".into());
        let blocks = classify_document("Body text", []);
        let doc = lay_out(&blocks, Some(&cover), Some("Acme"), &cfg);

        assert_eq!(doc.pages.len(), 2);
        let t = texts(&doc);
        assert_eq!(
            t[0],
            vec!["Acme", "Product Spec", "Version 1.0", "Web + Mobile", "Page 1/2"]
        );
        assert_eq!(t[1], vec!["Acme - Product Spec", "Body text", "Page 2/2"]);
    }

    #[test]
    fn header_can_be_disabled() {
        let mut cfg = config();
        cfg.header = HeaderMode::Off;
        let cover = CoverPage {
            title: "T".into(),
            ..CoverPage::default()
        };
        let doc = lay_out(&classify_document("x", []), Some(&cover), Some("T"), &cfg);
        assert_eq!(texts(&doc)[1], vec!["x", "Page 2/2"]);
    }

    #[test]
    fn footer_can_be_disabled() {
        let mut cfg = config();
        cfg.show_footer = false;
        let doc = lay_out(&classify_document("x", []), None, None, &cfg);
        assert_eq!(texts(&doc)[0], vec!["x"]);
    }

    #[test]
    fn auto_page_break_keeps_content_above_margin() {
        let md = (0..120).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n");
        let cfg = config();
        let doc = lay_out(&classify_document(&md, []), None, None, &cfg);

        // 5 mm per paragraph line, 267 mm usable per page
        assert!(doc.pages.len() >= 3, "pages: {}", doc.pages.len());
        for page in 0..doc.pages.len() {
            let ys = baselines(&doc, page);
            let body = &ys[..ys.len() - 1]; // last is the footer
            assert!(body.iter().all(|&y| y < 297.0 - 20.0));
        }
        let all: Vec<&str> = texts(&doc).into_iter().flatten().collect();
        assert!(all.contains(&"Line 0"));
        assert!(all.contains(&"Line 119"));
        assert!(all.contains(&format!("Page 3/{}", doc.pages.len()).as_str()));
    }

    #[test]
    fn section_heading_near_bottom_starts_new_page() {
        // 44 paragraph lines → y ≈ 10 + 44·5 = 230 > 220
        let mut md = (0..44).map(|i| format!("p{i}")).collect::<Vec<_>>().join("\n");
        md.push_str("\n## Next Section\nbody");
        let doc = lay_out(&classify_document(&md, []), None, None, &config());
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.page_text(1)[0], "Next Section");
    }

    fn paragraphs_then(n: usize, tail: &str) -> String {
        let mut md = (0..n).map(|i| format!("p{i}")).collect::<Vec<_>>().join("\n");
        md.push('\n');
        md.push_str(tail);
        md
    }

    #[test]
    fn top_heading_breaks_below_height_minus_97() {
        // 40 lines → y = 210 > 297 − 97
        let doc = lay_out(
            &classify_document(&paragraphs_then(40, "# Part Two\nbody"), []),
            None,
            None,
            &config(),
        );
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.page_text(1)[0], "Part Two");

        // 37 lines → y = 195, still room
        let doc = lay_out(
            &classify_document(&paragraphs_then(37, "# Part Two\nbody"), []),
            None,
            None,
            &config(),
        );
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn subsection_heading_breaks_below_height_minus_57() {
        // 47 lines → y = 245 > 297 − 57
        let doc = lay_out(
            &classify_document(&paragraphs_then(47, "### Detail\nbody"), []),
            None,
            None,
            &config(),
        );
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.page_text(1)[0], "Detail");

        // 45 lines → y = 235
        let doc = lay_out(
            &classify_document(&paragraphs_then(45, "### Detail\nbody"), []),
            None,
            None,
            &config(),
        );
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn heading_threshold_follows_letter_height() {
        // 40 lines → y = 210: below 279.4 − 77 on Letter, above on A4
        let md = paragraphs_then(40, "## Next Section\nbody");
        let blocks = classify_document(&md, []);

        let a4 = lay_out(&blocks, None, None, &config());
        assert_eq!(a4.pages.len(), 1);

        let mut letter_cfg = config();
        letter_cfg.page_size = PageSize::Letter;
        let letter = lay_out(&blocks, None, None, &letter_cfg);
        assert_eq!(letter.pages.len(), 2);
        assert_eq!(letter.page_text(1)[0], "Next Section");
    }

    #[test]
    fn short_pages_keep_consecutive_headings_together() {
        let cfg = RenderConfig::builder()
            .page_size(PageSize::Custom {
                width_mm: 148.0,
                height_mm: 110.0,
            })
            .build()
            .unwrap();
        let doc = lay_out(&classify_document("# A\n# B\n# C", []), None, Some("T"), &cfg);
        assert_eq!(texts(&doc), vec![vec!["A", "B", "C", "Page 1/1"]]);
    }

    #[test]
    fn section_heading_draws_accent_rule() {
        let doc = lay_out(&classify_document("## Scope", []), None, None, &config());
        let rule = doc.pages[0].iter().find_map(|op| match op {
            DrawOp::Line { x1, x2, color, .. } => Some((*x1, *x2, *color)),
            _ => None,
        });
        assert_eq!(rule, Some((10.0, 200.0, Rgb(0, 51, 102))));
    }

    #[test]
    fn code_lines_are_truncated_and_counted() {
        let long = "y".repeat(150);
        let md = format!("```\n{long}\n```");
        let doc = lay_out(&classify_document(&md, []), None, None, &config());
        let line = doc.page_text(0)[0];
        assert_eq!(line.len(), 113);
        assert!(line.ends_with("..."));
        assert_eq!(doc.truncated_lines, 1);
    }

    #[test]
    fn replaced_chars_are_counted() {
        let doc = lay_out(&classify_document("check \u{2713} done", []), None, None, &config());
        assert_eq!(doc.page_text(0)[0], "check ? done");
        assert_eq!(doc.replaced_chars, 1);
    }

    #[test]
    fn list_items_are_styled() {
        let md = "- **bold** point\n- [x] finished\n1. first";
        let doc = lay_out(&classify_document(md, []), None, None, &config());
        assert_eq!(
            doc.page_text(0)[..3].to_vec(),
            vec!["  - bold point", "  [x] finished", "1. first"]
        );
    }

    #[test]
    fn paragraph_links_and_emphasis_removed() {
        let md = "Read **the** [guide](https://x.y) *now*";
        let doc = lay_out(&classify_document(md, []), None, None, &config());
        assert_eq!(doc.page_text(0)[0], "Read the guide now");
    }

    #[test]
    fn progress_reports_each_page() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct Counter(AtomicUsize);
        impl ConversionProgressCallback for Counter {
            fn on_page_complete(&self, _page: usize, _lines: usize) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let mut cfg = config();
        cfg.progress_callback = Some(counter.clone());
        let md = (0..120).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n");
        let doc = lay_out(&classify_document(&md, []), None, None, &cfg);
        assert_eq!(counter.0.load(Ordering::SeqCst), doc.pages.len());
    }
}
