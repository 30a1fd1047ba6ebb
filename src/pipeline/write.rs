//! PDF serialisation: turn the display list into PDF bytes via printpdf.
//!
//! ## Why spawn_blocking?
//!
//! Building and compressing the PDF object graph is CPU-bound and printpdf's
//! document handle is not `Send`. [`write_pdf_async`] builds the whole
//! document inside `tokio::task::spawn_blocking` so the async executor never
//! stalls on a large report.
//!
//! Layout measures `y` downwards from the top edge; PDF user space grows
//! upwards from the bottom edge, so every `y` is flipped here.

use crate::config::Rgb;
use crate::error::Md2PdfError;
use crate::pipeline::layout::{DrawOp, LaidOutDocument};
use crate::pipeline::metrics::{FontFace, PT_TO_MM};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};
use tracing::debug;

const LAYER_NAME: &str = "Content";

/// Serialise `doc` on the blocking thread pool.
pub async fn write_pdf_async(doc: LaidOutDocument, title: String) -> Result<Vec<u8>, Md2PdfError> {
    tokio::task::spawn_blocking(move || write_pdf(&doc, &title))
        .await
        .map_err(|e| Md2PdfError::Internal(format!("PDF writer task panicked: {}", e)))?
}

/// Serialise `doc` into a complete PDF file.
pub fn write_pdf(doc: &LaidOutDocument, title: &str) -> Result<Vec<u8>, Md2PdfError> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(doc.width_mm), Mm(doc.height_mm), LAYER_NAME);
    let fonts = Fonts::load(&pdf)?;

    let mut first = Some((first_page, first_layer));
    for (idx, ops) in doc.pages.iter().enumerate() {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => pdf.add_page(Mm(doc.width_mm), Mm(doc.height_mm), LAYER_NAME),
        };
        let layer = pdf.get_page(page).get_layer(layer);
        for op in ops {
            draw(&layer, op, &fonts, doc.height_mm);
        }
        debug!("Wrote page {} ({} ops)", idx + 1, ops.len());
    }

    pdf.save_to_bytes().map_err(|e| Md2PdfError::PdfWriteFailed {
        detail: format!("{:?}", e),
    })
}

/// Built-in font handles registered once per document.
struct Fonts {
    helvetica: IndirectFontRef,
    helvetica_bold: IndirectFontRef,
    helvetica_oblique: IndirectFontRef,
    courier: IndirectFontRef,
}

impl Fonts {
    fn load(pdf: &PdfDocumentReference) -> Result<Self, Md2PdfError> {
        let add = |font: BuiltinFont| {
            pdf.add_builtin_font(font)
                .map_err(|e| Md2PdfError::PdfWriteFailed {
                    detail: format!("Could not register built-in font: {:?}", e),
                })
        };
        Ok(Self {
            helvetica: add(BuiltinFont::Helvetica)?,
            helvetica_bold: add(BuiltinFont::HelveticaBold)?,
            helvetica_oblique: add(BuiltinFont::HelveticaOblique)?,
            courier: add(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Helvetica => &self.helvetica,
            FontFace::HelveticaBold => &self.helvetica_bold,
            FontFace::HelveticaOblique => &self.helvetica_oblique,
            FontFace::Courier => &self.courier,
        }
    }
}

fn pdf_color(c: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, fonts: &Fonts, page_height: f32) {
    match op {
        DrawOp::Text {
            x,
            y,
            face,
            size_pt,
            color,
            text,
        } => {
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(
                text.as_str(),
                *size_pt,
                Mm(*x),
                Mm(page_height - *y),
                fonts.get(*face),
            );
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width_mm,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*width_mm / PT_TO_MM);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x1), Mm(page_height - *y1)), false),
                    (Point::new(Mm(*x2), Mm(page_height - *y2)), false),
                ],
                is_closed: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::pipeline::classify::classify_document;
    use crate::pipeline::layout::lay_out;

    #[test]
    fn writes_pdf_header() {
        let blocks = classify_document("## Title\n\nSome text\n\n---\n| a | b |", []);
        let doc = lay_out(&blocks, None, None, &RenderConfig::default());
        let bytes = write_pdf(&doc, "Test").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 200);
    }

    #[test]
    fn empty_display_list_still_writes() {
        let doc = LaidOutDocument {
            width_mm: 210.0,
            height_mm: 297.0,
            pages: vec![Vec::new()],
            ..LaidOutDocument::default()
        };
        let bytes = write_pdf(&doc, "Blank").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn async_writer_matches_sync_header() {
        let blocks = classify_document("hello", []);
        let doc = lay_out(&blocks, None, None, &RenderConfig::default());
        let bytes = write_pdf_async(doc, "Async".into()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn colour_conversion() {
        match pdf_color(Rgb(255, 0, 51)) {
            Color::Rgb(rgb) => {
                assert!((rgb.r - 1.0).abs() < 1e-6);
                assert!(rgb.g.abs() < 1e-6);
                assert!((rgb.b - 0.2).abs() < 1e-6);
            }
            other => panic!("unexpected colour {other:?}"),
        }
    }
}
