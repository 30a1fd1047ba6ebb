//! Glyph metrics for the standard-14 fonts used by the report.
//!
//! printpdf places built-in font text without measuring it, so centring and
//! word wrapping need the Adobe AFM advance widths. Only printable ASCII is
//! tabulated; other latin-1 characters fall back to an average width, which
//! is close enough for wrapping decisions.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Font faces the layout stage can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

/// Width used for characters outside the tables.
const FALLBACK_WIDTH: u16 = 556;

/// Courier is monospaced.
const COURIER_WIDTH: u16 = 600;

/// Helvetica advance widths for U+0020..=U+007E (1/1000 em).
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // 0..9
    278, 278, 584, 584, 584, 556, 1015,                                             // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // N..Z
    278, 278, 278, 469, 556, 333,                                                   // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // n..z
    334, 260, 334, 584,                                                             // {..~
];

/// Helvetica-Bold advance widths for U+0020..=U+007E (1/1000 em).
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn char_width(face: FontFace, c: char) -> u16 {
    let table = match face {
        FontFace::Courier => return COURIER_WIDTH,
        FontFace::Helvetica | FontFace::HelveticaOblique => &HELVETICA,
        FontFace::HelveticaBold => &HELVETICA_BOLD,
    };
    let cp = c as u32;
    if (0x20..=0x7E).contains(&cp) {
        table[(cp - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width of `text` in millimetres.
pub fn string_width(face: FontFace, size_pt: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(face, c) as u32).sum();
    units as f32 * size_pt / 1000.0 * PT_TO_MM
}

/// Greedy word wrap of `text` into lines no wider than `width_mm`.
///
/// Spaces inside a line are kept as written (so leading indentation
/// survives); the space at a break is dropped. A word wider than a whole
/// line is split between characters. `\n` always starts a new line.
pub fn wrap(face: FontFace, size_pt: f32, width_mm: f32, text: &str) -> Vec<String> {
    let space = string_width(face, size_pt, " ");
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current: Option<String> = None;
        for word in paragraph.split(' ') {
            let fits = match &current {
                Some(line) => {
                    string_width(face, size_pt, line) + space + string_width(face, size_pt, word)
                        <= width_mm
                }
                None => false,
            };
            if fits {
                if let Some(line) = current.as_mut() {
                    line.push(' ');
                    line.push_str(word);
                }
                continue;
            }
            if let Some(line) = current.take() {
                lines.push(line);
            }
            current = Some(split_long_word(face, size_pt, width_mm, word, &mut lines));
        }
        lines.push(current.unwrap_or_default());
    }

    lines
}

/// Push full-width chunks of an over-long word and return the remainder.
fn split_long_word(
    face: FontFace,
    size_pt: f32,
    width_mm: f32,
    word: &str,
    lines: &mut Vec<String>,
) -> String {
    if string_width(face, size_pt, word) <= width_mm {
        return word.to_string();
    }
    let mut chunk = String::new();
    for c in word.chars() {
        let w = string_width(face, size_pt, &chunk) + char_width(face, c) as f32 * size_pt
            / 1000.0
            * PT_TO_MM;
        if w > width_mm && !chunk.is_empty() {
            lines.push(std::mem::take(&mut chunk));
        }
        chunk.push(c);
    }
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        assert_eq!(char_width(FontFace::Helvetica, ' '), 278);
        assert_eq!(char_width(FontFace::Helvetica, 'W'), 944);
        assert_eq!(char_width(FontFace::Helvetica, 'i'), 222);
        assert_eq!(char_width(FontFace::HelveticaBold, 'i'), 278);
        assert_eq!(char_width(FontFace::HelveticaOblique, 'm'), 833);
        assert_eq!(char_width(FontFace::Courier, 'W'), 600);
        assert_eq!(char_width(FontFace::Helvetica, 'é'), FALLBACK_WIDTH);
    }

    #[test]
    fn test_courier_width() {
        // 10 chars × 600/1000 × 10 pt = 60 pt
        let w = string_width(FontFace::Courier, 10.0, "abcdefghij");
        assert!((w - 60.0 * PT_TO_MM).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "The quick brown fox jumps over the lazy dog and keeps on running far away";
        let lines = wrap(FontFace::Helvetica, 9.0, 40.0, text);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(string_width(FontFace::Helvetica, 9.0, line) <= 40.0, "{line:?}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap(FontFace::Helvetica, 8.0, 188.0, "  - item"), vec!["  - item"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let word = "x".repeat(200);
        let lines = wrap(FontFace::Courier, 10.0, 50.0, &word);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(string_width(FontFace::Courier, 10.0, line) <= 50.0);
        }
    }

    #[test]
    fn test_wrap_newlines() {
        assert_eq!(wrap(FontFace::Helvetica, 9.0, 100.0, "a\nb"), vec!["a", "b"]);
        assert_eq!(wrap(FontFace::Helvetica, 9.0, 100.0, ""), vec![""]);
    }
}
