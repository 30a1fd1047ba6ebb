//! Inline text clean-up applied to every string before it is laid out.
//!
//! The standard-14 PDF fonts only cover latin-1, so typographic Unicode is
//! folded to ASCII look-alikes and anything left outside latin-1 becomes
//! `?`. Inline Markdown markers are removed rather than rendered: the report
//! style has no inline bold or italics.

use once_cell::sync::Lazy;
use regex::Regex;

/// Typographic characters with a readable ASCII replacement.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2013}', "-"),
    ('\u{2014}', "--"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2022}', "-"),
    ('\u{2026}', "..."),
    ('\u{2192}', "->"),
    ('\u{2264}', "<="),
    ('\u{2265}', ">="),
    ('\u{00D7}', "x"),
];

/// Fold `input` into the latin-1 repertoire.
///
/// Returns the cleaned string and the number of characters that had no
/// replacement and were turned into `?`.
pub fn safe_text(input: &str) -> (String, usize) {
    let mut out = String::with_capacity(input.len());
    let mut replaced = 0;
    for c in input.chars() {
        if let Some((_, rep)) = REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            out.push_str(rep);
        } else if is_latin1_printable(c) {
            out.push(c);
        } else {
            out.push('?');
            replaced += 1;
        }
    }
    (out, replaced)
}

fn is_latin1_printable(c: char) -> bool {
    let cp = c as u32;
    cp <= 0xFF && !(0x80..=0x9F).contains(&cp)
}

/// Remove `**` bold markers.
pub fn strip_bold(input: &str) -> String {
    input.replace("**", "")
}

/// Remove `**` and `*` emphasis markers.
pub fn strip_emphasis(input: &str) -> String {
    input.replace("**", "").replace('*', "")
}

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

/// Rewrite `[label](target)` to `label`.
pub fn strip_links(input: &str) -> String {
    RE_LINK.replace_all(input, "$1").into_owned()
}

/// Cut `input` to `limit` characters followed by `...`.
///
/// Returns the (possibly) shortened text and whether it was cut.
pub fn truncate(input: &str, limit: usize) -> (String, bool) {
    match input.char_indices().nth(limit) {
        Some((byte_idx, _)) => (format!("{}...", &input[..byte_idx]), true),
        None => (input.to_string(), false),
    }
}
