//! Pre-processing: deterministic normalisation of the Markdown source.
//!
//! The classifier works on prefixes of trimmed lines and on the two-space
//! indentation of raw lines, so the text must be normalised first:
//!
//! 1. Normalise line endings (CRLF / lone CR → LF)
//! 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, …)
//! 3. Expand tabs to four spaces
//!
//! Line endings go first so that a stray `\r` never survives into a line
//! that the later rules (and the classifier) inspect.

/// Apply all pre-processing rules to the raw Markdown text.
pub fn normalise(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    expand_tabs(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 3: Expand tabs ─────────────────────────────────────────────────────

fn expand_tabs(input: &str) -> String {
    input.replace('\t', "    ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "\u{FEFF}hello\u{200B}world\u{00AD}!";
        assert_eq!(remove_invisible_chars(input), "helloworld!");
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tcode"), "    code");
    }

    #[test]
    fn test_normalise_full_pipeline() {
        let input = "\u{FEFF}# Title\r\n\r\n\tindented\r";
        assert_eq!(normalise(input), "# Title\n\n    indented\n");
    }
}
