//! Escape-sequence expansion (§4.6) for string and character literals.
//! Grounded on `original_source/semantic/semantic_analyzer.hpp`'s
//! `expand_literal`, completing the `\0` and `\xHH…` cases it leaves marked
//! `TODO` there.

use cc0_util::diagnostic::E_SEM_UNKNOWN_ESCAPE;
use cc0_util::{Diagnostic, Handler, Phase, Span};

/// Expands `raw` (the text between the quotes, escapes not yet interpreted)
/// into its byte sequence. `span` anchors diagnostics at the literal's own
/// source position; the column of the offending escape is added on top.
pub(crate) fn expand(handler: &Handler, raw: &str, span: Span) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let escape_start = i;
        i += 1;
        let marker = match bytes.get(i) {
            Some(&b) => b,
            None => die(handler, span, escape_start, "unterminated escape sequence"),
        };
        match marker {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'0' => out.push(0x00),
            b'\\' => out.push(b'\\'),
            b'\'' => out.push(b'\''),
            b'"' => out.push(b'"'),
            b'x' => {
                i += 1;
                let hex_start = i;
                while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
                    i += 1;
                }
                if i == hex_start {
                    die(handler, span, escape_start, "\\x used with no following hex digits");
                }
                let hex = std::str::from_utf8(&bytes[hex_start..i]).unwrap();
                out.push(u32::from_str_radix(hex, 16).unwrap() as u8);
                continue;
            }
            other => die(
                handler,
                span,
                escape_start,
                format!("unknown escape sequence '\\{}'", other as char),
            ),
        }
        i += 1;
    }
    out
}

fn die(handler: &Handler, base: Span, column_offset: usize, message: impl Into<String>) -> ! {
    let span = Span::new(base.line, base.column + column_offset as u32);
    handler.die(Diagnostic::new(Phase::Semantic, E_SEM_UNKNOWN_ESCAPE, message, span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc0_util::Span;

    fn handler() -> Handler {
        Handler::new("t.c", "")
    }

    #[test]
    fn plain_text_passes_through_unchanged() {
        let h = handler();
        assert_eq!(expand(&h, "hello", Span::new(0, 0)), b"hello");
    }

    #[test]
    fn recognized_escapes_expand_to_their_byte() {
        let h = handler();
        assert_eq!(expand(&h, "\\n", Span::new(0, 0)), vec![b'\n']);
        assert_eq!(expand(&h, "\\t", Span::new(0, 0)), vec![b'\t']);
        assert_eq!(expand(&h, "\\0", Span::new(0, 0)), vec![0u8]);
        assert_eq!(expand(&h, "\\\\", Span::new(0, 0)), vec![b'\\']);
        assert_eq!(expand(&h, "\\\"", Span::new(0, 0)), vec![b'"']);
    }

    #[test]
    fn hex_escape_greedily_consumes_hex_digits() {
        let h = handler();
        assert_eq!(expand(&h, "\\x41", Span::new(0, 0)), vec![0x41]);
        assert_eq!(expand(&h, "\\x7f", Span::new(0, 0)), vec![0x7f]);
    }

    #[test]
    fn a_mix_of_plain_bytes_and_escapes_expands_in_order() {
        let h = handler();
        assert_eq!(expand(&h, "a\\nb", Span::new(0, 0)), vec![b'a', b'\n', b'b']);
    }
}
