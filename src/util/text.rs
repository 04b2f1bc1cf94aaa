use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated text
const ELLIPSIS: &str = "...";
/// Display width of the ellipsis (3 columns for ASCII "...")
const ELLIPSIS_WIDTH: usize = 3;

/// Reformats an API timestamp for the article list.
///
/// The date/time separator `T` becomes a tab and the `Z` suffix is dropped.
/// This is a textual substitution only: there is no calendar parsing and no
/// timezone conversion, and input of any other shape passes through with
/// the same substitutions applied.
///
/// # Examples
///
/// ```
/// use artfeed::util::format_date;
///
/// assert_eq!(format_date("2018-05-09T16:49:09Z"), "2018-05-09\t16:49:09");
/// assert_eq!(format_date("yesterday"), "yesterday");
/// ```
pub fn format_date(raw: &str) -> String {
    raw.replace('T', "\t").replace('Z', "")
}

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Appends "..." when text is cut, unless `max_width` is too narrow to hold
/// anything besides the ellipsis, in which case as many characters as fit are
/// returned bare. Widths are Unicode-aware (CJK and emoji count as two
/// columns). Returns `Cow::Borrowed` when no truncation is needed.
///
/// ```
/// use artfeed::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width > ELLIPSIS_WIDTH {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    } else {
        (max_width, "")
    };

    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > budget {
            break;
        }
        width += char_width;
        end = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..end], suffix))
}

/// Strip terminal control characters and ANSI escape sequences from text.
///
/// Titles and contributor names come straight from the remote API and are
/// written to the terminal, so anything that could drive the terminal is
/// removed:
/// - C0 controls other than tab, newline and carriage return, plus DEL
/// - CSI sequences (`ESC [` ... final byte 0x40-0x7E)
/// - OSC sequences (`ESC ]` ... BEL or `ESC \`)
/// - a bare ESC
///
/// Returns `Cow::Borrowed` when nothing needs stripping.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_unsafe_char) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            c if is_unsafe_char(c) => {}
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

fn is_unsafe_char(c: char) -> bool {
    c == '\x1b' || c == '\x7f' || (c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_date_canonical() {
        assert_eq!(format_date("2018-05-09T16:49:09Z"), "2018-05-09\t16:49:09");
    }

    #[test]
    fn test_format_date_without_suffix() {
        assert_eq!(format_date("2018-05-09T16:49:09"), "2018-05-09\t16:49:09");
    }

    #[test]
    fn test_format_date_passes_through_other_shapes() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("9 May 2018"), "9 May 2018");
        // Fractional seconds and offsets are not interpreted
        assert_eq!(
            format_date("2018-05-09T16:49:09.123+01:00"),
            "2018-05-09\t16:49:09.123+01:00"
        );
    }

    proptest! {
        #[test]
        fn format_date_removes_markers(raw in "\\PC*") {
            let formatted = format_date(&raw);
            prop_assert!(!formatted.contains('T'));
            prop_assert!(!formatted.contains('Z'));
        }

        #[test]
        fn format_date_is_identity_without_markers(raw in "[0-9: -]*") {
            prop_assert_eq!(format_date(&raw), raw);
        }
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("12345", 5), "12345");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_wide_char_truncation() {
        // Each CJK character is two columns wide
        let cjk = "\u{4f60}\u{597d}\u{4e16}\u{754c}";
        assert_eq!(truncate_to_width(cjk, 7), "\u{4f60}\u{597d}...");
        assert_eq!(truncate_to_width(cjk, 5), "\u{4f60}...");
        assert_eq!(truncate_to_width(cjk, 3), "\u{4f60}");
        assert_eq!(truncate_to_width(cjk, 1), "");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        assert_eq!(truncate_to_width("Hi", 3), "Hi");
    }

    #[test]
    fn test_untruncated_is_borrowed() {
        assert!(matches!(truncate_to_width("fits", 10), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_clean_text_returns_borrowed() {
        let input = "Frieze week:\tthe best shows\r\n";
        let result = strip_control_chars(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_removes_controls() {
        assert_eq!(strip_control_chars("he\x00ll\x07o\x08 w\x0bor\x0cld\x7f!"), "hello world!");
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mRed text\x1b[0m"), "Red text");
        assert_eq!(strip_control_chars("before\x1b[2Aafter"), "beforeafter");
        assert_eq!(strip_control_chars("before\x1bafter"), "beforeafter");
    }

    #[test]
    fn test_strip_osc_sequences() {
        assert_eq!(
            strip_control_chars("\x1b]0;malicious title\x07safe text"),
            "safe text"
        );
        assert_eq!(
            strip_control_chars("\x1b]0;malicious title\x1b\\safe text"),
            "safe text"
        );
    }

    #[test]
    fn test_strip_unicode_preserved() {
        let input = "Caf\u{e9} \x1b[1m\u{65e5}\u{672c}\x1b[0m";
        assert_eq!(strip_control_chars(input), "Caf\u{e9} \u{65e5}\u{672c}");
    }
}
