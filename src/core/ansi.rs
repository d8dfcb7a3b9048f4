//! Helpers for text that may carry ANSI escape sequences

use std::borrow::Cow;

const ESC: char = '\x1b';

/// Remove ANSI escape sequences (CSI and two-byte escapes) from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains(ESC) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESC {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // parameters and intermediates until the final byte in @..~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(_) => {
                chars.next();
            }
            None => {}
        }
    }
    Cow::Owned(out)
}

/// Number of characters a terminal displays for `text`
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// Insert `width` spaces after every newline of `text`.
///
/// The first line is left as is.
pub fn indent(text: &str, width: usize) -> String {
    if width == 0 || !text.contains('\n') {
        return text.to_string();
    }
    let padding = format!("\n{}", " ".repeat(width));
    text.replace('\n', &padding)
}
