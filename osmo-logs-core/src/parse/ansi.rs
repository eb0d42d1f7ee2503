use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Remove ANSI escape sequences from `input`.
///
/// Handles CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// and plain two-character escapes. Lines without an ESC are returned borrowed.
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    if !input.contains(ESC) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('[') => {
                // parameter and intermediate bytes, then one final byte in @..~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == BEL {
                        break;
                    }
                    if c == ESC && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            // two-character escape, or a dangling ESC at end of line
            Some(_) | None => {}
        }
    }

    Cow::Owned(out)
}
