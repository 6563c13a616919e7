//! Decoding of escaped reserved characters in localparts.
//!
//! A localpart may carry characters that are not allowed there in raw form,
//! written as a backslash followed by the two-digit lowercase hex code of the
//! character (`\20` for a space, `\40` for `@`, and so on).

use std::borrow::Cow;

/// Characters that may appear escaped in a localpart.
pub const RESERVED_CHARS: [char; 10] = [' ', '"', '&', '\'', '/', ':', '<', '>', '@', '\\'];

/// Maps the two hex digits following a backslash to the reserved character
/// they encode. Only lowercase codes are recognized.
fn decode(hex: &str) -> Option<char> {
    let c = match hex {
        "20" => ' ',
        "22" => '"',
        "26" => '&',
        "27" => '\'',
        "2f" => '/',
        "3a" => ':',
        "3c" => '<',
        "3e" => '>',
        "40" => '@',
        "5c" => '\\',
        _ => return None,
    };
    Some(c)
}

/// Replaces every escape sequence for a reserved character with the
/// character itself.
///
/// Input without a backslash is returned borrowed. Backslashes that do not
/// start a known sequence are kept as they are.
pub fn unescape_local(local: &str) -> Cow<'_, str> {
    if !local.contains('\\') {
        return Cow::Borrowed(local);
    }

    let mut out = String::with_capacity(local.len());
    let mut rest = local;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.get(1..3).and_then(decode) {
            Some(c) => {
                out.push(c);
                rest = &tail[3..];
            }
            None => {
                out.push('\\');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
