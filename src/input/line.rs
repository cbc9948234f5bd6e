//! Raw terminal line decoding

use std::borrow::Cow;

use log::warn;

/// Turns one raw input line into text
///
/// The trailing `\n` or `\r\n` is dropped. Bytes that are not valid UTF-8
/// become U+FFFD so a stray byte never ends the session.
pub fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!("Input line was not valid UTF-8, invalid bytes replaced");
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Command, CommandError, parse};

    #[test]
    fn line_endings_are_stripped() {
        assert_eq!(decode_line(b":title ok\n"), ":title ok");
        assert_eq!(decode_line(b":show\r\n"), ":show");
        assert_eq!(decode_line(b":quit"), ":quit");
        assert_eq!(decode_line(b""), "");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let line = decode_line(b"\xff\xfe bad\n");
        assert_eq!(line, "\u{FFFD}\u{FFFD} bad");
        assert_eq!(parse(&line), Err(CommandError::NotACommand));
    }

    #[test]
    fn field_text_with_stray_bytes_still_updates() {
        let line = decode_line(b":title caf\xe9 news\n");
        assert_eq!(parse(&line), Ok(Command::Title("caf\u{FFFD} news".to_string())));
    }
}
