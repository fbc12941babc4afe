//! Plain-text detection.

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Whether `buf` looks like a plain-text file.
///
/// The buffer must be non-empty UTF-8 (an optional byte-order mark is
/// skipped) without control characters other than tab, line feed, carriage
/// return and form feed.
#[must_use]
pub fn is_valid_txt(buf: &[u8]) -> bool {
    let body = buf.strip_prefix(UTF8_BOM).unwrap_or(buf);
    if body.is_empty() {
        return false;
    }
    let Ok(text) = std::str::from_utf8(body) else {
        tracing::trace!("buffer is not valid UTF-8");
        return false;
    };
    !text.chars().any(is_disallowed_control)
}

fn is_disallowed_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert!(is_valid_txt(b"hello\r\nworld\tand\x0cmore\n"));
        assert!(is_valid_txt("caf\u{e9}".as_bytes()));
        assert!(is_valid_txt(b"\xef\xbb\xbfwith bom"));
    }

    #[test]
    fn test_not_text() {
        assert!(!is_valid_txt(b""));
        assert!(!is_valid_txt(UTF8_BOM));
        assert!(!is_valid_txt(b"\x89PNG\r\n\x1a\n"));
        assert!(!is_valid_txt(b"nul\x00byte"));
        assert!(!is_valid_txt(b"\xff\xfe"));
    }
}
