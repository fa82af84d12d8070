//! Character encoding detection and transcoding.
//!
//! Fetched job pages are not always UTF-8. The charset is taken from a byte
//! order mark or from the HTML meta declarations, and the bytes are decoded
//! to UTF-8 before any extraction tier runs.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use tracing::debug;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Number of leading bytes inspected for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Detect character encoding from HTML bytes.
///
/// Looks, in order, for a byte order mark, a `http-equiv` Content-Type
/// declaration and a `<meta charset>` declaration within the first
/// kilobyte. Defaults to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*CONTENT_TYPE_CHARSET_RE, &*CHARSET_META_RE]
        .into_iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than rejected.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, used, had_errors) = encoding.decode(html);
    debug!(encoding = used.name(), had_errors, "transcoded page to UTF-8");
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_16LE, WINDOWS_1252};

    #[test]
    fn detect_utf8_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn detect_latin1_label_maps_to_windows_1252() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head></html>"#;
        assert_eq!(detect_encoding(html), WINDOWS_1252);
    }

    #[test]
    fn detect_from_http_equiv() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=Shift_JIS">"#;
        assert_eq!(detect_encoding(html), SHIFT_JIS);
    }

    #[test]
    fn detect_from_bom() {
        let html = [0xFF, 0xFE, b'<', 0x00];
        assert_eq!(detect_encoding(&html), UTF_16LE);
    }

    #[test]
    fn default_is_utf8() {
        assert_eq!(detect_encoding(b"<p>no declaration</p>"), UTF_8);
        assert_eq!(detect_encoding(b""), UTF_8);
    }

    #[test]
    fn transcode_windows_1252() {
        let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9 &amp; Cr\xE8me</p>";
        let decoded = transcode_to_utf8(html);
        assert!(decoded.contains("Café"));
        assert!(decoded.contains("Crème"));
    }

    #[test]
    fn transcode_invalid_utf8_is_lossy() {
        let decoded = transcode_to_utf8(b"<p>ok \xFF end</p>");
        assert!(decoded.contains('\u{FFFD}'));
        assert!(decoded.contains("end"));
    }
}
