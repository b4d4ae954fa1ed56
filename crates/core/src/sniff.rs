//! Content type detection from leading bytes.

/// Fallback for content that matches no known signature.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Reported for empty or printable text content.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Number of leading bytes inspected.
const SNIFF_LEN: usize = 512;

/// Determine the MIME type of `data` by inspecting its leading bytes.
///
/// Image formats are recognised by their magic numbers. Anything else is
/// classified as PDF, plain text, or `application/octet-stream`.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(SNIFF_LEN)];

    if let Ok(format) = image::guess_format(head) {
        return format.to_mime_type();
    }

    if head.starts_with(b"%PDF-") {
        return "application/pdf";
    }

    if looks_like_text(head) {
        return TEXT_PLAIN;
    }

    OCTET_STREAM
}

fn looks_like_text(head: &[u8]) -> bool {
    // A multi-byte character may be cut at the sniff boundary.
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) if e.error_len().is_none() => {
            match std::str::from_utf8(&head[..e.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    !text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c' | '\x1b'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_png() {
        let data = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(sniff_content_type(data), "image/png");
    }

    #[test]
    fn detects_jpeg_and_gif() {
        assert_eq!(sniff_content_type(b"\xff\xd8\xff\xe0\0\x10JFIF"), "image/jpeg");
        assert_eq!(sniff_content_type(b"GIF89a\x01\0\x01\0"), "image/gif");
    }

    #[test]
    fn detects_pdf() {
        assert_eq!(sniff_content_type(b"%PDF-1.7\n"), "application/pdf");
    }

    #[test]
    fn empty_and_plain_text_are_text() {
        assert_eq!(sniff_content_type(b""), TEXT_PLAIN);
        assert_eq!(sniff_content_type(b"hello, world\n"), TEXT_PLAIN);
    }

    #[test]
    fn binary_falls_back_to_octet_stream() {
        assert_eq!(sniff_content_type(b"\x89PN"), OCTET_STREAM);
        assert_eq!(sniff_content_type(&[0u8, 1, 2, 3]), OCTET_STREAM);
    }

    #[test]
    fn truncated_utf8_at_boundary_is_still_text() {
        let mut data = "a".repeat(SNIFF_LEN - 1).into_bytes();
        data.extend_from_slice("é".as_bytes());
        assert_eq!(sniff_content_type(&data), TEXT_PLAIN);
    }
}
