//! Upload validation for the text file store.
//!
//! Layers, in order:
//! 1. Non-empty content
//! 2. Size limit
//! 3. Magic byte detection, only for content that is not clean UTF-8 text
//! 4. Claimed media type must be `text/plain`
//! 5. Content must be valid UTF-8

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::defaults;
use crate::error::{Error, Result};

/// Claimed media types accepted in addition to `text/plain`.
///
/// Browsers and curl send `application/octet-stream` for `.txt` files with
/// no registered type; the bytes are still checked below.
static TOLERATED_MEDIA_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [defaults::TEXT_MEDIA_TYPE, "application/octet-stream"]
        .into_iter()
        .collect()
});

/// Strip parameters (`; charset=...`) and lower-case a media type.
pub fn base_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether a claimed media type is acceptable for upload.
pub fn is_permitted_media_type(content_type: &str) -> bool {
    TOLERATED_MEDIA_TYPES.contains(base_media_type(content_type).as_str())
}

/// Validate an uploaded text file.
///
/// `content_type` is the media type claimed by the client, if any.
pub fn validate_text_upload(
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
    max_size_bytes: usize,
) -> Result<()> {
    if data.is_empty() {
        return Err(Error::InvalidInput("Cannot store empty file".to_string()));
    }

    if data.len() > max_size_bytes {
        return Err(Error::InvalidInput(format!(
            "File exceeds maximum size of {} bytes",
            max_size_bytes
        )));
    }

    let utf8 = std::str::from_utf8(data).is_ok();

    // Short signatures such as `BM` and `MZ` also open ordinary prose.
    if !utf8 || data.contains(&0) {
        if let Some(kind) = infer::get(data) {
            if kind.matcher_type() != infer::MatcherType::Text {
                return Err(Error::InvalidInput(format!(
                    "Binary content detected ({}); only plain text files are accepted",
                    kind.mime_type()
                )));
            }
        }
    }

    if let Some(claimed) = content_type {
        if !is_permitted_media_type(claimed) {
            return Err(Error::InvalidInput(format!(
                "Unsupported media type '{}' for '{}'; expected {}",
                claimed,
                filename,
                defaults::TEXT_MEDIA_TYPE
            )));
        }
    }

    if !utf8 {
        return Err(Error::InvalidInput(
            "File content is not valid UTF-8 text".to_string(),
        ));
    }

    Ok(())
}

/// Reduce a client-supplied file name to a safe display name.
///
/// Drops directory components and control characters; empty results fall
/// back to [`defaults::UNNAMED_FILE`].
pub fn sanitize_filename(name: Option<&str>) -> String {
    let raw = name.unwrap_or_default();
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        defaults::UNNAMED_FILE.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 1024;

    #[test]
    fn test_plain_text_is_accepted() {
        assert!(validate_text_upload("a.txt", Some("text/plain"), b"hello", MAX).is_ok());
        assert!(validate_text_upload("a.txt", None, b"hello", MAX).is_ok());
        assert!(
            validate_text_upload("a.txt", Some("text/plain; charset=UTF-8"), b"hi", MAX).is_ok()
        );
    }

    #[test]
    fn test_empty_upload_is_rejected_regardless_of_name() {
        for name in ["a.txt", "", "weird name"] {
            let err = validate_text_upload(name, Some("text/plain"), b"", MAX).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(ref m) if m == "Cannot store empty file"));
        }
    }

    #[test]
    fn test_oversized_upload_is_rejected() {
        let data = vec![b'a'; MAX + 1];
        let err = validate_text_upload("a.txt", None, &data, MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_binary_magic_is_rejected() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let err = validate_text_upload("a.txt", Some("text/plain"), &png, MAX).unwrap_err();
        assert!(err.to_string().contains("image/png"));
    }

    #[test]
    fn test_text_starting_with_short_signature_is_accepted() {
        for text in [
            &b"BMW and Audi are car makers.\n"[..],
            b"BMI is a ratio of weight to height.",
            b"MZ is a postal abbreviation.",
        ] {
            assert!(validate_text_upload("a.txt", Some("text/plain"), text, MAX).is_ok());
        }
    }

    #[test]
    fn test_binary_magic_with_nul_bytes_is_rejected() {
        let exe = [b'M', b'Z', 0x90, 0, 3, 0, 0, 0];
        let err = validate_text_upload("a.txt", None, &exe, MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_wrong_media_type_is_rejected() {
        let err =
            validate_text_upload("a.json", Some("application/json"), b"{}", MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_octet_stream_is_tolerated_for_text() {
        assert!(
            validate_text_upload("a.txt", Some("application/octet-stream"), b"hi", MAX).is_ok()
        );
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = validate_text_upload("a.txt", None, &[0x66, 0xFF, 0xFE, 0x67], MAX).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_base_media_type() {
        assert_eq!(base_media_type("Text/Plain; charset=utf-8"), "text/plain");
        assert_eq!(base_media_type(""), "");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename(Some("notes.txt")), "notes.txt");
        assert_eq!(sanitize_filename(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_filename(Some("C:\\docs\\essay.txt")), "essay.txt");
        assert_eq!(sanitize_filename(Some("a\u{0}b.txt")), "ab.txt");
        assert_eq!(sanitize_filename(Some("  ")), defaults::UNNAMED_FILE);
        assert_eq!(sanitize_filename(Some("dir/")), defaults::UNNAMED_FILE);
        assert_eq!(sanitize_filename(None), defaults::UNNAMED_FILE);
    }
}
