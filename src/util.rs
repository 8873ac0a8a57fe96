//! Input text decoding.

use std::borrow::Cow;

/// Decode bytes of a pasted or saved text file.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (an encoding label such as
///    `utf-16le` or `iso-8859-6`)
/// 3. Falls back to Windows-1256, the legacy Arabic code page most older
///    research files were saved in
///
/// # Examples
///
/// ```
/// use tansiq::util::decode_text;
///
/// assert_eq!(decode_text("مقدمة".as_bytes(), None), "مقدمة");
/// // "مقدمة" in Windows-1256
/// assert_eq!(decode_text(&[0xE3, 0xDE, 0xCF, 0xE3, 0xC9], None), "مقدمة");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1256.decode(bytes);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("نص".as_bytes());
        assert_eq!(decode_text(&bytes, None), "نص");
    }

    #[test]
    fn test_windows_1256_fallback() {
        // "بحث" in Windows-1256
        assert_eq!(decode_text(&[0xC8, 0xCD, 0xCB], None), "بحث");
    }

    #[test]
    fn test_hint_wins_over_fallback() {
        // "بحث" in ISO-8859-6
        let bytes = [0xC8, 0xCD, 0xCB];
        assert_eq!(decode_text(&bytes, Some("iso-8859-6")), "بحث");
    }
}
