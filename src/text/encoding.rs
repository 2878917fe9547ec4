//! Declared input encodings.
//! The whole input file is decoded with a single encoding, strictly, before any parsing happens.

use crate::text::EncodingError;
use encoding_rs::Encoding;
use encoding_rs::UTF_8;

/// Byte order mark written by some editors in front of UTF-8 text
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Resolves an encoding label to an encoding.
///
/// Accepts WHATWG labels such as `utf-8`, `latin1` or `windows-1252`, and
/// numeric Windows code pages such as `1252` or `65001`.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, EncodingError> {
    let label = label.trim();
    let encoding = match label.parse::<u16>() {
        Ok(code_page) => codepage::to_encoding(code_page),
        Err(_) => Encoding::for_label(label.as_bytes()),
    };
    encoding.ok_or_else(|| EncodingError::UnknownEncoding(label.to_owned()))
}

/// Decodes `bytes` with `encoding`, failing on the first malformed sequence
/// instead of substituting replacement characters.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String, EncodingError> {
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(EncodingError::Malformed(encoding.name()))
}
