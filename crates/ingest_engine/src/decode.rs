use std::sync::LazyLock;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use regex::bytes::Regex;

const PRESCAN_BYTES: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("Failed to compile meta charset regex - this is a bug")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInput {
    pub text: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode a saved page into text using: BOM -> `<meta charset>` in the first
/// 1024 bytes -> chardetng fallback. Never fails; malformed input is decoded
/// lossily and flagged.
pub fn decode_input(bytes: &[u8]) -> DecodedInput {
    // encoding_rs sniffs and strips the BOM itself
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = declared_charset(bytes) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding)
}

fn declared_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(PRESCAN_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?.as_bytes();
    let encoding = Encoding::for_label(label)?;
    // A UTF-16 declaration inside an ASCII-compatible prefix is a lie.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Some(UTF_8);
    }
    Some(encoding)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedInput {
    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedInput {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
