use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_LENGTH: usize = 500;
pub const DEFAULT_MIN_TAG_COUNT: usize = 10;
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_MAX_DEPTH: usize = 512;
pub const DEFAULT_EXCERPT_CHARS: usize = 150;

/// Knobs for one [`crate::PasteConverter`]. Every section falls back to its
/// defaults when missing from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub classifier: ClassifierThresholds,
    pub limits: Limits,
    pub output: OutputPolicy,
    pub excerpt: ExcerptSettings,
}

/// Size thresholds for the "large structured fragment" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Input must be longer than this many characters.
    pub min_length: usize,
    /// Input must contain more than this many tag-shaped substrings.
    pub min_tag_count: usize,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            min_tag_count: DEFAULT_MIN_TAG_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_input_bytes: usize,
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// How text and URL attributes are re-emitted.
///
/// With both flags off the normalizer writes text and `href`/`src` values
/// back exactly as parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPolicy {
    pub escape_text: bool,
    pub sanitize_urls: bool,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self {
            escape_text: true,
            sanitize_urls: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptSettings {
    pub max_chars: usize,
}

impl Default for ExcerptSettings {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}
