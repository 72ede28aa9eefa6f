use std::fmt;

use ingest_core::ExtractedMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Extract,
    Normalize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Extract => write!(f, "extract"),
            Stage::Normalize => write!(f, "normalize"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("input is {actual} bytes, above the {max_bytes} byte limit")]
    InputTooLarge { max_bytes: usize, actual: usize },
    #[error("markup nests deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
    #[error("input contains no markup")]
    NoMarkup,
    #[error("{stage} stage panicked: {message}")]
    Panicked { stage: Stage, message: String },
}

impl EngineError {
    /// Size or depth ceiling hit; the caller should tell the user rather than
    /// silently keep the raw paste.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            EngineError::InputTooLarge { .. } | EngineError::TooDeep { .. }
        )
    }
}

/// Outcome of one conversion call.
///
/// `normalized_content` always holds usable content: on any failure that
/// prevents normalization it is the raw input unchanged. `metadata` is `None`
/// when extraction failed or never ran. `issues` lists every degraded stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub normalized_content: String,
    pub metadata: Option<ExtractedMetadata>,
    pub issues: Vec<EngineError>,
}

impl ConversionResult {
    pub(crate) fn unchanged(raw: &str, issue: EngineError) -> Self {
        Self {
            normalized_content: raw.to_string(),
            metadata: None,
            issues: vec![issue],
        }
    }

    pub fn limit_exceeded(&self) -> Option<&EngineError> {
        self.issues.iter().find(|issue| issue.is_limit())
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
