//! Ingest engine: classification, metadata extraction and normalization of
//! pasted HTML.
mod canonicalize;
mod classify;
mod config;
mod convert;
mod decode;
mod document;
mod extract;
mod normalize;
mod types;

pub use canonicalize::canonicalize;
pub use classify::{Classification, Classifier};
pub use config::{
    ClassifierThresholds, ConversionConfig, ExcerptSettings, Limits, OutputPolicy,
    DEFAULT_EXCERPT_CHARS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MIN_LENGTH,
    DEFAULT_MIN_TAG_COUNT,
};
pub use convert::{convert, should_auto_convert, PasteConverter};
pub use decode::{decode_input, DecodedInput};
pub use document::{Element, HtmlParser, Node, ParsedDocument, ScraperParser};
pub use extract::{MetadataExtractor, SignalExtractor};
pub use ingest_core::ExtractedMetadata;
pub use normalize::{tag_policy, Normalizer, TagPolicy};
pub use types::{ConversionResult, EngineError, Stage};
