use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use engine_logging::{engine_debug, engine_trace};
use ingest_core::ExtractedMetadata;

use crate::canonicalize::canonicalize;
use crate::classify::{Classification, Classifier};
use crate::config::ConversionConfig;
use crate::document::{HtmlParser, ParsedDocument, ScraperParser};
use crate::extract::{MetadataExtractor, SignalExtractor};
use crate::normalize::Normalizer;
use crate::types::{ConversionResult, EngineError, Stage};

/// The paste-ingestion pipeline: classify, parse, extract, normalize.
///
/// Holds no per-call state; one instance can serve any number of calls.
pub struct PasteConverter {
    config: ConversionConfig,
    classifier: Classifier,
    parser: Box<dyn HtmlParser>,
    extractor: Box<dyn MetadataExtractor>,
    normalizer: Normalizer,
}

impl PasteConverter {
    pub fn new(config: ConversionConfig) -> Self {
        let parser = Box::new(ScraperParser::new(config.limits.max_depth));
        let extractor = Box::new(SignalExtractor::new(config.excerpt.max_chars));
        Self::with_parts(config, parser, extractor)
    }

    /// Swaps in another parser or extractor. Classifier thresholds, limits and
    /// output policy still come from `config`.
    pub fn with_parts(
        config: ConversionConfig,
        parser: Box<dyn HtmlParser>,
        extractor: Box<dyn MetadataExtractor>,
    ) -> Self {
        Self {
            classifier: Classifier::new(config.classifier),
            normalizer: Normalizer::new(config.output),
            config,
            parser,
            extractor,
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn classify(&self, raw: &str) -> Classification {
        self.classifier.classify(raw)
    }

    pub fn should_auto_convert(&self, raw: &str) -> bool {
        self.classifier.should_auto_convert(raw)
    }

    /// Converts a paste. Never panics and never returns less than the raw
    /// input: every failure path falls back to `raw` for the content.
    pub fn convert(&self, raw: &str) -> ConversionResult {
        let max_bytes = self.config.limits.max_input_bytes;
        if raw.len() > max_bytes {
            let issue = EngineError::InputTooLarge {
                max_bytes,
                actual: raw.len(),
            };
            engine_debug!("Skipping conversion: {}", issue);
            return ConversionResult::unchanged(raw, issue);
        }

        let document = match self.parse(raw) {
            Ok(document) => document,
            Err(issue) => {
                engine_debug!("Parse stage failed, keeping raw input: {}", issue);
                return ConversionResult::unchanged(raw, issue);
            }
        };

        let mut issues = Vec::new();

        let metadata = match self.extract_metadata(&document) {
            Ok(metadata) => Some(metadata),
            Err(issue) => {
                engine_debug!("Extract stage failed: {}", issue);
                issues.push(issue);
                None
            }
        };

        let normalized_content = match self.normalize(&document) {
            Ok(content) => content,
            Err(issue) => {
                engine_debug!("Normalize stage failed, keeping raw input: {}", issue);
                issues.push(issue);
                raw.to_string()
            }
        };

        engine_trace!(
            "Converted {} input bytes into {} output bytes",
            raw.len(),
            normalized_content.len()
        );

        ConversionResult {
            normalized_content,
            metadata,
            issues,
        }
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedDocument, EngineError> {
        guarded(Stage::Parse, || self.parser.parse(raw))?
    }

    pub fn extract_metadata(
        &self,
        document: &ParsedDocument,
    ) -> Result<ExtractedMetadata, EngineError> {
        guarded(Stage::Extract, || self.extractor.extract(document))
    }

    /// Normalized and whitespace-canonical markup for `document`.
    pub fn normalize(&self, document: &ParsedDocument) -> Result<String, EngineError> {
        guarded(Stage::Normalize, || {
            canonicalize(&self.normalizer.normalize(document))
        })
    }
}

impl Default for PasteConverter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

/// Default-configured classifier check.
pub fn should_auto_convert(raw: &str) -> bool {
    Classifier::default().should_auto_convert(raw)
}

/// Default-configured conversion.
pub fn convert(raw: &str) -> ConversionResult {
    PasteConverter::default().convert(raw)
}

fn guarded<T>(stage: Stage, work: impl FnOnce() -> T) -> Result<T, EngineError> {
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| EngineError::Panicked {
        stage,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
