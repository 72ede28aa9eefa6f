use engine_logging::{engine_info, engine_warn};
use ingest_core::{merge, EditorFields, ExtractedMetadata, FieldUpdate};
use ingest_engine::{Classification, PasteConverter};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub looks_like_html: bool,
    pub is_full_document: bool,
    pub has_meta_signals: bool,
    pub has_block_containers: bool,
    pub has_semantic_landmarks: bool,
    pub is_large: bool,
    pub tag_count: usize,
}

impl From<Classification> for Signals {
    fn from(c: Classification) -> Self {
        Self {
            looks_like_html: c.looks_like_html,
            is_full_document: c.is_full_document,
            has_meta_signals: c.has_meta_signals,
            has_block_containers: c.has_block_containers,
            has_semantic_landmarks: c.has_semantic_landmarks,
            is_large: c.is_large,
            tag_count: c.tag_count,
        }
    }
}

/// What the app prints for one paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub auto_convert: bool,
    pub converted: bool,
    pub signals: Signals,
    pub normalized_content: String,
    pub metadata: Option<ExtractedMetadata>,
    pub issues: Vec<String>,
    pub limit_exceeded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<EditorFields>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updated_fields: Vec<FieldUpdate>,
}

/// Classifies `raw`, converts it when it qualifies (or `force` is set) and
/// merges the extracted metadata into `fields` when given.
pub fn build_report(
    converter: &PasteConverter,
    raw: &str,
    force: bool,
    fields: Option<EditorFields>,
) -> Report {
    let classification = converter.classify(raw);
    let auto_convert = classification.should_auto_convert();
    engine_info!(
        "Paste classified: auto_convert={} tags={} full_document={}",
        auto_convert,
        classification.tag_count,
        classification.is_full_document
    );

    if !auto_convert && !force {
        return Report {
            auto_convert,
            converted: false,
            signals: classification.into(),
            normalized_content: raw.to_string(),
            metadata: None,
            issues: Vec::new(),
            limit_exceeded: None,
            fields,
            updated_fields: Vec::new(),
        };
    }

    let result = converter.convert(raw);
    for issue in &result.issues {
        engine_warn!("Conversion degraded: {}", issue);
    }
    let limit_exceeded = result.limit_exceeded().map(ToString::to_string);

    let (fields, updated_fields) = match (fields, result.metadata.as_ref()) {
        (Some(current), Some(metadata)) => {
            let (merged, updates) = merge(current, metadata);
            (Some(merged), updates)
        }
        (current, _) => (current, Vec::new()),
    };

    Report {
        auto_convert,
        converted: true,
        signals: classification.into(),
        normalized_content: result.normalized_content,
        metadata: result.metadata,
        issues: result.issues.iter().map(ToString::to_string).collect(),
        limit_exceeded,
        fields,
        updated_fields,
    }
}
