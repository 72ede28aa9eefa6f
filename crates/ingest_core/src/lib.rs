//! Ingest core: extracted-metadata model and the caller-side merge policy.
mod merge;
mod metadata;
mod slug;

pub use merge::{merge, EditorFields, FieldUpdate};
pub use metadata::ExtractedMetadata;
pub use slug::slugify;
