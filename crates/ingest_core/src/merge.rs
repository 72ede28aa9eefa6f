use serde::{Deserialize, Serialize};

use crate::{slugify, ExtractedMetadata};

/// Field values currently held by the editor.
///
/// `slug` is `None` when the caller has no slug field at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorFields {
    pub title: String,
    pub meta_title: String,
    pub meta_description: String,
    pub excerpt: String,
    pub featured_image: String,
    pub tags: Vec<String>,
    pub slug: Option<String>,
}

/// A field populated by [`merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldUpdate {
    Title,
    MetaTitle,
    MetaDescription,
    Excerpt,
    FeaturedImage,
    Tags,
    Slug,
}

/// Pure merge: fills empty fields from `metadata` and returns the fields that changed.
///
/// A non-empty field is never overwritten. Tags only replace an empty tag list.
pub fn merge(
    mut fields: EditorFields,
    metadata: &ExtractedMetadata,
) -> (EditorFields, Vec<FieldUpdate>) {
    let mut updates = Vec::new();

    if fill_if_empty(&mut fields.title, metadata.title.as_deref()) {
        updates.push(FieldUpdate::Title);
    }
    if fill_if_empty(&mut fields.meta_title, metadata.meta_title.as_deref()) {
        updates.push(FieldUpdate::MetaTitle);
    }
    if fill_if_empty(
        &mut fields.meta_description,
        metadata.meta_description.as_deref(),
    ) {
        updates.push(FieldUpdate::MetaDescription);
    }
    if fill_if_empty(&mut fields.excerpt, metadata.excerpt.as_deref()) {
        updates.push(FieldUpdate::Excerpt);
    }
    if fill_if_empty(
        &mut fields.featured_image,
        metadata.featured_image.as_deref(),
    ) {
        updates.push(FieldUpdate::FeaturedImage);
    }
    if fields.tags.is_empty() && !metadata.tags.is_empty() {
        fields.tags = metadata.tags.clone();
        updates.push(FieldUpdate::Tags);
    }

    let title_filled = updates.contains(&FieldUpdate::Title);
    if let Some(slug) = fields.slug.as_mut() {
        if slug.is_empty() && title_filled {
            let generated = slugify(&fields.title);
            if !generated.is_empty() {
                *slug = generated;
                updates.push(FieldUpdate::Slug);
            }
        }
    }

    (fields, updates)
}

fn fill_if_empty(field: &mut String, extracted: Option<&str>) -> bool {
    match extracted {
        Some(value) if field.is_empty() && !value.is_empty() => {
            *field = value.to_string();
            true
        }
        _ => false,
    }
}
