use serde::{Deserialize, Serialize};

/// Metadata signals found in a pasted document.
///
/// `None` means no signal was found; it never means "clear the field".
/// `tags` holds trimmed, non-empty, de-duplicated entries in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ExtractedMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.meta_title.is_none()
            && self.meta_description.is_none()
            && self.excerpt.is_none()
            && self.featured_image.is_none()
            && self.tags.is_empty()
    }

    /// Replaces `tags` with the cleaned form of `raw`: trimmed, empties dropped,
    /// first occurrence kept.
    pub fn set_tags<I, S>(&mut self, raw: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
                continue;
            }
            tags.push(tag.to_string());
        }
        self.tags = tags;
    }
}
