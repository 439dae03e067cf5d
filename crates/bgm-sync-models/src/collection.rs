use serde::{Deserialize, Serialize};

/// One entry of a user's Bangumi collection, flattened from the wire
/// envelope (collection item wrapping a nested subject) at the fetch
/// boundary. The rest of the system never sees the upstream shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionEntry {
    pub subject_id: u64,
    /// Original title.
    pub name: String,
    /// Localized (Chinese) title, empty when Bangumi has none.
    pub name_cn: String,
    pub air_date: Option<String>,
    /// Large cover image variant, when present.
    pub cover_url: Option<String>,
    /// Community score, 0.0 when the subject is unscored.
    pub community_score: f64,
    /// Total episode count, 0 when unknown or unbounded.
    pub total_episodes: u32,
    /// Relevance-ranked by Bangumi; order is meaningful for truncation.
    pub tags: Vec<SubjectTag>,
    pub summary: String,
    /// User rating 0-10, 0 means unrated.
    pub rating: u8,
    /// Episodes watched.
    pub progress: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectTag {
    pub name: String,
    pub count: u64,
}

impl CollectionEntry {
    /// Localized title when available, original title otherwise.
    pub fn display_title(&self) -> &str {
        if self.name_cn.is_empty() {
            &self.name
        } else {
            &self.name_cn
        }
    }
}
