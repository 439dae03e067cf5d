//! Reconciliation decision logic: given a collection entry and the page
//! currently stored for it (if any), decide what write is needed and
//! compute the full property payload for it.

use bgm_sync_models::{
    names, CollectionEntry, CollectionStatus, DatabaseRecord, PropertyMap, PropertyValue,
    SubjectCategory,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Rich text limit of a single Notion text fragment.
pub const SUMMARY_MAX_CHARS: usize = 2000;
/// Multi-select option name limit.
pub const TAG_NAME_MAX_CHARS: usize = 100;

const SUBJECT_URL_BASE: &str = "https://bgm.tv/subject";

#[derive(Debug, Clone, PartialEq)]
pub enum SyncDecision {
    Unchanged,
    Create(PropertyMap),
    Update {
        page_id: String,
        properties: PropertyMap,
    },
}

/// Decide whether the stored page needs a create, an update, or nothing.
///
/// The payload is always the complete recomputed field set, never a diff:
/// destination writes are idempotent and rewriting unchanged fields keeps
/// the writer trivial.
pub fn decide(
    entry: &CollectionEntry,
    status: CollectionStatus,
    category: SubjectCategory,
    existing: Option<&DatabaseRecord>,
    tag_limit: usize,
    now: DateTime<Utc>,
) -> SyncDecision {
    match existing {
        None => SyncDecision::Create(build_properties(entry, status, category, tag_limit, now)),
        Some(record) if needs_update(entry, status, category, record, tag_limit) => {
            SyncDecision::Update {
                page_id: record.id.clone(),
                properties: build_properties(entry, status, category, tag_limit, now),
            }
        }
        Some(_) => SyncDecision::Unchanged,
    }
}

/// Field-by-field comparison of the value that would be written against
/// the value currently stored, short-circuiting on the first mismatch.
fn needs_update(
    entry: &CollectionEntry,
    status: CollectionStatus,
    category: SubjectCategory,
    record: &DatabaseRecord,
    tag_limit: usize,
) -> bool {
    if record.select(names::STATUS) != Some(status.label()) {
        return true;
    }
    if record.select(names::CATEGORY) != Some(category.label()) {
        return true;
    }

    // Rating 0 means unrated and is stored as absence, never as "0".
    let rating = (entry.rating > 0).then(|| entry.rating.to_string());
    if rating.as_deref() != record.select(names::RATING) {
        return true;
    }

    if record.number(names::PROGRESS) != Some(f64::from(entry.progress)) {
        return true;
    }

    // Unordered comparison over the capped top-N names, so a reordered or
    // over-limit source tag list does not churn the page.
    let tags: HashSet<String> = capped_tags(entry, tag_limit).into_iter().collect();
    let stored_tags: HashSet<String> = record
        .multi_select(names::TAGS)
        .unwrap_or(&[])
        .iter()
        .cloned()
        .collect();
    if tags != stored_tags {
        return true;
    }

    // The stored summary is already capped; cap the source side the same
    // way so the comparison converges on repeat runs.
    let summary = truncate_chars(&entry.summary, SUMMARY_MAX_CHARS);
    if summary.trim() != record.rich_text(names::SUMMARY).unwrap_or("").trim() {
        return true;
    }

    false
}

/// Build the full property payload for a create or update. Deterministic
/// for a given `(entry, status, category, now)`.
pub fn build_properties(
    entry: &CollectionEntry,
    status: CollectionStatus,
    category: SubjectCategory,
    tag_limit: usize,
    now: DateTime<Utc>,
) -> PropertyMap {
    let mut properties = PropertyMap::new();

    properties.insert(
        names::SUBJECT_ID.to_string(),
        PropertyValue::Number(entry.subject_id as f64),
    );
    properties.insert(
        names::TITLE.to_string(),
        PropertyValue::Title(entry.display_title().to_string()),
    );
    properties.insert(
        names::STATUS.to_string(),
        PropertyValue::Select(status.label().to_string()),
    );
    properties.insert(
        names::CATEGORY.to_string(),
        PropertyValue::Select(category.label().to_string()),
    );
    properties.insert(
        names::SUBJECT_URL.to_string(),
        PropertyValue::Url(format!("{}/{}", SUBJECT_URL_BASE, entry.subject_id)),
    );
    properties.insert(
        names::LAST_SYNCED.to_string(),
        PropertyValue::Date(now.to_rfc3339()),
    );
    // Progress is always written, even at 0.
    properties.insert(
        names::PROGRESS.to_string(),
        PropertyValue::Number(f64::from(entry.progress)),
    );

    // Everything below is omitted entirely when absent, never written as
    // an empty or zero placeholder.
    if entry.rating > 0 {
        properties.insert(
            names::RATING.to_string(),
            PropertyValue::Select(entry.rating.to_string()),
        );
    }
    if entry.community_score > 0.0 {
        properties.insert(
            names::COMMUNITY_SCORE.to_string(),
            PropertyValue::Number(entry.community_score),
        );
    }
    if entry.total_episodes > 0 {
        properties.insert(
            names::TOTAL_EPISODES.to_string(),
            PropertyValue::Number(f64::from(entry.total_episodes)),
        );
    }
    if let Some(date) = &entry.air_date {
        properties.insert(names::AIR_DATE.to_string(), PropertyValue::Date(date.clone()));
    }
    if let Some(url) = &entry.cover_url {
        properties.insert(
            names::COVER.to_string(),
            PropertyValue::ExternalFile {
                name: url.clone(),
                url: url.clone(),
            },
        );
    }
    if !entry.tags.is_empty() {
        properties.insert(
            names::TAGS.to_string(),
            PropertyValue::MultiSelect(capped_tags(entry, tag_limit)),
        );
    }
    if !entry.summary.is_empty() {
        properties.insert(
            names::SUMMARY.to_string(),
            PropertyValue::RichText(truncate_chars(&entry.summary, SUMMARY_MAX_CHARS).to_string()),
        );
    }

    properties
}

/// Top-N tag names in stable source order, each capped for the
/// destination's option-name limit.
fn capped_tags(entry: &CollectionEntry, tag_limit: usize) -> Vec<String> {
    entry
        .tags
        .iter()
        .take(tag_limit)
        .map(|tag| truncate_chars(&tag.name, TAG_NAME_MAX_CHARS).to_string())
        .collect()
}

/// Character-based truncation; the destination counts characters, not bytes.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests;
