use crate::retry::{send_with_retry, RetryPolicy};
use anyhow::{anyhow, Result};
use bgm_sync_models::{CollectionEntry, CollectionStatus, SubjectCategory, SubjectTag};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const API_BASE: &str = "https://api.bgm.tv";
pub const PAGE_SIZE: u32 = 50;

/// One page of the paginated collection list endpoint.
#[derive(Debug, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pub data: Vec<CollectionItem>,
}

/// A collection entry as the API returns it: user-side fields at the top
/// level, display fields nested in the subject object.
#[derive(Debug, Deserialize)]
pub struct CollectionItem {
    #[serde(default)]
    pub ep_status: u32,
    #[serde(default)]
    pub rate: u8,
    pub subject: Option<SubjectData>,
}

#[derive(Debug, Deserialize)]
pub struct SubjectData {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_cn: String,
    pub date: Option<String>,
    #[serde(default)]
    pub images: SubjectImages,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub tags: Vec<TagData>,
    #[serde(default)]
    pub short_summary: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubjectImages {
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagData {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

impl CollectionItem {
    /// Flatten the wire envelope into a normalized entry. Items without a
    /// subject carry nothing worth syncing and are dropped.
    pub fn into_entry(self) -> Option<CollectionEntry> {
        let subject = self.subject?;
        Some(CollectionEntry {
            subject_id: subject.id,
            name: subject.name,
            name_cn: subject.name_cn,
            air_date: subject.date.filter(|date| !date.is_empty()),
            cover_url: subject.images.large.filter(|url| !url.is_empty()),
            community_score: subject.score,
            total_episodes: subject.eps,
            tags: subject
                .tags
                .into_iter()
                .map(|tag| SubjectTag {
                    name: tag.name,
                    count: tag.count,
                })
                .collect(),
            summary: subject.short_summary,
            rating: self.rate,
            progress: self.ep_status,
        })
    }
}

/// Page through one (category, status) pair of the user's collection.
/// Stops on the first short or empty page.
pub async fn fetch_collection(
    client: &Client,
    username: &str,
    access_token: &str,
    user_agent: &str,
    category: SubjectCategory,
    status: CollectionStatus,
    retry: &RetryPolicy,
) -> Result<Vec<CollectionEntry>> {
    let url = format!(
        "{}/v0/users/{}/collections",
        API_BASE,
        urlencoding::encode(username)
    );

    let mut entries = Vec::new();
    let mut offset: u32 = 0;
    loop {
        let request = client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("User-Agent", user_agent)
            .header("Accept", "application/json")
            .query(&[
                ("subject_type", u32::from(category.code())),
                ("type", u32::from(status.code())),
                ("limit", PAGE_SIZE),
                ("offset", offset),
            ]);

        let response = send_with_retry(request, retry).await?;
        if !response.status().is_success() {
            let status_code = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to fetch collection: {} - {}",
                status_code,
                error_text
            ));
        }

        let page: CollectionPage = response.json().await?;
        let page_len = page.data.len();
        if page_len == 0 {
            break;
        }
        entries.extend(page.data.into_iter().filter_map(CollectionItem::into_entry));
        if page_len < PAGE_SIZE as usize {
            break;
        }
        offset += PAGE_SIZE;
    }

    debug!(
        "Fetched {} entries for {} / {}",
        entries.len(),
        category.label(),
        status.label()
    );
    Ok(entries)
}
