use crate::notion::properties;
use crate::retry::{send_with_retry, RetryPolicy};
use anyhow::{anyhow, Result};
use bgm_sync_models::{names, DatabaseRecord, PropertyMap};
use reqwest::{Client, RequestBuilder};
use serde_json::json;

pub const API_BASE: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

fn authorized(request: RequestBuilder, api_key: &str) -> RequestBuilder {
    request
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Notion-Version", NOTION_VERSION)
}

/// Query the database for the page whose external-id property equals the
/// subject id. Duplicates violate the database's integrity expectations;
/// only the first result is used.
pub async fn query_by_subject_id(
    client: &Client,
    api_key: &str,
    database_id: &str,
    subject_id: u64,
    retry: &RetryPolicy,
) -> Result<Option<DatabaseRecord>> {
    let url = format!("{}/databases/{}/query", API_BASE, database_id);
    let payload = json!({
        "filter": { "property": names::SUBJECT_ID, "number": { "equals": subject_id } }
    });

    let request = authorized(client.post(&url), api_key).json(&payload);
    let response = send_with_retry(request, retry).await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to query database: {} - {}", status, error_text));
    }

    let body: serde_json::Value = response.json().await?;
    match body["results"].as_array().and_then(|results| results.first()) {
        Some(page) => Ok(Some(properties::record_from_page(page)?)),
        None => Ok(None),
    }
}

pub async fn create_page(
    client: &Client,
    api_key: &str,
    database_id: &str,
    page_properties: &PropertyMap,
    retry: &RetryPolicy,
) -> Result<()> {
    let url = format!("{}/pages", API_BASE);
    let payload = json!({
        "parent": { "database_id": database_id },
        "properties": properties::to_wire(page_properties)
    });

    let request = authorized(client.post(&url), api_key).json(&payload);
    let response = send_with_retry(request, retry).await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to create page: {} - {}", status, error_text));
    }
    Ok(())
}

pub async fn update_page(
    client: &Client,
    api_key: &str,
    page_id: &str,
    page_properties: &PropertyMap,
    retry: &RetryPolicy,
) -> Result<()> {
    let url = format!("{}/pages/{}", API_BASE, page_id);
    let payload = json!({ "properties": properties::to_wire(page_properties) });

    let request = authorized(client.patch(&url), api_key).json(&payload);
    let response = send_with_retry(request, retry).await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("Failed to update page: {} - {}", status, error_text));
    }
    Ok(())
}
