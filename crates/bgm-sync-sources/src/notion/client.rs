use crate::error::SourceError;
use crate::notion::api;
use crate::retry::RetryPolicy;
use crate::traits::RecordStore;
use async_trait::async_trait;
use bgm_sync_models::{DatabaseRecord, PropertyMap};
use reqwest::Client;

#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    api_key: String,
    database_id: String,
    retry: RetryPolicy,
}

impl NotionClient {
    pub fn new(api_key: String, database_id: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            database_id,
            retry: RetryPolicy::default(),
        }
    }
}

#[async_trait]
impl RecordStore for NotionClient {
    async fn find_by_subject_id(
        &self,
        subject_id: u64,
    ) -> Result<Option<DatabaseRecord>, SourceError> {
        api::query_by_subject_id(
            &self.client,
            &self.api_key,
            &self.database_id,
            subject_id,
            &self.retry,
        )
        .await
        .map_err(|e| SourceError::new(format!("{}", e)))
    }

    async fn create_record(&self, properties: &PropertyMap) -> Result<(), SourceError> {
        api::create_page(
            &self.client,
            &self.api_key,
            &self.database_id,
            properties,
            &self.retry,
        )
        .await
        .map_err(|e| SourceError::new(format!("{}", e)))
    }

    async fn update_record(
        &self,
        page_id: &str,
        properties: &PropertyMap,
    ) -> Result<(), SourceError> {
        api::update_page(&self.client, &self.api_key, page_id, properties, &self.retry)
            .await
            .map_err(|e| SourceError::new(format!("{}", e)))
    }
}
