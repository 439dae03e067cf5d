use crate::bangumi::api;
use crate::error::SourceError;
use crate::retry::RetryPolicy;
use crate::traits::CollectionSource;
use async_trait::async_trait;
use bgm_sync_models::{CollectionEntry, CollectionStatus, SubjectCategory};
use reqwest::Client;

#[derive(Clone)]
pub struct BangumiClient {
    client: Client,
    username: String,
    access_token: String,
    user_agent: String,
    retry: RetryPolicy,
}

impl BangumiClient {
    pub fn new(username: String, access_token: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            username,
            access_token,
            user_agent,
            retry: RetryPolicy::default(),
        }
    }
}

#[async_trait]
impl CollectionSource for BangumiClient {
    async fn fetch_collection(
        &self,
        category: SubjectCategory,
        status: CollectionStatus,
    ) -> Result<Vec<CollectionEntry>, SourceError> {
        api::fetch_collection(
            &self.client,
            &self.username,
            &self.access_token,
            &self.user_agent,
            category,
            status,
            &self.retry,
        )
        .await
        .map_err(|e| SourceError::new(format!("{}", e)))
    }
}
