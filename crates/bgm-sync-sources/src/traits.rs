use crate::error::SourceError;
use async_trait::async_trait;
use bgm_sync_models::{
    CollectionEntry, CollectionStatus, DatabaseRecord, PropertyMap, SubjectCategory,
};

/// The catalog service holding the source-of-truth collection.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch the user's complete collection for one (category, status)
    /// pair, fully paginated and normalized.
    async fn fetch_collection(
        &self,
        category: SubjectCategory,
        status: CollectionStatus,
    ) -> Result<Vec<CollectionEntry>, SourceError>;
}

/// The destination database mirroring the collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the record whose external-identifier property equals the
    /// subject id. Matching is expected to be unique; the first match wins.
    async fn find_by_subject_id(
        &self,
        subject_id: u64,
    ) -> Result<Option<DatabaseRecord>, SourceError>;

    async fn create_record(&self, properties: &PropertyMap) -> Result<(), SourceError>;

    async fn update_record(
        &self,
        page_id: &str,
        properties: &PropertyMap,
    ) -> Result<(), SourceError>;
}
