pub mod bangumi;
pub mod error;
pub mod notion;
pub mod retry;
pub mod traits;

pub use bangumi::BangumiClient;
pub use error::SourceError;
pub use notion::NotionClient;
pub use retry::RetryPolicy;
pub use traits::{CollectionSource, RecordStore};
