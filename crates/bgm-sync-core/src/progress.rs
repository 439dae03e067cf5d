use bgm_sync_models::{CollectionStatus, SubjectCategory};

/// What happened to a single item after locate + decide + write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Created,
    Updated,
    Unchanged,
    Failed,
}

/// Progress events emitted while a run advances. Consumers render these
/// however they like; the runner itself only logs.
#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    CategoryStarted {
        category: SubjectCategory,
    },
    FetchFinished {
        category: SubjectCategory,
        status: CollectionStatus,
        count: usize,
    },
    FetchFailed {
        category: SubjectCategory,
        status: CollectionStatus,
    },
    PairStarted {
        category: SubjectCategory,
        status: CollectionStatus,
        total: usize,
    },
    ItemProcessed {
        title: &'a str,
        outcome: ItemOutcome,
    },
    PairFinished {
        category: SubjectCategory,
        status: CollectionStatus,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn event(&self, event: SyncEvent<'_>);
}

/// Discards every event; tracing still records the run.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn event(&self, _event: SyncEvent<'_>) {}
}
