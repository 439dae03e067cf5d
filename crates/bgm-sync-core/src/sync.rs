use crate::progress::{ItemOutcome, ProgressReporter, SyncEvent};
use crate::reconcile::{decide, SyncDecision};
use bgm_sync_config::SyncSettings;
use bgm_sync_models::{CollectionEntry, CollectionStatus, SubjectCategory};
use bgm_sync_sources::{CollectionSource, RecordStore};
use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub tag_limit: usize,
    /// Pacing delay after every item, for both services' rate limits.
    pub item_delay: Duration,
    /// Preview decisions without writing anything.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn from_settings(settings: &SyncSettings, dry_run: bool) -> Self {
        Self {
            tag_limit: settings.sync.tag_limit,
            item_delay: Duration::from_millis(settings.sync.item_delay_ms),
            dry_run,
        }
    }
}

/// Run-scoped counters, owned and incremented by the runner alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncTotals {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl SyncTotals {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Created => self.created += 1,
            ItemOutcome::Updated => self.updated += 1,
            ItemOutcome::Unchanged => self.unchanged += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.created + self.updated + self.unchanged + self.failed
    }
}

/// Drives the one-way sync: fetch -> locate -> reconcile -> write, one
/// (category, status) pair at a time, strictly sequential.
pub struct SyncRunner<S, D> {
    source: S,
    store: D,
    options: RunOptions,
}

impl<S: CollectionSource, D: RecordStore> SyncRunner<S, D> {
    pub fn new(source: S, store: D, options: RunOptions) -> Self {
        Self {
            source,
            store,
            options,
        }
    }

    /// Process every category and status. Item failures are contained;
    /// the run always completes and reports totals.
    pub async fn run(&self, reporter: &dyn ProgressReporter) -> SyncTotals {
        let mut totals = SyncTotals::default();

        for category in SubjectCategory::ALL {
            reporter.event(SyncEvent::CategoryStarted { category });
            info!("Processing category '{}'", category.label());

            // Fetch every status list for the category up front, then
            // write. A failed fetch empties that pair only.
            let mut lists = Vec::new();
            for status in CollectionStatus::ALL {
                match self.source.fetch_collection(category, status).await {
                    Ok(entries) => {
                        info!(
                            "Fetched {} '{}' entries for '{}'",
                            entries.len(),
                            status.label(),
                            category.label()
                        );
                        reporter.event(SyncEvent::FetchFinished {
                            category,
                            status,
                            count: entries.len(),
                        });
                        lists.push((status, entries));
                    }
                    Err(err) => {
                        error!(
                            "Failed to fetch '{}' / '{}': {}",
                            category.label(),
                            status.label(),
                            err
                        );
                        reporter.event(SyncEvent::FetchFailed { category, status });
                        lists.push((status, Vec::new()));
                    }
                }
            }

            for (status, entries) in lists {
                if entries.is_empty() {
                    continue;
                }
                reporter.event(SyncEvent::PairStarted {
                    category,
                    status,
                    total: entries.len(),
                });

                for entry in &entries {
                    let outcome = self.sync_entry(entry, status, category).await;
                    totals.record(outcome);
                    reporter.event(SyncEvent::ItemProcessed {
                        title: entry.display_title(),
                        outcome,
                    });
                    if !self.options.dry_run && !self.options.item_delay.is_zero() {
                        sleep(self.options.item_delay).await;
                    }
                }

                reporter.event(SyncEvent::PairFinished { category, status });
            }
        }

        info!(
            "Sync complete: {} created, {} updated, {} unchanged, {} failed",
            totals.created, totals.updated, totals.unchanged, totals.failed
        );
        totals
    }

    async fn sync_entry(
        &self,
        entry: &CollectionEntry,
        status: CollectionStatus,
        category: SubjectCategory,
    ) -> ItemOutcome {
        let existing = match self.store.find_by_subject_id(entry.subject_id).await {
            Ok(found) => found,
            Err(err) => {
                // Indistinguishable from "not found"; falling through to
                // the create path can duplicate a record on a transient
                // lookup error.
                warn!(
                    "Lookup for subject {} failed, treating as new: {}",
                    entry.subject_id, err
                );
                None
            }
        };

        match decide(
            entry,
            status,
            category,
            existing.as_ref(),
            self.options.tag_limit,
            Utc::now(),
        ) {
            SyncDecision::Unchanged => ItemOutcome::Unchanged,
            SyncDecision::Create(properties) => {
                if self.options.dry_run {
                    return ItemOutcome::Created;
                }
                match self.store.create_record(&properties).await {
                    Ok(()) => ItemOutcome::Created,
                    Err(err) => {
                        error!(
                            "Failed to create page for '{}': {}",
                            entry.display_title(),
                            err
                        );
                        ItemOutcome::Failed
                    }
                }
            }
            SyncDecision::Update {
                page_id,
                properties,
            } => {
                if self.options.dry_run {
                    return ItemOutcome::Updated;
                }
                match self.store.update_record(&page_id, &properties).await {
                    Ok(()) => ItemOutcome::Updated,
                    Err(err) => {
                        error!(
                            "Failed to update page for '{}': {}",
                            entry.display_title(),
                            err
                        );
                        ItemOutcome::Failed
                    }
                }
            }
        }
    }
}
