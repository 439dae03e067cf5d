use super::sync_ui::ConsoleReporter;
use crate::output::{Output, OutputFormat};
use bgm_sync_core::{RunOptions, SyncRunner};
use bgm_sync_sources::{BangumiClient, NotionClient};
use color_eyre::Result;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

pub async fn run_sync(
    config_file: Option<&Path>,
    dry_run: bool,
    tag_limit: Option<usize>,
    delay_ms: Option<u64>,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Sync command started");

    let settings = super::load_settings(config_file, output)?;

    let mut options = RunOptions::from_settings(&settings, dry_run);
    if let Some(tag_limit) = tag_limit {
        options.tag_limit = tag_limit;
    }
    if let Some(delay_ms) = delay_ms {
        options.item_delay = Duration::from_millis(delay_ms);
    }

    if dry_run {
        output.info("Dry run: decisions are previewed, nothing is written");
    }

    let source = BangumiClient::new(
        settings.bangumi.username.clone(),
        settings.bangumi.access_token.clone(),
        settings.bangumi.user_agent.clone(),
    );
    let store = NotionClient::new(
        settings.notion.api_key.clone(),
        settings.notion.database_id.clone(),
    );

    let runner = SyncRunner::new(source, store, options);
    let reporter = ConsoleReporter::new(output);
    let totals = runner.run(&reporter).await;

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "created": totals.created,
                "updated": totals.updated,
                "unchanged": totals.unchanged,
                "failed": totals.failed,
                "dry_run": dry_run,
            }));
        }
        OutputFormat::Human => {
            output.success(format!(
                "Sync complete - created: {}, updated: {}, unchanged: {}",
                totals.created, totals.updated, totals.unchanged
            ));
            if totals.failed > 0 {
                output.warn(format!("{} items failed, see the log for details", totals.failed));
            }
        }
    }

    Ok(())
}
