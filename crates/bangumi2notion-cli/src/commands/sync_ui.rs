use crate::output::Output;
use bgm_sync_core::{ItemOutcome, ProgressReporter, SyncEvent};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::sync::Mutex;

/// Renders sync progress on the console: a per-pair progress bar when
/// attached to a terminal, plain per-item lines otherwise.
pub struct ConsoleReporter<'a> {
    output: &'a Output,
    interactive: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl<'a> ConsoleReporter<'a> {
    pub fn new(output: &'a Output) -> Self {
        Self {
            output,
            interactive: is_interactive() && output.is_human(),
            bar: Mutex::new(None),
        }
    }

    fn print_line(&self, line: String) {
        match self.bar.lock().unwrap().as_ref() {
            Some(bar) => bar.println(line),
            None => self.output.println(line),
        }
    }
}

impl ProgressReporter for ConsoleReporter<'_> {
    fn event(&self, event: SyncEvent<'_>) {
        match event {
            SyncEvent::CategoryStarted { category } => {
                self.output
                    .info(format!("==== Category: {} ====", category.label()));
            }
            SyncEvent::FetchFinished { status, count, .. } => {
                self.output
                    .info(format!("Fetched {} entries for '{}'", count, status.label()));
            }
            SyncEvent::FetchFailed { category, status } => {
                self.output.warn(format!(
                    "Fetch failed for {} / {}, skipping the pair",
                    category.label(),
                    status.label()
                ));
            }
            SyncEvent::PairStarted {
                category,
                status,
                total,
            } => {
                self.output.info(format!(
                    "--- Syncing '{}' ({}) - {} items ---",
                    status.label(),
                    category.label(),
                    total
                ));
                if self.interactive {
                    let bar = ProgressBar::new(total as u64);
                    bar.set_style(
                        ProgressStyle::default_bar()
                            .template("{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                            .unwrap()
                            .progress_chars("█▉▊▋▌▍▎▏  "),
                    );
                    *self.bar.lock().unwrap() = Some(bar);
                }
            }
            SyncEvent::ItemProcessed { title, outcome } => {
                let line = match outcome {
                    ItemOutcome::Created => format!("  {} created: {}", "+".green(), title),
                    ItemOutcome::Updated => format!("  {} updated: {}", "~".yellow(), title),
                    ItemOutcome::Unchanged => format!("  {} unchanged: {}", "=".dimmed(), title),
                    ItemOutcome::Failed => format!("  {} failed: {}", "✗".red(), title),
                };
                self.print_line(line);
                if let Some(bar) = self.bar.lock().unwrap().as_ref() {
                    bar.inc(1);
                }
            }
            SyncEvent::PairFinished { .. } => {
                if let Some(bar) = self.bar.lock().unwrap().take() {
                    bar.finish_and_clear();
                }
            }
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
