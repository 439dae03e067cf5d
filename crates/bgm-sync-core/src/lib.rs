pub mod progress;
pub mod reconcile;
pub mod sync;

pub use progress::{ItemOutcome, ProgressReporter, SilentReporter, SyncEvent};
pub use reconcile::{build_properties, decide, SyncDecision};
pub use sync::{RunOptions, SyncRunner, SyncTotals};
