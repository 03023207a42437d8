pub mod config;
pub mod diff;
pub mod record;
pub mod report;
pub mod run;
pub mod snapshot;
pub mod verify;

pub use config::RunConfig;
pub use diff::{BrokenLink, LinkDiff};
pub use record::{LinkRecord, LinkResults};
pub use run::{RunError, RunOutcome, execute_run};
pub use snapshot::{SnapshotError, load_snapshot, save_snapshot};
pub use verify::Verifier;
