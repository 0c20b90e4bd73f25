// ── Runtime coordinator configuration ──
//
// Describes how the coordinator talks to its store and how drafts are
// bounded. Never touches disk: the CLI builds one and hands it in.

use std::time::Duration;

use crate::edit::DraftFloor;

/// Configuration for a single [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Upper bound on every individual store call.
    pub call_timeout: Duration,
    /// Lower bound for drafts.
    pub floor: DraftFloor,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            floor: DraftFloor::Zero,
        }
    }
}
