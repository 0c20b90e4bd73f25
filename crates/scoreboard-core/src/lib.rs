// scoreboard-core: Player store contract and edit-state coordinator between scoreboard-api and the CLI.

pub mod config;
pub mod coordinator;
pub mod edit;
pub mod error;
pub mod mirror;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use edit::{DraftFloor, EditState, parse_points};
pub use error::{CoordinatorError, StoreError};
pub use mirror::LocalMirror;
pub use model::{Player, PlayerId};
pub use store::{MemoryStore, PlayerStore, StoreCalls};
