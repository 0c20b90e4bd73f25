// ── Player Store Interface ──
//
// The narrow durable-CRUD contract the coordinator talks to. Implementors
// own identity assignment and default initialization, nothing else.

mod http;
mod memory;

use std::future::Future;

use crate::error::StoreError;
use crate::model::{Player, PlayerId};

pub use memory::{MemoryStore, StoreCalls};

/// Durable CRUD over player records.
///
/// Every operation is atomic for a single record, and every failure is
/// reported as a distinguishable [`StoreError`]. In particular `list` must
/// never turn a failure into an empty list.
pub trait PlayerStore: Send + Sync {
    /// All players, points descending.
    fn list(&self) -> impl Future<Output = Result<Vec<Player>, StoreError>> + Send;

    /// Create a player with zero points and a fresh identity.
    ///
    /// Callers pass an already-trimmed, non-empty name.
    fn create(&self, name: &str) -> impl Future<Output = Result<Player, StoreError>> + Send;

    /// Overwrite one player's points, returning the updated record.
    fn update_points(
        &self,
        id: PlayerId,
        points: i64,
    ) -> impl Future<Output = Result<Player, StoreError>> + Send;

    /// Remove one player, returning the removed record.
    fn delete(&self, id: PlayerId) -> impl Future<Output = Result<Player, StoreError>> + Send;
}
