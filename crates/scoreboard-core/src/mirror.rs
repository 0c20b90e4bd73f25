// ── Local mirror of the player collection ──
//
// Ordered client-side copy of the store's players with push-based change
// notification via a `watch` channel. Only a full replace sorts; appends
// and point updates keep positions, so the order can go stale until the
// next reload.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Player, PlayerId};

/// Client-resident copy of the player collection.
///
/// Every mutation rebuilds the snapshot that subscribers receive.
pub struct LocalMirror {
    entries: Vec<Player>,
    snapshot: watch::Sender<Arc<Vec<Player>>>,
}

impl LocalMirror {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            entries: Vec::new(),
            snapshot,
        }
    }

    /// Replace every entry with `players`, sorted into leaderboard order.
    pub fn replace_all(&mut self, mut players: Vec<Player>) {
        players.sort_by(Player::leaderboard_order);
        self.entries = players;
        self.publish();
    }

    /// Add a confirmed record at the end, or overwrite it in place if the
    /// identity is already present.
    pub fn append(&mut self, player: Player) {
        match self.position(player.id) {
            Some(idx) => self.entries[idx] = player,
            None => self.entries.push(player),
        }
        self.publish();
    }

    /// Overwrite the entry with the same identity in place.
    ///
    /// Returns `false` (and changes nothing) if the identity is absent.
    pub fn replace(&mut self, player: Player) -> bool {
        let Some(idx) = self.position(player.id) else {
            return false;
        };
        self.entries[idx] = player;
        self.publish();
        true
    }

    /// Remove an entry by identity. Returns the removed entry if it existed.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.position(id)?;
        let removed = self.entries.remove(idx);
        self.publish();
        Some(removed)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.position(id).is_some()
    }

    pub fn players(&self) -> &[Player] {
        &self.entries
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Player>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Player>>> {
        self.snapshot.subscribe()
    }

    /// Whether entries are currently in descending points order.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].points >= w[1].points)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn position(&self, id: PlayerId) -> Option<usize> {
        self.entries.iter().position(|p| p.id == id)
    }

    fn publish(&self) {
        let values = Arc::new(self.entries.clone());
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = values);
    }
}

impl Default for LocalMirror {
    fn default() -> Self {
        Self::new()
    }
}
