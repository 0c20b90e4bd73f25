// ── In-process player store ──
//
// Reference implementation of `PlayerStore` with a monotonic id sequence.
// Exposes call counters and an availability switch so callers can observe
// which requests were issued and exercise failure paths.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::PlayerStore;
use crate::error::StoreError;
use crate::model::{Player, PlayerId};

/// Number of requests a [`MemoryStore`] has received, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list: usize,
    pub create: usize,
    pub update_points: usize,
    pub delete: usize,
}

#[derive(Default)]
struct Counters {
    list: AtomicUsize,
    create: AtomicUsize,
    update_points: AtomicUsize,
    delete: AtomicUsize,
}

struct Table {
    rows: BTreeMap<PlayerId, Player>,
    next_id: i64,
}

/// A `PlayerStore` held entirely in memory.
pub struct MemoryStore {
    table: RwLock<Table>,
    available: AtomicBool,
    counters: Counters,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            available: AtomicBool::new(true),
            counters: Counters::default(),
        }
    }

    /// A store pre-populated with `(name, points)` rows, ids assigned from 1.
    pub fn seeded<'a>(rows: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        let store = Self::new();
        if let Ok(mut table) = store.table.write() {
            for (name, points) in rows {
                let id = PlayerId(table.next_id);
                table.next_id += 1;
                table.rows.insert(id, Player::new(id, name, points));
            }
        }
        store
    }

    /// Simulate the backing medium going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Requests received so far, including failed ones.
    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            list: self.counters.list.load(Ordering::SeqCst),
            create: self.counters.create.load(Ordering::SeqCst),
            update_points: self.counters.update_points.load(Ordering::SeqCst),
            delete: self.counters.delete.load(Ordering::SeqCst),
        }
    }

    /// Look up a single record.
    pub fn get(&self, id: PlayerId) -> Option<Player> {
        self.table.read().ok()?.rows.get(&id).cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable("memory store is offline"))
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Table>, StoreError> {
        self.check_available()?;
        self.table
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned (read)"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Table>, StoreError> {
        self.check_available()?;
        self.table
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned (write)"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Player>, StoreError> {
        self.counters.list.fetch_add(1, Ordering::SeqCst);
        let mut players: Vec<Player> = self.read()?.rows.values().cloned().collect();
        players.sort_by(Player::leaderboard_order);
        Ok(players)
    }

    async fn create(&self, name: &str) -> Result<Player, StoreError> {
        self.counters.create.fetch_add(1, Ordering::SeqCst);
        if name.trim().is_empty() {
            return Err(StoreError::ConstraintViolation {
                message: "player name must not be blank".into(),
            });
        }

        let mut table = self.write()?;
        let id = PlayerId(table.next_id);
        table.next_id += 1;
        let player = Player::new(id, name, 0);
        table.rows.insert(id, player.clone());
        Ok(player)
    }

    async fn update_points(&self, id: PlayerId, points: i64) -> Result<Player, StoreError> {
        self.counters.update_points.fetch_add(1, Ordering::SeqCst);
        let mut table = self.write()?;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        row.points = points;
        Ok(row.clone())
    }

    async fn delete(&self, id: PlayerId) -> Result<Player, StoreError> {
        self.counters.delete.fetch_add(1, Ordering::SeqCst);
        self.write()?
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }
}
