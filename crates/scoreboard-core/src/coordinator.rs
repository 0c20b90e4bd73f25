// ── Edit-state coordinator ──
//
// Owns the local mirror and the single edit slot, and mediates every
// operator-visible change through the player store. The state lock is
// never held across a store call, so operations on different players can
// interleave; mutations on the same player are serialized by an in-flight
// set and rejected with `Busy` while one is pending.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use crate::config::CoordinatorConfig;
use crate::edit::{EditState, parse_points};
use crate::error::{CoordinatorError, StoreError};
use crate::mirror::LocalMirror;
use crate::model::{Player, PlayerId};
use crate::store::PlayerStore;

// ── Coordinator ──────────────────────────────────────────────────

/// Client-side owner of the player mirror and the edit session.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. Starts with an empty
/// mirror and no session; call [`reload()`](Self::reload) to load.
pub struct Coordinator<S> {
    inner: Arc<CoordinatorInner<S>>,
}

struct CoordinatorInner<S> {
    store: S,
    config: CoordinatorConfig,
    state: Mutex<State>,
}

struct State {
    mirror: LocalMirror,
    edit: EditState,
    /// Players with a store mutation awaiting its answer.
    in_flight: HashSet<PlayerId>,
    /// Set once a `list` has succeeded.
    loaded: bool,
}

impl<S> Clone for Coordinator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Clears a player's in-flight mark when the mutation settles or its
/// future is dropped.
struct InFlight<'a> {
    state: &'a Mutex<State>,
    id: PlayerId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight.remove(&self.id);
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    // State stays consistent across a panic (every write is a single
    // assignment), so a poisoned lock is still usable.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: PlayerStore> Coordinator<S> {
    /// Create a coordinator over `store`. Does NOT load -- call
    /// [`reload()`](Self::reload) to fetch the initial list.
    pub fn new(store: S, config: CoordinatorConfig) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                store,
                config,
                state: Mutex::new(State {
                    mirror: LocalMirror::new(),
                    edit: EditState::Viewing,
                    in_flight: HashSet::new(),
                    loaded: false,
                }),
            }),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Access the coordinator configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    // ── Store-backed operations ──────────────────────────────────

    /// Replace the whole mirror with a fresh, sorted `list`.
    ///
    /// On failure the existing mirror is left untouched. A session whose
    /// target disappeared from the fresh list is discarded.
    pub async fn reload(&self) -> Result<usize, CoordinatorError> {
        let players = self.call("list", self.inner.store.list()).await?;

        let mut state = self.state();
        state.mirror.replace_all(players);
        state.loaded = true;
        if let Some(target) = state.edit.target() {
            if !state.mirror.contains(target) {
                debug!(id = %target, "edit target vanished on reload; discarding draft");
                state.edit = EditState::Viewing;
            }
        }

        let count = state.mirror.len();
        info!(count, "player list loaded");
        Ok(count)
    }

    /// Create a player and append the confirmed record to the mirror.
    ///
    /// Blank names are rejected before any store call. The trimmed name
    /// is what gets stored.
    pub async fn add_player(&self, name: &str) -> Result<Player, CoordinatorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoordinatorError::EmptyName);
        }

        let player = self.call("create", self.inner.store.create(name)).await?;

        self.state().mirror.append(player.clone());
        info!(id = %player.id, name = %player.name, "player added");
        Ok(player)
    }

    /// Delete a player and drop it from the mirror.
    ///
    /// On failure the mirror entry stays. An open session on the removed
    /// player is discarded.
    pub async fn remove_player(&self, id: PlayerId) -> Result<Player, CoordinatorError> {
        let _in_flight = self.begin_mutation(id)?;

        let removed = self.call("delete", self.inner.store.delete(id)).await?;

        let mut state = self.state();
        state.mirror.remove(id);
        if state.edit.is_editing_player(id) {
            debug!(id = %id, "removed player was being edited; discarding draft");
            state.edit = EditState::Viewing;
        }
        info!(id = %id, name = %removed.name, "player removed");
        Ok(removed)
    }

    /// Commit the open draft through `update_points`.
    ///
    /// The session closes whatever the outcome. On success the mirror entry
    /// is replaced in place (no re-sort); on failure the mirror is untouched
    /// and the error is returned.
    pub async fn save(&self) -> Result<Player, CoordinatorError> {
        let (target, draft) = {
            let mut state = self.state();
            let EditState::Editing { target, draft } = std::mem::take(&mut state.edit) else {
                return Err(CoordinatorError::NoActiveEdit);
            };
            (target, draft)
        };
        let _in_flight = self.begin_mutation(target)?;

        debug!(id = %target, points = draft, "saving draft");
        let saved = self
            .call("update_points", self.inner.store.update_points(target, draft))
            .await?;

        let mut state = self.state();
        if !state.mirror.replace(saved.clone()) {
            debug!(id = %target, "saved player is no longer mirrored");
        }
        info!(id = %saved.id, points = saved.points, "points saved");
        Ok(saved)
    }

    // ── Draft operations (no store calls) ────────────────────────

    /// Open a session on `id`, seeding the draft from its mirrored points.
    ///
    /// Any other open session is discarded, not saved.
    pub fn start_edit(&self, id: PlayerId) -> Result<i64, CoordinatorError> {
        let mut state = self.state();
        if state.in_flight.contains(&id) {
            return Err(CoordinatorError::Busy { id });
        }
        let points = state
            .mirror
            .get(id)
            .map(|p| p.points)
            .ok_or(CoordinatorError::NotInMirror { id })?;

        if let Some(previous) = state.edit.target() {
            debug!(previous = %previous, "discarding open draft");
        }
        state.edit = EditState::Editing {
            target: id,
            draft: points,
        };
        trace!(id = %id, draft = points, "edit started");
        Ok(points)
    }

    /// Draft + 1, saturating at `i64::MAX`.
    ///
    /// At the ceiling the draft stays put, so a following decrement lands
    /// one below where it started.
    pub fn increment(&self) -> Result<i64, CoordinatorError> {
        self.update_draft(|draft, _| draft.saturating_add(1))
    }

    /// Draft - 1. Under a floor the draft stops at the floor, or at the
    /// player's stored total if that is lower; see
    /// [`DraftFloor::step_down`](crate::DraftFloor::step_down).
    pub fn decrement(&self) -> Result<i64, CoordinatorError> {
        let floor = self.inner.config.floor;
        self.update_draft(|draft, stored| floor.step_down(draft, stored))
    }

    /// Set the draft from operator-typed text.
    ///
    /// Unparseable text becomes 0 rather than an error; see
    /// [`parse_points`].
    pub fn set_direct(&self, text: &str) -> Result<i64, CoordinatorError> {
        let value = self.inner.config.floor.clamp(parse_points(text));
        self.update_draft(|_, _| value)
    }

    /// Discard the open session. Returns whether one was open.
    pub fn cancel(&self) -> bool {
        let previous = std::mem::take(&mut self.state().edit);
        if let Some(target) = previous.target() {
            trace!(id = %target, "edit cancelled");
        }
        previous.is_editing()
    }

    // ── Read accessors ───────────────────────────────────────────

    /// Current mirror contents (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Player>> {
        self.state().mirror.snapshot()
    }

    /// Observe every mirror change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Player>>> {
        self.state().mirror.subscribe()
    }

    pub fn edit_state(&self) -> EditState {
        self.state().edit
    }

    /// A single mirrored player.
    pub fn player(&self, id: PlayerId) -> Option<Player> {
        self.state().mirror.get(id).cloned()
    }

    /// Whether a `reload` has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    /// Whether the mirror is still in descending points order. Goes
    /// `false` after an append or save that breaks the order, until the
    /// next reload.
    pub fn is_sorted(&self) -> bool {
        self.state().mirror.is_sorted()
    }

    /// Whether a mutation for `id` is awaiting the store.
    pub fn is_busy(&self, id: PlayerId) -> bool {
        self.state().in_flight.contains(&id)
    }

    // ── Private helpers ──────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.inner.state)
    }

    /// Apply `f(draft, stored_points)` to the open draft.
    fn update_draft(&self, f: impl FnOnce(i64, i64) -> i64) -> Result<i64, CoordinatorError> {
        let mut state = self.state();
        let EditState::Editing { target, draft } = state.edit else {
            return Err(CoordinatorError::NoActiveEdit);
        };
        let stored = state.mirror.get(target).map_or(draft, |p| p.points);
        let next = f(draft, stored);
        state.edit = EditState::Editing {
            target,
            draft: next,
        };
        trace!(id = %target, draft = next, "draft changed");
        Ok(next)
    }

    fn begin_mutation(&self, id: PlayerId) -> Result<InFlight<'_>, CoordinatorError> {
        if !self.state().in_flight.insert(id) {
            return Err(CoordinatorError::Busy { id });
        }
        Ok(InFlight {
            state: &self.inner.state,
            id,
        })
    }

    /// Run one store call under the configured deadline.
    async fn call<T: Send>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, StoreError> {
        let limit = self.inner.config.call_timeout;
        let result = tokio::time::timeout(limit, fut)
            .await
            .unwrap_or(Err(StoreError::Timeout {
                timeout: limit,
            }));

        if let Err(ref e) = result {
            warn!(op, error = %e, "player store call failed");
        }
        result
    }
}
