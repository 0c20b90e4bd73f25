// ── Player identity and record ──
//
// `PlayerId` is the store-assigned identity; `Player` is the canonical
// record every layer above the wire format works with.

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── PlayerId ────────────────────────────────────────────────────────

/// Store-assigned player identity. Never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl PlayerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ── Player ──────────────────────────────────────────────────────────

/// A persisted player: identity, display name, and point total.
///
/// `points` is the only field any operation mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub points: i64,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, points: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points,
        }
    }

    /// Canonical listing order: points descending, then id ascending.
    pub fn leaderboard_order(a: &Self, b: &Self) -> Ordering {
        b.points.cmp(&a.points).then(a.id.cmp(&b.id))
    }
}

impl From<scoreboard_api::PlayerRecord> for Player {
    fn from(rec: scoreboard_api::PlayerRecord) -> Self {
        Self {
            id: PlayerId(rec.id),
            name: rec.name,
            points: rec.points,
        }
    }
}
