//! Edit session state and the numeric draft protocol.
//!
//! ```text
//! VIEWING  --(start_edit)-->  EDITING
//! EDITING  --(increment/decrement/set_direct)--> EDITING   (no store call)
//! EDITING  --(cancel)-->  VIEWING                          (draft discarded)
//! EDITING  --(save)-->  VIEWING                            (store call issued)
//! ```
//!
//! At most one session exists, which the tagged [`EditState`] makes
//! structural: there is no way to hold a draft without a target.

use serde::{Deserialize, Serialize};

use crate::model::PlayerId;

/// The coordinator's single edit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No session open.
    #[default]
    Viewing,
    /// One player's points are being drafted.
    Editing { target: PlayerId, draft: i64 },
}

impl EditState {
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            Self::Editing { target, .. } => Some(*target),
            Self::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<i64> {
        match self {
            Self::Editing { draft, .. } => Some(*draft),
            Self::Viewing => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Whether the open session (if any) targets `id`.
    pub fn is_editing_player(&self, id: PlayerId) -> bool {
        self.target() == Some(id)
    }
}

/// Lower bound applied to drafts.
///
/// `Zero` clamps direct entry at zero and stops decrement at zero, or at
/// the player's stored total when that is already negative. `Unbounded`
/// lets a draft go negative and leaves any validation to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftFloor {
    #[default]
    Zero,
    Unbounded,
}

impl DraftFloor {
    pub fn minimum(self) -> Option<i64> {
        match self {
            Self::Zero => Some(0),
            Self::Unbounded => None,
        }
    }

    /// `draft - 1`, saturating, never below the floor or `stored`,
    /// whichever is lower.
    ///
    /// Decrement is the inverse of increment for every draft above that
    /// line.
    pub fn step_down(self, draft: i64, stored: i64) -> i64 {
        match self.minimum() {
            Some(min) if draft <= min.min(stored) => draft,
            _ => draft.saturating_sub(1),
        }
    }

    /// Raise `value` to the floor.
    pub fn clamp(self, value: i64) -> i64 {
        self.minimum().map_or(value, |min| value.max(min))
    }
}

/// Parse operator-typed text into points, never failing.
///
/// Leading whitespace and one optional sign are accepted, then the leading
/// run of ASCII digits is read and anything after it is ignored (`"12abc"`
/// is 12). Text with no leading digits (`"abc"`, `""`, `"-"`) yields 0.
/// Out-of-range values saturate.
pub fn parse_points(text: &str) -> i64 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_points_reads_plain_integers() {
        assert_eq!(parse_points("42"), 42);
        assert_eq!(parse_points("  7"), 7);
        assert_eq!(parse_points("-3"), -3);
        assert_eq!(parse_points("+5"), 5);
    }

    #[test]
    fn parse_points_ignores_trailing_junk() {
        assert_eq!(parse_points("12abc"), 12);
        assert_eq!(parse_points("3.9"), 3);
        assert_eq!(parse_points("8 points"), 8);
    }

    #[test]
    fn parse_points_falls_back_to_zero() {
        assert_eq!(parse_points("abc"), 0);
        assert_eq!(parse_points(""), 0);
        assert_eq!(parse_points("-"), 0);
        assert_eq!(parse_points("   "), 0);
    }

    #[test]
    fn parse_points_saturates() {
        assert_eq!(parse_points("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_points("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn zero_floor_stops_decrement_at_zero() {
        let floor = DraftFloor::Zero;
        assert_eq!(floor.step_down(1, 5), 0);
        assert_eq!(floor.step_down(0, 5), 0);
        assert_eq!(floor.clamp(-4), 0);
    }

    #[test]
    fn zero_floor_holds_at_negative_stored_total() {
        let floor = DraftFloor::Zero;
        assert_eq!(floor.step_down(-3, -4), -4);
        assert_eq!(floor.step_down(-4, -4), -4);
        assert_eq!(floor.step_down(0, -1), -1);
        assert_eq!(floor.step_down(-1, -1), -1);
    }

    #[test]
    fn unbounded_floor_goes_negative() {
        let floor = DraftFloor::Unbounded;
        assert_eq!(floor.step_down(0, 0), -1);
        assert_eq!(floor.clamp(-4), -4);
        assert_eq!(floor.step_down(i64::MIN, 0), i64::MIN);
    }

    #[test]
    fn increment_then_decrement_is_identity() {
        for floor in [DraftFloor::Zero, DraftFloor::Unbounded] {
            for draft in [-7, -1, 0, 1, 5, 100] {
                assert_eq!(floor.step_down(draft + 1, draft), draft);
            }
        }
    }

    #[test]
    fn edit_state_accessors() {
        let state = EditState::Editing {
            target: PlayerId(2),
            draft: 5,
        };
        assert!(state.is_editing());
        assert!(state.is_editing_player(PlayerId(2)));
        assert!(!state.is_editing_player(PlayerId(1)));
        assert_eq!(state.draft(), Some(5));
        assert_eq!(EditState::default().target(), None);
    }
}
