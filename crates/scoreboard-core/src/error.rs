// ── Core error types ──
//
// `StoreError` is the Player Store Interface taxonomy: consumers never see
// HTTP status codes or JSON parse failures directly. The
// `From<scoreboard_api::Error>` impl translates transport-layer errors into
// these variants. `CoordinatorError` adds the edit-state preconditions.

use std::time::Duration;

use thiserror::Error;

use crate::model::PlayerId;

/// Failure reported by a [`PlayerStore`](crate::store::PlayerStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transport or persistence unreachable. Retryable.
    #[error("Player store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// The target identity no longer exists. Refresh the mirror, don't retry.
    #[error("Player {id} not found")]
    NotFound { id: PlayerId },

    /// The store refused the input shape. Retry only with different input.
    #[error("Player store rejected the request: {message}")]
    ConstraintViolation { message: String },

    /// No answer within the per-call deadline. Retryable.
    #[error("Player store did not answer within {timeout:?}")]
    Timeout { timeout: Duration },
}

impl StoreError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the same call may succeed when repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. } | Self::Timeout { .. })
    }
}

/// Failure reported by the [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `add_player` called with a blank name. No store call was made.
    #[error("Player name must not be empty")]
    EmptyName,

    /// The requested player is not in the local mirror.
    #[error("Player {id} is not loaded; reload the player list")]
    NotInMirror { id: PlayerId },

    /// A draft operation was issued with no edit session open.
    #[error("No edit session is open")]
    NoActiveEdit,

    /// A mutation for this player is still awaiting the store's answer.
    #[error("A change to player {id} is still in progress")]
    Busy { id: PlayerId },
}

impl CoordinatorError {
    /// Returns `true` if the same call may succeed when repeated.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_retryable(),
            Self::Busy { .. } => true,
            Self::EmptyName | Self::NotInMirror { .. } | Self::NoActiveEdit => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<scoreboard_api::Error> for StoreError {
    fn from(err: scoreboard_api::Error) -> Self {
        match err {
            scoreboard_api::Error::NotFound { id } => StoreError::NotFound { id: PlayerId(id) },
            scoreboard_api::Error::Timeout { timeout } => StoreError::Timeout { timeout },
            scoreboard_api::Error::Transport(e) => StoreError::unavailable(e.to_string()),
            scoreboard_api::Error::InvalidUrl(e) => {
                StoreError::unavailable(format!("invalid URL: {e}"))
            }
            scoreboard_api::Error::Tls(msg) => StoreError::unavailable(format!("TLS error: {msg}")),
            scoreboard_api::Error::Api {
                status: 400 | 409 | 422,
                message,
            } => StoreError::ConstraintViolation { message },
            scoreboard_api::Error::Api { status, message } => {
                StoreError::unavailable(format!("HTTP {status}: {message}"))
            }
            scoreboard_api::Error::Deserialization { message, body: _ } => {
                StoreError::unavailable(format!("malformed response: {message}"))
            }
        }
    }
}
