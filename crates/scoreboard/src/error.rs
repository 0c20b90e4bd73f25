//! CLI error types with miette diagnostics.
//!
//! Maps coordinator and store failures into user-facing errors with
//! actionable help text.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use scoreboard_config::ConfigError;
use scoreboard_core::{CoordinatorError, PlayerId, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Scoreboard server unavailable: {reason}")]
    #[diagnostic(
        code(scoreboard::unavailable),
        help(
            "Check that the scoreboard server is running and reachable.\n\
             Try: scoreboard health --server <URL>"
        )
    )]
    Unavailable { reason: String },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(scoreboard::tls_error),
        help(
            "Use --insecure (-k) to accept a self-signed certificate, \
             or set ca_cert in the config file."
        )
    )]
    Tls { reason: String },

    #[error("Scoreboard server reports status '{status}'")]
    #[diagnostic(code(scoreboard::unhealthy))]
    Unhealthy { status: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(scoreboard::not_found),
        help("Run: scoreboard {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Server rejected the request: {message}")]
    #[diagnostic(code(scoreboard::rejected))]
    Rejected { message: String },

    #[error("A change to player {id} is still in progress")]
    #[diagnostic(
        code(scoreboard::busy),
        help("Wait for the pending change to finish, then try again.")
    )]
    Busy { id: PlayerId },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(scoreboard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(scoreboard::config),
        help("Check the config file. Show it with: scoreboard config show")
    )]
    Config(Box<ConfigError>),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(scoreboard::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(scoreboard::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(scoreboard::not_interactive),
        help("Use the 'players' subcommands for scripted changes.")
    )]
    NotInteractive { command: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {timeout:?}")]
    #[diagnostic(
        code(scoreboard::timeout),
        help("Increase timeout with --timeout or check server responsiveness.")
    )]
    Timeout { timeout: Duration },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unavailable { .. } | Self::Tls { .. } | Self::Unhealthy { .. } => {
                exit_code::CONNECTION
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Busy { .. } | Self::ConfigExists { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::Rejected { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NotInteractive { .. } => exit_code::USAGE,
            Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }

    pub(crate) fn player_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource_type: "player".into(),
            identifier: id.to_string(),
            list_command: "players list".into(),
        }
    }
}

// ── Core / config error mapping ──────────────────────────────────────

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StoreUnavailable { reason } => Self::Unavailable { reason },
            StoreError::NotFound { id } => Self::player_not_found(id),
            StoreError::ConstraintViolation { message } => Self::Rejected { message },
            StoreError::Timeout { timeout } => Self::Timeout { timeout },
        }
    }
}

impl From<CoordinatorError> for CliError {
    fn from(err: CoordinatorError) -> Self {
        match err {
            CoordinatorError::Store(e) => e.into(),
            CoordinatorError::EmptyName => Self::Validation {
                field: "name".into(),
                reason: "must not be empty".into(),
            },
            CoordinatorError::NotInMirror { id } => Self::player_not_found(id),
            CoordinatorError::NoActiveEdit => Self::Validation {
                field: "edit".into(),
                reason: "no edit session is open".into(),
            },
            CoordinatorError::Busy { id } => Self::Busy { id },
        }
    }
}

impl From<scoreboard_api::Error> for CliError {
    fn from(err: scoreboard_api::Error) -> Self {
        match err {
            scoreboard_api::Error::InvalidUrl(e) => Self::Validation {
                field: "server".into(),
                reason: e.to_string(),
            },
            scoreboard_api::Error::Tls(reason) => Self::Tls { reason },
            other => StoreError::from(other).into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(Box::new(other)),
        }
    }
}
