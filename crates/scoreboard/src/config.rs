//! CLI configuration: thin wrapper around `scoreboard_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --timeout, --output, ...) on top of file + environment.

use std::path::PathBuf;

use clap::ValueEnum;

use scoreboard_api::PlayerClient;
use scoreboard_core::Coordinator;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use scoreboard_config::{Config, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` if given, else the platform path.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(scoreboard_config::config_path)
}

/// Load the config file + environment, then apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config_from(&config_path(global))?;

    if let Some(ref server) = global.server {
        cfg.server.clone_from(server);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.allow_negative {
        cfg.allow_negative = true;
    }
    if global.insecure {
        cfg.insecure = true;
    }

    cfg.validate()?;
    Ok(cfg)
}

/// Everything a command handler needs beyond its own arguments.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Settings {
    pub fn resolve(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = load(global)?;

        let output = match global.output {
            Some(format) => format,
            None => parse_choice::<OutputFormat>("defaults.output", &config.defaults.output)?,
        };
        let color_mode = match global.color {
            Some(mode) => mode,
            None => parse_choice::<ColorMode>("defaults.color", &config.defaults.color)?,
        };

        Ok(Self {
            output,
            color: output::should_color(color_mode),
            quiet: global.quiet,
            yes: global.yes,
            config,
        })
    }

    /// Build the coordinator over the configured server.
    pub fn coordinator(&self) -> Result<Coordinator<PlayerClient>, CliError> {
        let client = PlayerClient::new(&self.config.server, &self.config.transport_config())?;
        Ok(Coordinator::new(client, self.config.coordinator_config()))
    }
}

fn parse_choice<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
