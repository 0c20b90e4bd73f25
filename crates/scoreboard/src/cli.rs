//! Clap derive structures for the `scoreboard` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scoreboard -- administer player rosters and point totals
#[derive(Debug, Parser)]
#[command(
    name = "scoreboard",
    version,
    about = "Administer scoreboard players and points from the command line",
    long_about = "Add, remove, and re-score players on a scoreboard server.\n\n\
        Point changes are drafted locally and only sent when saved, \
        one player at a time.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "SCOREBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Scoreboard server URL (overrides config)
    #[arg(long, short = 'S', env = "SCOREBOARD_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "SCOREBOARD_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Seconds allowed for each server request
    #[arg(long, env = "SCOREBOARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Let point drafts go below zero
    #[arg(long, global = true)]
    pub allow_negative: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one record per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, add, re-score, and remove players
    #[command(alias = "p")]
    Players(PlayersArgs),

    /// Interactive admin session
    Admin,

    /// Check that the scoreboard server is up
    Health,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Players ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlayersArgs {
    #[command(subcommand)]
    pub command: PlayersCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlayersCommand {
    /// List players, highest points first
    #[command(alias = "ls")]
    List,

    /// Add a player with zero points
    Add {
        /// Display name (surrounding whitespace is trimmed)
        name: String,
    },

    /// Change a player's points and save
    ///
    /// Steps apply in order: --set, then --inc, then --dec.
    Edit(EditArgs),

    /// Remove a player
    #[command(alias = "rm")]
    Remove {
        /// Player ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Player ID
    pub id: i64,

    /// Replace the points first (unparseable text counts as 0)
    #[arg(long, allow_hyphen_values = true)]
    pub set: Option<String>,

    /// Add N points, one step at a time
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub inc: u32,

    /// Subtract N points, one step at a time
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub dec: u32,

    /// Show the resulting points without saving
    #[arg(long)]
    pub dry_run: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file (prompts for the server unless --yes)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
