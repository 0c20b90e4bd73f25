//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one tab-separated record per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use scoreboard_core::Player;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Bold a point total when color is on.
pub fn points(value: i64, color: bool) -> String {
    if color {
        value.bold().to_string()
    } else {
        value.to_string()
    }
}

/// Dim secondary text when color is on.
pub fn muted(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_owned()
    }
}

// ── Player rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct PlayerRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Player")]
    pub name: String,
    #[tabled(rename = "Points")]
    pub points: i64,
}

/// Rows numbered in the order given.
pub fn player_rows(players: &[Player]) -> Vec<PlayerRow> {
    players
        .iter()
        .enumerate()
        .map(|(idx, p)| PlayerRow {
            rank: idx + 1,
            id: p.id.get(),
            name: p.name.clone(),
            points: p.points,
        })
        .collect()
}

pub fn player_line(p: &Player) -> String {
    format!("{}\t{}\t{}", p.id, p.name, p.points)
}

/// Render the player list in the chosen format.
pub fn render_players(format: OutputFormat, players: &[Player]) -> String {
    match format {
        OutputFormat::Table => render_table(&player_rows(players)),
        OutputFormat::Json => render_json(players, false),
        OutputFormat::JsonCompact => render_json(players, true),
        OutputFormat::Yaml => render_yaml(players),
        OutputFormat::Plain => players.iter().map(player_line).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views don't use
/// the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => plain_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}
