//! Interactive admin session.
//!
//! A menu loop over the coordinator: pick a player to re-score or remove,
//! add players, reload. Failures are reported and the loop carries on;
//! a failed add keeps the typed name for the next attempt.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use scoreboard_core::{Coordinator, EditState, PlayerId, PlayerStore};

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

const MENU_TAIL: [&str; 3] = ["+ Add player", "Reload", "Quit"];

const EDIT_ACTIONS: [&str; 6] = ["+1", "-1", "Set points", "Save", "Cancel", "Remove player"];

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<S: PlayerStore>(
    coordinator: &Coordinator<S>,
    settings: &Settings,
) -> Result<(), CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NotInteractive {
            command: "admin".into(),
        });
    }

    let theme = ColorfulTheme::default();
    coordinator.reload().await?;
    let mut pending_name = String::new();

    loop {
        print_board(coordinator, settings);

        let snapshot = coordinator.snapshot();
        let items: Vec<String> = snapshot
            .iter()
            .map(|p| format!("{}  ({})", p.name, p.points))
            .chain(MENU_TAIL.iter().map(|s| (*s).to_owned()))
            .collect();

        let Some(choice) = Select::with_theme(&theme)
            .with_prompt("Choose a player or action")
            .items(items.as_slice())
            .default(0)
            .interact_opt()
            .map_err(prompt_err)?
        else {
            break;
        };

        let result = if let Some(player) = snapshot.get(choice) {
            edit_player(coordinator, player.id, &theme, settings).await
        } else {
            match choice - snapshot.len() {
                0 => add_player(coordinator, &theme, &mut pending_name, settings).await,
                1 => coordinator.reload().await.map(|_| ()).map_err(CliError::from),
                _ => break,
            }
        };
        if let Err(err) = result {
            util::report(err);
        }
    }

    coordinator.cancel();
    Ok(())
}

// ── Screens ─────────────────────────────────────────────────────────

fn print_board<S: PlayerStore>(coordinator: &Coordinator<S>, settings: &Settings) {
    let players = coordinator.snapshot();
    if players.is_empty() {
        eprintln!("{}", output::muted("No players yet.", settings.color));
        return;
    }
    eprintln!("{}", output::render_table(&output::player_rows(&players)));
    if !coordinator.is_sorted() {
        eprintln!(
            "{}",
            output::muted("Order is stale; reload to re-sort.", settings.color)
        );
    }
}

async fn add_player<S: PlayerStore>(
    coordinator: &Coordinator<S>,
    theme: &ColorfulTheme,
    pending_name: &mut String,
    settings: &Settings,
) -> Result<(), CliError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Player name")
        .with_initial_text(pending_name.as_str())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    match coordinator.add_player(&name).await {
        Ok(player) => {
            pending_name.clear();
            eprintln!(
                "{} Added {} (id {})",
                check(settings.color),
                player.name,
                player.id
            );
            Ok(())
        }
        Err(err) => {
            *pending_name = name;
            Err(err.into())
        }
    }
}

async fn edit_player<S: PlayerStore>(
    coordinator: &Coordinator<S>,
    id: PlayerId,
    theme: &ColorfulTheme,
    settings: &Settings,
) -> Result<(), CliError> {
    coordinator.start_edit(id)?;
    let name = coordinator.player(id).map(|p| p.name).unwrap_or_default();

    loop {
        let EditState::Editing { draft, .. } = coordinator.edit_state() else {
            return Ok(());
        };

        let action = Select::with_theme(theme)
            .with_prompt(format!(
                "{name}: {}",
                output::points(draft, settings.color)
            ))
            .items(&EDIT_ACTIONS)
            .default(0)
            .interact_opt()
            .map_err(prompt_err)?;

        match action {
            Some(0) => {
                coordinator.increment()?;
            }
            Some(1) => {
                coordinator.decrement()?;
            }
            Some(2) => {
                let text: String = Input::with_theme(theme)
                    .with_prompt("Points")
                    .with_initial_text(draft.to_string())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_err)?;
                coordinator.set_direct(&text)?;
            }
            Some(3) => {
                let saved = coordinator.save().await?;
                eprintln!(
                    "{} {} now has {}",
                    check(settings.color),
                    saved.name,
                    output::points(saved.points, settings.color)
                );
                return Ok(());
            }
            Some(5) => {
                coordinator.cancel();
                let prompt = format!("Remove player '{name}' (id {id})?");
                if util::confirm(&prompt, settings.yes, "remove")? {
                    let removed = coordinator.remove_player(id).await?;
                    eprintln!("{} Removed {}", check(settings.color), removed.name);
                }
                return Ok(());
            }
            _ => {
                coordinator.cancel();
                return Ok(());
            }
        }
    }
}

fn check(color: bool) -> String {
    if color {
        "✓".green().to_string()
    } else {
        "✓".into()
    }
}
