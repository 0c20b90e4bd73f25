//! Player command handlers.

use scoreboard_core::{Coordinator, CoordinatorError, Player, PlayerId, PlayerStore};

use crate::cli::{EditArgs, PlayersArgs, PlayersCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<S: PlayerStore>(
    coordinator: &Coordinator<S>,
    args: PlayersArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        PlayersCommand::List => {
            coordinator.reload().await?;
            let out = output::render_players(settings.output, &coordinator.snapshot());
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        PlayersCommand::Add { name } => {
            let player = coordinator.add_player(&name).await?;
            let out = output::render_single(
                settings.output,
                &player,
                |p| format!("Added {} (id {})", p.name, p.id),
                output::player_line,
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        PlayersCommand::Edit(edit) => edit_points(coordinator, &edit, settings).await,

        PlayersCommand::Remove { id } => {
            coordinator.reload().await?;
            let id = PlayerId(id);
            let player = coordinator
                .player(id)
                .ok_or_else(|| CliError::player_not_found(id))?;

            let prompt = format!("Remove player '{}' (id {id})?", player.name);
            if !util::confirm(&prompt, settings.yes, "players remove")? {
                eprintln!("Aborted.");
                return Ok(());
            }

            let removed = coordinator.remove_player(id).await?;
            let out = output::render_single(
                settings.output,
                &removed,
                |p| format!("Removed {} (id {})", p.name, p.id),
                output::player_line,
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}

// ── Edit ────────────────────────────────────────────────────────────

async fn edit_points<S: PlayerStore>(
    coordinator: &Coordinator<S>,
    args: &EditArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    coordinator.reload().await?;
    let id = PlayerId(args.id);
    let before = coordinator.start_edit(id)?;
    let name = coordinator
        .player(id)
        .map(|p| p.name)
        .ok_or_else(|| CliError::player_not_found(id))?;

    let draft = apply_steps(coordinator, args, before)?;

    let (player, note) = if args.dry_run {
        coordinator.cancel();
        (Player::new(id, name, draft), " (dry run, not saved)")
    } else {
        (coordinator.save().await?, "")
    };

    let color = settings.color;
    let out = output::render_single(
        settings.output,
        &player,
        |p| {
            format!(
                "{} (id {}): {} -> {}{}",
                p.name,
                p.id,
                before,
                output::points(p.points, color),
                output::muted(note, color)
            )
        },
        output::player_line,
    );
    output::print_output(&out, settings.quiet);
    Ok(())
}

/// Apply `--set`, then `--inc`, then `--dec` to the open draft.
fn apply_steps<S: PlayerStore>(
    coordinator: &Coordinator<S>,
    args: &EditArgs,
    start: i64,
) -> Result<i64, CoordinatorError> {
    let mut draft = start;
    if let Some(ref text) = args.set {
        draft = coordinator.set_direct(text)?;
    }
    for _ in 0..args.inc {
        draft = coordinator.increment()?;
    }
    for _ in 0..args.dec {
        draft = coordinator.decrement()?;
    }
    Ok(draft)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoreboard_config::Config;
    use scoreboard_core::{CoordinatorConfig, EditState, MemoryStore};

    use super::*;
    use crate::cli::OutputFormat;

    fn settings() -> Settings {
        Settings {
            config: Config::default(),
            output: OutputFormat::Plain,
            color: false,
            quiet: true,
            yes: true,
        }
    }

    fn edit(id: i64, set: Option<&str>, inc: u32, dec: u32, dry_run: bool) -> EditArgs {
        EditArgs {
            id,
            set: set.map(str::to_owned),
            inc,
            dec,
            dry_run,
        }
    }

    async fn coordinator() -> Coordinator<MemoryStore> {
        let coordinator = Coordinator::new(
            MemoryStore::seeded([("Ann", 10), ("Bo", 5)]),
            CoordinatorConfig::default(),
        );
        coordinator.reload().await.unwrap();
        coordinator
    }

    #[tokio::test]
    async fn steps_apply_set_then_inc_then_dec() {
        let coordinator = coordinator().await;
        coordinator.start_edit(PlayerId(2)).unwrap();

        let draft = apply_steps(&coordinator, &edit(2, Some("abc"), 3, 1, false), 5).unwrap();

        assert_eq!(draft, 2);
    }

    #[tokio::test]
    async fn edit_saves_through_the_store() {
        let coordinator = coordinator().await;

        edit_points(&coordinator, &edit(2, None, 3, 0, false), &settings())
            .await
            .unwrap();

        assert_eq!(coordinator.store().get(PlayerId(2)).unwrap().points, 8);
        assert_eq!(coordinator.edit_state(), EditState::Viewing);
    }

    #[tokio::test]
    async fn dry_run_never_calls_update() {
        let coordinator = coordinator().await;

        edit_points(&coordinator, &edit(1, Some("99"), 0, 0, true), &settings())
            .await
            .unwrap();

        assert_eq!(coordinator.store().calls().update_points, 0);
        assert_eq!(coordinator.store().get(PlayerId(1)).unwrap().points, 10);
        assert_eq!(coordinator.edit_state(), EditState::Viewing);
    }

    #[tokio::test]
    async fn edit_of_unknown_player_is_not_found() {
        let coordinator = coordinator().await;

        let err = edit_points(&coordinator, &edit(9, None, 1, 0, false), &settings())
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remove_with_yes_deletes() {
        let coordinator = coordinator().await;
        let args = PlayersArgs {
            command: PlayersCommand::Remove { id: 1 },
        };

        handle(&coordinator, args, &settings()).await.unwrap();

        assert!(coordinator.store().get(PlayerId(1)).is_none());
        assert_eq!(coordinator.snapshot().len(), 1);
    }
}
