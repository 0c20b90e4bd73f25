//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Settings};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { force } => {
            let path = config::config_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            if let Some(ref server) = global.server {
                cfg.server.clone_from(server);
            }
            if let Some(timeout) = global.timeout {
                cfg.timeout = timeout;
            }
            cfg.allow_negative = global.allow_negative;
            cfg.insecure = global.insecure;

            if !global.yes && std::io::stdin().is_terminal() {
                eprintln!("Config path: {}\n", path.display());
                cfg.server = Input::new()
                    .with_prompt("Scoreboard server URL")
                    .default(cfg.server)
                    .interact_text()
                    .map_err(prompt_err)?;
            }
            cfg.validate()?;

            config::save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("\n  Test it: scoreboard health");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let settings = Settings::resolve(global)?;
            let out = output::render_single(
                settings.output,
                &settings.config,
                |cfg| toml::to_string_pretty(cfg).unwrap_or_default(),
                |cfg| cfg.server.clone(),
            );
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path(global).display());
            Ok(())
        }
    }
}
