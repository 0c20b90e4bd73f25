//! Health command handler.

use owo_colors::OwoColorize;

use scoreboard_api::PlayerClient;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &PlayerClient, settings: &Settings) -> Result<(), CliError> {
    let health = client.health().await?;
    let healthy = health.is_ok();

    let color = settings.color;
    let server = client.base_url().to_string();
    let out = output::render_single(
        settings.output,
        &health,
        |h| {
            let mark = match (healthy, color) {
                (true, true) => "✓".green().to_string(),
                (false, true) => "✗".red().to_string(),
                (true, false) => "✓".into(),
                (false, false) => "✗".into(),
            };
            format!(
                "{mark} {} at {}  {}",
                h.status,
                h.timestamp.to_rfc3339(),
                output::muted(&server, color)
            )
        },
        |h| h.status.clone(),
    );
    output::print_output(&out, settings.quiet);

    if healthy {
        Ok(())
    } else {
        Err(CliError::Unhealthy {
            status: health.status,
        })
    }
}
