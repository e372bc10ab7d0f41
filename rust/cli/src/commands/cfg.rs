//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, one `{ value, source }` entry
//! per setting:
//!
//! ```json
//! {
//!   "starting_stack": { "value": 150, "source": "default" },
//!   "players": { "value": 6, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "rounds": {
            "value": config.rounds,
            "source": sources.rounds,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
    });
    let text = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", text)?;
    Ok(())
}
