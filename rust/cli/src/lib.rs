//! # Holdem CLI Library
//!
//! Command-line driver for the `holdem-engine` table engine. The binary is a
//! thin wrapper around [`run`], which parses arguments and dispatches to a
//! subcommand while writing to caller-supplied streams, so tests can capture
//! the output.
//!
//! ## Available Subcommands
//!
//! - `sim`: play rounds between bot seats, optionally writing JSONL round records
//! - `eval`: best five-card hand from 5 to 7 cards
//! - `deal`: shuffle a deck and show hole cards plus a board
//! - `cfg`: print the resolved configuration with value sources
//!
//! ## Example
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "deal", "--seed", "42"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Board:"));
//! ```

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command, SimArgs,
};

pub use error::CliError;

/// Parses `args` (program name first) and runs the subcommand.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] on success and for
/// `--help`/`--version`, [`exit_code::ERROR`] for usage errors and failed
/// commands. Failures are reported on `err` as `Error: <message>`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["sim", "eval", "deal", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string(), COMMANDS);
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            rounds,
            players,
            seed,
            stack,
            ai,
            output,
        } => handle_sim_command(
            SimArgs {
                rounds,
                players,
                seed,
                stack,
                ai,
                output,
            },
            out,
            err,
        ),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Deal { players, seed } => handle_deal_command(players, seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_message: &str, commands: &[&str]) -> std::io::Result<()> {
    writeln!(err, "{}", clap_message)?;
    writeln!(err)?;
    writeln!(err, "Holdem CLI")?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in commands {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}
