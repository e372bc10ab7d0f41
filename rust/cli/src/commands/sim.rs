//! Simulation command: bot seats play rounds at one table.
//!
//! Every seat is driven by the same policy from `holdem_ai::create_ai`. The
//! table stops after `--rounds` rounds or as soon as fewer than two seats
//! have chips. Odd chips left over from split pots are not paid to anyone,
//! so the closing conservation check accounts for them explicitly.

use std::sync::Arc;

use holdem_ai::{create_ai, BotTable, AI_TYPES};
use holdem_engine::game::{Game, RoundSummary};
use holdem_engine::logger::RoundLogger;
use holdem_engine::player::{Player, PlayerId};
use holdem_engine::table::{Table, TableConfig};
use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

/// Flags of the `sim` subcommand; `None` falls back to the resolved config.
#[derive(Debug, Default)]
pub struct SimArgs {
    pub rounds: Option<usize>,
    pub players: Option<usize>,
    pub seed: Option<u64>,
    pub stack: Option<u32>,
    pub ai: String,
    pub output: Option<String>,
}

pub fn handle_sim_command(
    args: SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = config::load()?;
    if let Some(rounds) = args.rounds {
        cfg.rounds = rounds;
    }
    if let Some(players) = args.players {
        cfg.players = players;
    }
    if let Some(stack) = args.stack {
        cfg.starting_stack = stack;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    config::validate(&cfg).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let policy = create_ai(&args.ai).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "unknown AI type '{}', expected one of: {}",
            args.ai,
            AI_TYPES.join(", ")
        ))
    })?;
    let policy_name = policy.name().to_string();
    let seed = cfg.seed.unwrap_or_else(rand::random);

    let seats: Vec<Player> = (0..cfg.players)
        .map(|i| Player::new(PlayerId(i as u32), format!("bot{i}"), cfg.starting_stack))
        .collect();
    let game = Game::new(seats, Arc::new(BotTable::new(policy))).with_seed(seed);
    let mut table = Table::from_game(
        game,
        TableConfig {
            starting_stack: cfg.starting_stack,
        },
    );
    if let Some(path) = &args.output {
        table = table.with_logger(RoundLogger::create(path)?);
    }

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let rounds = runtime.block_on(table.play(cfg.rounds))?;
    if rounds.len() < cfg.rounds {
        ui::display_warning(
            err,
            &format!(
                "Table stopped after {} of {} rounds: fewer than two players with chips",
                rounds.len(),
                cfg.rounds
            ),
        )?;
    }

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Policy: {}", policy_name)?;
    writeln!(out, "Rounds played: {}", rounds.len())?;
    if let Some(path) = &args.output {
        writeln!(out, "Round records: {}", path)?;
    }
    writeln!(out, "Final stacks:")?;
    for p in table.game().players() {
        writeln!(out, "  {} {}: {}", p.id(), p.name(), p.stack())?;
    }

    let issued = cfg.starting_stack as u64 * cfg.players as u64;
    let in_play = table.game().chips_in_play() as u64;
    let unclaimed = unclaimed_chips(&rounds);
    if in_play + unclaimed != issued {
        return Err(CliError::Internal(format!(
            "chip conservation violated: {} in play + {} unclaimed != {} issued",
            in_play, unclaimed, issued
        )));
    }
    writeln!(
        out,
        "Chip conservation: ok ({} in play, {} unclaimed)",
        in_play, unclaimed
    )?;
    Ok(())
}

/// Chips placed in pots but paid to nobody, summed over all rounds.
fn unclaimed_chips(rounds: &[RoundSummary]) -> u64 {
    rounds
        .iter()
        .map(|r| {
            let pots: u64 = r.pots.iter().map(|p| p.amount as u64).sum();
            let paid: u64 = r.payouts.iter().map(|p| p.amount as u64).sum();
            pots - paid
        })
        .sum()
}
