//! Command-line definitions for the `holdem` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Holdem table engine CLI",
    after_help = "Settings resolve as defaults < HOLDEM_CONFIG file < HOLDEM_* env < flags."
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds between bot seats and report the final stacks
    Sim {
        /// Most rounds to play; the table also stops when one player has all the chips
        #[arg(long)]
        rounds: Option<usize>,
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Starting stack per seat, also used for rebuys
        #[arg(long)]
        stack: Option<u32>,
        /// Bot policy for every seat
        #[arg(long, default_value = "baseline")]
        ai: String,
        /// Write one JSON round record per line to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Evaluate the best five-card hand from 5 to 7 cards, e.g. `Ah Kd 10c 7s 2h`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Shuffle a deck and show hole cards for each player plus a board
    Deal {
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the resolved configuration with the source of each value
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        HoldemCli::command().debug_assert();
    }

    #[test]
    fn eval_collects_positional_cards() {
        let cli =
            HoldemCli::try_parse_from(["holdem", "eval", "Ah", "Kd", "10c", "7s", "2h"]).unwrap();
        match cli.cmd {
            Commands::Eval { cards } => assert_eq!(cards.len(), 5),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
