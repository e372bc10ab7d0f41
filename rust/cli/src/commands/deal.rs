//! Deal command: shuffles one deck and shows every player's hole cards plus
//! a full board. Cards go out one at a time around the table, as at a real
//! table, so a seed reproduces the same deal.

use std::io::Write;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;

use crate::config::{self, MAX_PLAYERS};
use crate::error::CliError;
use crate::formatters::format_board;

pub fn handle_deal_command(
    players: Option<usize>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let players = players.unwrap_or(cfg.players);
    if !(2..=MAX_PLAYERS).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "players must be between 2 and {MAX_PLAYERS}"
        )));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(2); players];
    for _ in 0..2 {
        for hand in hands.iter_mut() {
            hand.push(deck.deal_card()?);
        }
    }
    let board = deck.deal(5)?;

    writeln!(out, "Seed: {}", seed)?;
    for (i, hand) in hands.iter().enumerate() {
        writeln!(out, "Hole P{}: {}", i, format_board(hand))?;
    }
    writeln!(out, "Board: {}", format_board(&board))?;
    Ok(())
}
