//! Hand evaluation command.
//!
//! Parses 5 to 7 cards in short notation (`Ah`, `Td`, `10c`) and prints the
//! best five-card hand they contain.

use std::collections::HashSet;
use std::io::Write;

use holdem_engine::cards::Card;
use holdem_engine::hand::best_of_seven;

use crate::error::CliError;
use crate::formatters::{format_board, format_hand};

pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let parsed = parse_cards(cards)?;
    let hand = best_of_seven(&parsed);

    writeln!(out, "Cards: {}", format_board(&parsed))?;
    writeln!(out, "Best hand: {}", format_hand(&hand))?;
    writeln!(out, "Category rank: {}", hand.category.rank())?;
    if !hand.kickers.is_empty() {
        writeln!(out, "Kickers: {}", format_board(&hand.kickers))?;
    }
    Ok(())
}

/// Accepts one card per argument or several separated by spaces/commas.
fn parse_cards(args: &[String]) -> Result<Vec<Card>, CliError> {
    let mut cards = Vec::new();
    let mut seen = HashSet::new();
    for token in args
        .iter()
        .flat_map(|a| a.split([' ', ',']))
        .filter(|t| !t.is_empty())
    {
        let card: Card = token.parse().map_err(CliError::InvalidInput)?;
        if !seen.insert(card) {
            return Err(CliError::InvalidInput(format!("duplicate card '{}'", token)));
        }
        cards.push(card);
    }
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    Ok(cards)
}
