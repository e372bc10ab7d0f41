//! Card, board, and action formatters for terminal display.
//!
//! Suits render as Unicode symbols (♥ ♦ ♣ ♠) where the terminal is expected
//! to support them, and fall back to `h d c s` otherwise. On Windows the
//! check looks for a modern terminal (WT_SESSION, TERM_PROGRAM,
//! VSCODE_INJECTION); Unix-like systems are assumed to support Unicode.
//!
//! ## Example
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::hand::EvaluatedHand;
use holdem_engine::rules::ValidatedAction;

pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
    }
}

/// Single-character rank (2-9, T, J, Q, K, A).
pub fn format_rank(rank: &Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards in bracket notation, `[]` when empty.
///
/// ```rust
/// use holdem_engine::cards::{Card, Rank, Suit};
/// # use holdem_cli::formatters::format_board;
///
/// let flop = vec![
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Hearts),
///     Card::new(Rank::Queen, Suit::Diamonds),
/// ];
/// let formatted = format_board(&flop);
/// assert!(formatted.starts_with("[A"));
/// assert!(formatted.ends_with("]"));
/// ```
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Human-readable form of an applied decision.
///
/// ```rust
/// use holdem_engine::rules::ValidatedAction;
/// # use holdem_cli::formatters::format_action;
///
/// assert_eq!(format_action(&ValidatedAction::Fold), "fold");
/// assert_eq!(format_action(&ValidatedAction::Call(0)), "check");
/// assert_eq!(format_action(&ValidatedAction::Raise(12)), "raise 12");
/// ```
pub fn format_action(action: &ValidatedAction) -> String {
    match action {
        ValidatedAction::Fold => "fold".to_string(),
        ValidatedAction::Call(0) => "check".to_string(),
        ValidatedAction::Call(n) => format!("call {}", n),
        ValidatedAction::Raise(n) => format!("raise {}", n),
    }
}

/// Category name followed by the five cards in comparison order.
pub fn format_hand(hand: &EvaluatedHand) -> String {
    format!("{} {}", hand.name(), format_board(&hand.cards))
}
