use thiserror::Error;

use crate::game::Phase;
use crate::player::PlayerId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("No player with chips left at the table")]
    NoActivePlayer,
    #[error("At least two players with chips are needed, found {found}")]
    NotEnoughPlayers { found: usize },
    #[error("Dealer seat {seat} is out of range for {seats} seats")]
    InvalidDealerSeat { seat: usize, seats: usize },
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Hole cards already full")]
    HoleCardsFull,
    #[error("{operation} is not allowed in phase {phase:?}")]
    InvalidPhase { operation: &'static str, phase: Phase },
    #[error("Pots for this round were already paid out")]
    AlreadySettled,
    #[error("Pot of {amount} chips has no unfolded claimant")]
    PotWithoutClaimant { amount: u32 },
    #[error("Player {0} is not seated at this table")]
    UnknownPlayer(PlayerId),
    #[error("Decision state poisoned")]
    StatePoisoned,
    #[error("Decision channel for player {0} closed before a response arrived")]
    DecisionChannelClosed(PlayerId),
}
