use std::fmt;

use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Stable identity of a seated player; used in every notification and
/// submission crossing the engine boundary.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Represents a player decision during a betting street.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the round
    Fold,
    /// Match the current water-mark (a check when nothing is owed)
    Call,
    /// Put in the given number of chips this action; counts as a raise
    /// when it exceeds the amount owed
    Raise(u32),
}

/// Showdown response for a player's two hole cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub enum RevealChoice {
    /// No response recorded yet this round
    #[default]
    Undecided,
    ShowLeft,
    ShowRight,
    ShowBoth,
    Muck,
}

impl RevealChoice {
    /// Only a full reveal keeps a player in contention at showdown.
    pub fn keeps_hand(self) -> bool {
        matches!(self, RevealChoice::ShowBoth)
    }
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 150;

/// Per-round record for one seat: stack, hole cards, street flags and
/// showdown display state. Owned and mutated only by the engine.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    stack: u32,
    hole: [Option<Card>; 2],
    folded: bool,
    all_in: bool,
    pub(crate) is_dealer: bool,
    pub(crate) is_small_blind: bool,
    pub(crate) is_big_blind: bool,
    /// Chips committed during the current street
    street_commitment: u32,
    pub(crate) acted: bool,
    reveal: RevealChoice,
    pub(crate) winner: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: [None, None],
            folded: false,
            all_in: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            street_commitment: 0,
            acted: false,
            reveal: RevealChoice::Undecided,
            winner: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn has_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }
    pub fn street_commitment(&self) -> u32 {
        self.street_commitment
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }
    pub fn reveal_choice(&self) -> RevealChoice {
        self.reveal
    }
    pub fn is_winner(&self) -> bool {
        self.winner
    }

    /// Still able to take a decision this street.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.stack > 0
    }

    /// Both hole cards, if the player holds a full hand.
    pub fn hand(&self) -> Option<[Card; 2]> {
        match self.hole {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), GameError> {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
            Ok(())
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
            Ok(())
        } else {
            Err(GameError::HoleCardsFull)
        }
    }

    pub fn clear_cards(&mut self) {
        self.hole = [None, None];
    }

    /// Clears everything that only lives for one round.
    pub fn reset_for_round(&mut self) {
        self.clear_cards();
        self.folded = false;
        self.all_in = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.street_commitment = 0;
        self.acted = false;
        self.reveal = RevealChoice::Undecided;
        self.winner = false;
    }

    pub(crate) fn reset_street(&mut self) {
        self.street_commitment = 0;
        self.acted = false;
    }

    pub fn fold(&mut self) {
        self.clear_cards();
        self.folded = true;
    }

    /// Records the showdown response; anything but a full reveal mucks.
    pub(crate) fn set_reveal(&mut self, choice: RevealChoice) {
        self.reveal = choice;
    }

    /// Moves up to `amount` chips from the stack into this street's
    /// commitment and returns what was actually committed.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.street_commitment += paid;
        if self.stack == 0 {
            self.all_in = true;
        }
        paid
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn set_stack(&mut self, stack: u32) {
        self.stack = stack;
    }
}
