use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Depleting, shuffled sequence of the 52 cards used for one round.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep canonical order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    /// Uniform permutation of the remaining cards (Fisher-Yates).
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the first `n` cards.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        self.deal(1).map(|mut v| v.remove(0))
    }

    pub fn cards_left(&self) -> usize {
        self.cards.len()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}
