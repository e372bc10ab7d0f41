//! # holdem-engine: Multiplayer Texas Hold'em Core
//!
//! Deals cards, drives betting through four streets, layers side pots under
//! all-in conditions, ranks best five-card hands out of seven and sequences
//! the showdown reveal. Player decisions arrive asynchronously through a
//! [`decision::TableHandle`]; the engine suspends on each prompt until the
//! matching response is submitted.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Shuffled, depleting deck over a ChaCha20 RNG
//! - [`player`] - Per-round player state, actions and reveal choices
//! - [`rules`] - Action validation and blind placement
//! - [`decision`] - Single-shot decision slots, observer hooks, table handle
//! - [`betting`] - One street of betting
//! - [`pot`] - Layered side pots per street
//! - [`hand`] - Hand evaluation and comparison
//! - [`showdown`] - Reveal ordering and mucking
//! - [`game`] - Round phase state machine and payout
//! - [`table`] - Multi-round session loop with seat changes
//! - [`logger`] - Round history records in JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{best_of_seven, Category};
//!
//! let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "10h", "2c", "3d"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let best = best_of_seven(&cards);
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Reproducible Shuffles
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
//! ```

pub mod betting;
pub mod cards;
pub mod decision;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod showdown;
pub mod table;
