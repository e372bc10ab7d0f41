//! # holdem-ai: Bot Seats for Hold'em Tables
//!
//! Policies that answer the engine's prompts without a human at the seat,
//! and a [`BotTable`] observer that routes every prompt of a table to the
//! policy assigned to the acting player.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait for betting and reveal decisions
//! - [`baseline`] - Deterministic rule-based policy
//! - [`passive`] - Always calls, always shows
//! - [`create_ai`] - Factory by policy name
//! - [`BotTable`] - [`TableObserver`] driving bot seats
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use holdem_ai::{create_ai, BotTable};
//! use holdem_engine::game::Game;
//! use holdem_engine::player::{Player, PlayerId, STARTING_STACK};
//!
//! let bots = Arc::new(BotTable::new(create_ai("baseline").unwrap()));
//! let players = (0..3)
//!     .map(|i| Player::new(PlayerId(i), format!("bot{i}"), STARTING_STACK))
//!     .collect();
//! let mut game = Game::new(players, bots).with_seed(42);
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let summary = rt.block_on(game.play_round(0)).unwrap();
//! assert_eq!(summary.board.len(), 5);
//! ```

use std::collections::HashMap;

use holdem_engine::decision::{ActionRequest, RevealRequest, TableHandle, TableObserver};
use holdem_engine::player::{PlayerAction, PlayerId, RevealChoice};

pub mod baseline;
pub mod passive;

/// Decision policy for one seat.
///
/// Implementations must be deterministic for a given request so seeded
/// simulations replay identically.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::AIOpponent;
/// use holdem_engine::decision::{ActionRequest, RevealRequest};
/// use holdem_engine::player::{PlayerAction, RevealChoice};
///
/// struct Folder;
///
/// impl AIOpponent for Folder {
///     fn decide(&self, _request: &ActionRequest) -> PlayerAction {
///         PlayerAction::Fold
///     }
///
///     fn reveal(&self, _request: &RevealRequest) -> RevealChoice {
///         RevealChoice::Muck
///     }
///
///     fn name(&self) -> &str {
///         "Folder"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Betting decision for the prompted player.
    fn decide(&self, request: &ActionRequest) -> PlayerAction;

    /// Showdown reveal choice for the prompted player.
    fn reveal(&self, request: &RevealRequest) -> RevealChoice;

    fn name(&self) -> &str;
}

/// Names accepted by [`create_ai`].
pub const AI_TYPES: &[&str] = &["baseline", "passive"];

/// Creates a policy by name; `None` for an unknown name.
///
/// ```rust
/// use holdem_ai::create_ai;
///
/// assert_eq!(create_ai("baseline").unwrap().name(), "BaselineAI");
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        "passive" => Some(Box::new(passive::PassiveAI)),
        _ => None,
    }
}

/// Answers every prompt of a table from bot policies: a per-seat policy when
/// one is assigned, the default policy otherwise.
pub struct BotTable {
    default: Box<dyn AIOpponent>,
    seats: HashMap<PlayerId, Box<dyn AIOpponent>>,
}

impl BotTable {
    pub fn new(default: Box<dyn AIOpponent>) -> Self {
        Self {
            default,
            seats: HashMap::new(),
        }
    }

    pub fn with_seat(mut self, player: PlayerId, policy: Box<dyn AIOpponent>) -> Self {
        self.seats.insert(player, policy);
        self
    }

    pub fn policy_for(&self, player: PlayerId) -> &dyn AIOpponent {
        self.seats
            .get(&player)
            .map_or(self.default.as_ref(), |p| p.as_ref())
    }
}

impl TableObserver for BotTable {
    fn on_action_requested(&self, table: &TableHandle, request: &ActionRequest) {
        let policy = self.policy_for(request.player);
        let action = policy.decide(request);
        tracing::trace!(
            player = %request.player,
            bot = policy.name(),
            action = ?action,
            "bot decision"
        );
        if let Err(e) = table.submit_action(request.player, action) {
            tracing::warn!(
                player = %request.player,
                error = %e,
                "bot decision rejected, calling instead"
            );
            if let Err(e) = table.submit_action(request.player, PlayerAction::Call) {
                tracing::error!(player = %request.player, error = %e, "fallback call rejected");
            }
        }
    }

    fn on_reveal_requested(&self, table: &TableHandle, request: &RevealRequest) {
        let choice = self.policy_for(request.player).reveal(request);
        if let Err(e) = table.submit_reveal(request.player, choice) {
            tracing::error!(player = %request.player, error = %e, "bot reveal failed");
        }
    }
}
