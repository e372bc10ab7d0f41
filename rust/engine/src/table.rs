use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::decision::{TableHandle, TableObserver};
use crate::errors::GameError;
use crate::game::{Game, RoundSummary};
use crate::logger::RoundLogger;
use crate::player::{Player, PlayerId, STARTING_STACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Stack restored on rebuy
    pub starting_stack: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
        }
    }
}

/// Session loop over one [`Game`]: plays rounds, applies seat changes at
/// each boundary and rotates the dealer.
pub struct Table {
    game: Game,
    config: TableConfig,
    dealer_seat: usize,
    logger: RoundLogger,
}

impl Table {
    pub fn new(
        players: Vec<Player>,
        observer: Arc<dyn TableObserver>,
        config: TableConfig,
    ) -> Self {
        Self::from_game(Game::new(players, observer), config)
    }

    pub fn from_game(game: Game, config: TableConfig) -> Self {
        Self {
            game,
            config,
            dealer_seat: 0,
            logger: RoundLogger::detached(&Utc::now().format("%Y%m%d").to_string()),
        }
    }

    /// Writes a JSONL record of every round through `logger`.
    pub fn with_logger(mut self, logger: RoundLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn handle(&self) -> TableHandle {
        self.game.handle()
    }

    pub fn dealer_seat(&self) -> usize {
        self.dealer_seat
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    /// Plays one round at the current dealer seat. Returns `None` without
    /// playing when fewer than two seated players have chips.
    pub async fn play_round(&mut self) -> Result<Option<RoundSummary>, GameError> {
        if self.game.funded_count() < 2 {
            return Ok(None);
        }
        let summary = self.game.play_round(self.dealer_seat).await?;

        let record = self.game.round_record(self.logger.next_id());
        if let Err(e) = self.logger.write(&record) {
            tracing::warn!(round = %record.round_id, error = %e, "failed to write round record");
        }

        self.finish_round()?;
        Ok(Some(summary))
    }

    /// Plays until `max_rounds` rounds are done or the table runs out of
    /// funded players.
    pub async fn play(&mut self, max_rounds: usize) -> Result<Vec<RoundSummary>, GameError> {
        let mut rounds = Vec::new();
        while rounds.len() < max_rounds {
            match self.play_round().await? {
                Some(summary) => rounds.push(summary),
                None => break,
            }
        }
        tracing::info!(rounds = rounds.len(), "table stopped");
        Ok(rounds)
    }

    fn finish_round(&mut self) -> Result<(), GameError> {
        let dealer = self.game.dealer_seat();
        let seats_before: Vec<PlayerId> = self.game.players().iter().map(Player::id).collect();

        self.game.apply_seat_changes(self.config.starting_stack)?;

        // last remaining seat at or before the old dealer
        let anchor = seats_before[..=dealer.min(seats_before.len().saturating_sub(1))]
            .iter()
            .rev()
            .find_map(|&id| self.game.seat_of(id));
        self.dealer_seat = next_funded_seat(self.game.players(), anchor);
        Ok(())
    }
}

/// First seat after `anchor` (wrapping) whose stack is above zero; seat 0
/// when nobody has chips.
pub fn next_funded_seat(players: &[Player], anchor: Option<usize>) -> usize {
    let n = players.len();
    if n == 0 {
        return 0;
    }
    let start = anchor.map_or(0, |a| a + 1);
    (0..n)
        .map(|k| (start + k) % n)
        .find(|&seat| players[seat].stack() > 0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(stacks: &[u32]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| Player::new(PlayerId(i as u32), format!("p{i}"), s))
            .collect()
    }

    #[test]
    fn next_seat_skips_broke_players() {
        let players = seats(&[100, 0, 50]);
        assert_eq!(next_funded_seat(&players, Some(0)), 2);
        assert_eq!(next_funded_seat(&players, Some(2)), 0);
        assert_eq!(next_funded_seat(&players, None), 0);
    }

    #[test]
    fn next_seat_on_empty_table() {
        assert_eq!(next_funded_seat(&[], Some(3)), 0);
        assert_eq!(next_funded_seat(&seats(&[0, 0]), Some(0)), 0);
    }
}
