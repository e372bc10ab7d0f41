use crate::cards::Card;
use crate::decision::{RevealRequest, TableHandle, TableObserver};
use crate::errors::GameError;
use crate::player::{Player, PlayerId};

/// Sequences reveal prompts among the players who reached showdown.
///
/// Prompting starts at the last river raiser when still in the hand,
/// otherwise at the first contender after the dealer. Anyone who does not
/// show both cards is mucked, except the final player when every other
/// contender has already mucked: that player is still prompted, but the
/// answer is only recorded.
pub struct ShowdownCoordinator<'a> {
    players: &'a mut [Player],
    dealer_seat: usize,
    river_raiser: Option<PlayerId>,
    table: &'a TableHandle,
    observer: &'a dyn TableObserver,
    community: &'a [Card],
}

impl<'a> ShowdownCoordinator<'a> {
    pub fn new(
        players: &'a mut [Player],
        dealer_seat: usize,
        river_raiser: Option<PlayerId>,
        table: &'a TableHandle,
        observer: &'a dyn TableObserver,
        community: &'a [Card],
    ) -> Self {
        Self {
            players,
            dealer_seat,
            river_raiser,
            table,
            observer,
            community,
        }
    }

    /// Seats of the contenders in prompt order.
    pub fn reveal_order(&self) -> Vec<usize> {
        let contenders: Vec<usize> = (0..self.players.len())
            .filter(|&i| !self.players[i].has_folded())
            .collect();
        let from_raiser = self.river_raiser.and_then(|raiser| {
            contenders
                .iter()
                .position(|&i| self.players[i].id() == raiser)
        });
        let start = from_raiser.unwrap_or_else(|| {
            contenders
                .iter()
                .position(|&seat| seat > self.dealer_seat)
                .unwrap_or(0)
        });
        let n = contenders.len();
        (0..n).map(|k| contenders[(start + k) % n]).collect()
    }

    /// Runs every prompt and returns the players in the order they were asked.
    pub async fn run(self) -> Result<Vec<PlayerId>, GameError> {
        let order = self.reveal_order();
        let mut prompted = Vec::with_capacity(order.len());

        for (k, &seat) in order.iter().enumerate() {
            let last_standing = k + 1 == order.len()
                && order[..k]
                    .iter()
                    .all(|&s| !self.players[s].reveal_choice().keeps_hand());

            let player = &self.players[seat];
            let request = RevealRequest {
                player: player.id(),
                hole_cards: player.hand(),
                community: self.community.to_vec(),
                last_standing,
            };
            let rx = self.table.request_reveal(request.player)?;
            self.observer.on_reveal_requested(self.table, &request);
            let choice = rx
                .await
                .map_err(|_| GameError::DecisionChannelClosed(request.player))?;

            let player = &mut self.players[seat];
            player.set_reveal(choice);
            prompted.push(player.id());
            if !last_standing && !choice.keeps_hand() {
                tracing::debug!(player = %player.id(), choice = ?choice, "hand mucked at showdown");
                player.fold();
            }
        }

        Ok(prompted)
    }
}
