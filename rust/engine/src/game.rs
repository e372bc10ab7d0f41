use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::betting::BettingRound;
use crate::cards::Card;
use crate::deck::Deck;
use crate::decision::{TableHandle, TableObserver};
use crate::errors::GameError;
use crate::hand::{best_of_seven, compare_hands, EvaluatedHand};
use crate::logger::{ActionRecord, RoundRecord};
use crate::player::{Player, PlayerId};
use crate::pot::{Pot, PotManager};
use crate::rules::{blind_positions, BIG_BLIND, SMALL_BLIND};
use crate::showdown::ShowdownCoordinator;

/// Round phases, advanced linearly. `Showdown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    /// Community cards dealt when leaving this phase.
    fn cards_on_exit(self) -> usize {
        match self {
            Phase::PreFlop => 3,
            Phase::Flop | Phase::Turn => 1,
            Phase::River | Phase::Showdown => 0,
        }
    }

    fn next(self) -> Phase {
        match self {
            Phase::PreFlop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River | Phase::Showdown => Phase::Showdown,
        }
    }
}

/// Best hand of a player who reached showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub player: PlayerId,
    pub hand: EvaluatedHand,
}

/// Chips awarded to one winner of one pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub player: PlayerId,
    pub amount: u32,
    /// Index into the round's pot list
    pub pot_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub dealer: PlayerId,
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    pub payouts: Vec<Payout>,
    /// Showdown ranking, best hand first
    pub rankings: Vec<Ranking>,
    /// Stacks after payout, in seat order
    pub stacks: Vec<(PlayerId, u32)>,
}

/// Phase state machine for one table.
///
/// Owns the deck, the seated players and the round's pots. All mutation
/// happens on the task driving the round; collaborators only reach in
/// through the [`TableHandle`].
///
/// ```no_run
/// # use std::sync::Arc;
/// # use holdem_engine::decision::TableObserver;
/// # use holdem_engine::errors::GameError;
/// # async fn demo(observer: Arc<dyn TableObserver>) -> Result<(), GameError> {
/// use holdem_engine::game::Game;
/// use holdem_engine::player::{Player, PlayerId, STARTING_STACK};
///
/// let players = (0..3)
///     .map(|i| Player::new(PlayerId(i), format!("seat{i}"), STARTING_STACK))
///     .collect();
/// let mut game = Game::new(players, observer).with_seed(7);
/// let summary = game.play_round(0).await?;
/// println!("{:?}", summary.payouts);
/// # Ok(())
/// # }
/// ```
pub struct Game {
    players: Vec<Player>,
    deck: Deck,
    seed: Option<u64>,
    community: Vec<Card>,
    pots: PotManager,
    phase: Phase,
    dealer_seat: usize,
    handle: TableHandle,
    observer: Arc<dyn TableObserver>,
    rankings: Vec<Ranking>,
    actions: Vec<ActionRecord>,
    river_raiser: Option<PlayerId>,
    payouts: Vec<Payout>,
    round_open: bool,
    settled: bool,
}

impl Game {
    pub fn new(players: Vec<Player>, observer: Arc<dyn TableObserver>) -> Self {
        Self {
            players,
            deck: Deck::new(),
            seed: None,
            community: Vec::with_capacity(5),
            pots: PotManager::new(),
            phase: Phase::PreFlop,
            dealer_seat: 0,
            handle: TableHandle::new(),
            observer,
            rankings: Vec::new(),
            actions: Vec::new(),
            river_raiser: None,
            payouts: Vec::new(),
            round_open: false,
            settled: false,
        }
    }

    /// Seeds the deck so every shuffle of this table is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.deck = Deck::new_with_seed(seed);
        self.seed = Some(seed);
        self
    }

    /// Handle for submitting decisions and seat changes to this table.
    pub fn handle(&self) -> TableHandle {
        self.handle.clone()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    /// Seated players with chips.
    pub fn funded_count(&self) -> usize {
        self.players.iter().filter(|p| p.stack() > 0).count()
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    pub fn current_actor(&self) -> Option<PlayerId> {
        self.handle.current_actor()
    }

    pub fn dealer_seat(&self) -> usize {
        self.dealer_seat
    }

    pub fn pots(&self) -> &[Pot] {
        self.pots.pots()
    }

    /// Sum of every pot settled so far this round.
    pub fn total_pot(&self) -> u32 {
        self.pots.total()
    }

    /// Showdown ranking, best hand first. Empty before showdown.
    pub fn rankings(&self) -> &[Ranking] {
        &self.rankings
    }

    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Stacks plus street commitments plus pots not yet paid out.
    pub fn chips_in_play(&self) -> u32 {
        let seated: u32 = self
            .players
            .iter()
            .map(|p| p.stack() + p.street_commitment())
            .sum();
        if self.settled {
            seated
        } else {
            seated + self.pots.total()
        }
    }

    /// Resets round state, deals two hole cards to every funded player and
    /// posts the blinds.
    ///
    /// # Errors
    ///
    /// Rejects an empty table, an out-of-range dealer seat and tables with
    /// fewer than two funded players.
    pub fn start_round(&mut self, dealer_seat: usize) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoActivePlayer);
        }
        if dealer_seat >= self.players.len() {
            return Err(GameError::InvalidDealerSeat {
                seat: dealer_seat,
                seats: self.players.len(),
            });
        }
        match self.funded_count() {
            0 => return Err(GameError::NoActivePlayer),
            1 => return Err(GameError::NotEnoughPlayers { found: 1 }),
            _ => {}
        }

        for p in &mut self.players {
            p.reset_for_round();
            if p.stack() == 0 {
                // sits out
                p.fold();
            }
        }
        self.community.clear();
        self.pots.clear();
        self.rankings.clear();
        self.actions.clear();
        self.payouts.clear();
        self.river_raiser = None;
        self.phase = Phase::PreFlop;
        self.settled = false;
        self.round_open = true;

        self.deck.reset();
        self.deck.shuffle();
        for _ in 0..2 {
            for p in self.players.iter_mut().filter(|p| !p.has_folded()) {
                let card = self.deck.deal_card()?;
                p.give_card(card)?;
            }
        }
        self.post_blinds(dealer_seat)?;

        tracing::info!(
            dealer = %self.players[self.dealer_seat].id(),
            players = self.funded_count(),
            "round started"
        );
        self.observer.on_phase_changed(self.phase, &self.community);
        Ok(())
    }

    fn post_blinds(&mut self, dealer_seat: usize) -> Result<(), GameError> {
        let n = self.players.len();
        let dealer = (0..n)
            .map(|k| (dealer_seat + n - k) % n)
            .find(|&seat| self.players[seat].stack() > 0)
            .ok_or(GameError::NoActivePlayer)?;
        let funded: Vec<usize> = (0..n).filter(|&i| self.players[i].stack() > 0).collect();
        let dealer_pos = funded
            .iter()
            .position(|&seat| seat == dealer)
            .ok_or(GameError::NoActivePlayer)?;
        let (sb, bb) = blind_positions(dealer_pos, funded.len());

        self.dealer_seat = dealer;
        self.players[dealer].is_dealer = true;

        let small = &mut self.players[funded[sb]];
        small.is_small_blind = true;
        let posted_small = small.commit(SMALL_BLIND);
        let small_id = small.id();

        let big = &mut self.players[funded[bb]];
        big.is_big_blind = true;
        let posted_big = big.commit(BIG_BLIND);
        tracing::debug!(
            small_blind = %small_id,
            posted_small,
            big_blind = %big.id(),
            posted_big,
            "blinds posted"
        );
        Ok(())
    }

    /// Runs the betting street for the current phase and settles its
    /// commitments into pots.
    pub async fn run_betting_street(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::Showdown {
            return Err(GameError::InvalidPhase {
                operation: "run_betting_street",
                phase: self.phase,
            });
        }
        let outcome = BettingRound::new(
            self.phase,
            self.dealer_seat,
            &mut self.players,
            &self.handle,
            self.observer.as_ref(),
            &self.community,
            self.pots.total(),
        )
        .run()
        .await?;

        self.actions.extend(outcome.actions);
        if self.phase == Phase::River {
            self.river_raiser = outcome.river_raiser;
        }
        let created = self.pots.settle_street(outcome.commitments).len();
        tracing::info!(
            phase = ?self.phase,
            pots_created = created,
            total_pot = self.pots.total(),
            "street closed"
        );
        Ok(())
    }

    /// Moves to the next phase, dealing its community cards. A no-op once
    /// the round is at showdown.
    pub fn advance_phase(&mut self) -> Result<Phase, GameError> {
        if self.phase == Phase::Showdown {
            return Ok(self.phase);
        }
        let cards = self.deck.deal(self.phase.cards_on_exit())?;
        self.community.extend(cards);
        self.phase = self.phase.next();
        tracing::info!(phase = ?self.phase, board = self.community.len(), "phase advanced");
        self.observer.on_phase_changed(self.phase, &self.community);
        Ok(self.phase)
    }

    fn rank_contenders(&self) -> Vec<Ranking> {
        let mut rankings: Vec<Ranking> = self
            .players
            .iter()
            .filter(|p| !p.has_folded())
            .filter_map(|p| {
                let hole = p.hand()?;
                let mut cards = hole.to_vec();
                cards.extend_from_slice(&self.community);
                Some(Ranking {
                    player: p.id(),
                    hand: best_of_seven(&cards),
                })
            })
            .collect();
        rankings.sort_by(|a, b| compare_hands(&b.hand, &a.hand));
        rankings
    }

    /// Ranks every remaining player, then sequences the reveal prompts.
    /// Returns the players in the order they were prompted.
    pub async fn run_showdown(&mut self) -> Result<Vec<PlayerId>, GameError> {
        if self.phase != Phase::Showdown {
            return Err(GameError::InvalidPhase {
                operation: "run_showdown",
                phase: self.phase,
            });
        }
        self.rankings = self.rank_contenders();
        ShowdownCoordinator::new(
            &mut self.players,
            self.dealer_seat,
            self.river_raiser,
            &self.handle,
            self.observer.as_ref(),
            &self.community,
        )
        .run()
        .await
    }

    /// Pays out every pot of the round to its best unfolded claimants.
    ///
    /// Each pot is split evenly among the tied winners; the odd chips left
    /// by the floor division are not paid.
    ///
    /// # Errors
    ///
    /// [`GameError::PotWithoutClaimant`] if any pot has no unfolded eligible
    /// player. Nothing is paid and the pots stay in place, still counted by
    /// [`Game::chips_in_play`], until the next [`Game::start_round`]
    /// discards them; those chips leave the table.
    pub fn settle_pots(&mut self) -> Result<Vec<Payout>, GameError> {
        if self.phase != Phase::Showdown {
            return Err(GameError::InvalidPhase {
                operation: "settle_pots",
                phase: self.phase,
            });
        }
        if self.settled {
            return Err(GameError::AlreadySettled);
        }

        let contenders = self.rank_contenders();
        if self.rankings.is_empty() {
            self.rankings = contenders.clone();
        }

        let mut winners_per_pot = Vec::with_capacity(self.pots.pots().len());
        for pot in self.pots.pots() {
            let claimants: Vec<&Ranking> = contenders
                .iter()
                .filter(|r| pot.eligible.contains(&r.player))
                .collect();
            let Some(best) = claimants.first() else {
                return Err(GameError::PotWithoutClaimant { amount: pot.amount });
            };
            let winners: Vec<PlayerId> = claimants
                .iter()
                .filter(|r| compare_hands(&r.hand, &best.hand) == Ordering::Equal)
                .map(|r| r.player)
                .collect();
            winners_per_pot.push(winners);
        }

        let mut payouts = Vec::new();
        for (pot_index, (pot, winners)) in self
            .pots
            .pots()
            .iter()
            .zip(&winners_per_pot)
            .enumerate()
        {
            let share = pot.amount / winners.len() as u32;
            let unpaid = pot.amount - share * winners.len() as u32;
            if unpaid > 0 {
                tracing::debug!(pot_index, unpaid, "odd chips left in split pot");
            }
            for &id in winners {
                if let Some(p) = self.players.iter_mut().find(|p| p.id() == id) {
                    p.add_chips(share);
                    p.winner = true;
                }
                payouts.push(Payout {
                    player: id,
                    amount: share,
                    pot_index,
                });
            }
        }

        for p in &mut self.players {
            p.is_dealer = false;
        }
        self.payouts = payouts.clone();
        self.settled = true;
        self.round_open = false;
        tracing::info!(pots = self.pots.pots().len(), payouts = payouts.len(), "round settled");
        self.observer.on_round_settled(&payouts);
        Ok(payouts)
    }

    /// Plays one complete round from the blinds to the payout.
    pub async fn play_round(&mut self, dealer_seat: usize) -> Result<RoundSummary, GameError> {
        self.start_round(dealer_seat)?;
        while self.phase != Phase::Showdown {
            self.run_betting_street().await?;
            self.advance_phase()?;
        }
        self.run_showdown().await?;
        self.settle_pots()?;
        Ok(self.summary())
    }

    fn summary(&self) -> RoundSummary {
        RoundSummary {
            dealer: self.players[self.dealer_seat].id(),
            board: self.community.clone(),
            pots: self.pots.pots().to_vec(),
            payouts: self.payouts.clone(),
            rankings: self.rankings.clone(),
            stacks: self.players.iter().map(|p| (p.id(), p.stack())).collect(),
        }
    }

    /// History record of the current (or last) round.
    pub fn round_record(&self, round_id: String) -> RoundRecord {
        RoundRecord {
            round_id,
            seed: self.seed,
            dealer: self.players.get(self.dealer_seat).map(Player::id),
            actions: self.actions.clone(),
            board: self.community.clone(),
            pots: self.pots.pots().to_vec(),
            payouts: self.payouts.clone(),
            reveals: self
                .players
                .iter()
                .map(|p| (p.id(), p.reveal_choice()))
                .collect(),
            ts: None,
        }
    }

    /// Applies the leave and rebuy flags raised through the handle since the
    /// last boundary. A player flagged for both leaves. Returns the players
    /// removed from the table.
    pub fn apply_seat_changes(&mut self, starting_stack: u32) -> Result<Vec<PlayerId>, GameError> {
        if self.round_open {
            return Err(GameError::InvalidPhase {
                operation: "apply_seat_changes",
                phase: self.phase,
            });
        }
        let (leave, rebuy) = self.handle.take_lifecycle_flags()?;
        let removed: Vec<PlayerId> = self
            .players
            .iter()
            .map(Player::id)
            .filter(|id| leave.contains(id))
            .collect();
        self.players.retain(|p| !leave.contains(&p.id()));
        for p in self.players.iter_mut().filter(|p| rebuy.contains(&p.id())) {
            tracing::info!(player = %p.id(), from = p.stack(), to = starting_stack, "rebuy");
            p.set_stack(starting_stack);
        }
        for id in &removed {
            tracing::info!(player = %id, "player left the table");
        }
        if self.dealer_seat >= self.players.len() {
            self.dealer_seat = 0;
        }
        Ok(removed)
    }
}
