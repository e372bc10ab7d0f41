//! Scripted collaborator for driving rounds in tests.
//!
//! Each seat answers from its own queue; an empty queue calls and shows
//! both cards. Every prompt and every rejected submission is recorded.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use holdem_engine::decision::{ActionRequest, RevealRequest, TableHandle, TableObserver};
use holdem_engine::errors::GameError;
use holdem_engine::game::{Payout, Phase};
use holdem_engine::player::{Player, PlayerAction, PlayerId, RevealChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Action(ActionRequest),
    Reveal(RevealRequest),
}

#[derive(Default)]
pub struct Scripted {
    actions: Mutex<HashMap<PlayerId, VecDeque<PlayerAction>>>,
    reveals: Mutex<HashMap<PlayerId, VecDeque<RevealChoice>>>,
    prompts: Mutex<Vec<Prompt>>,
    rejected: Mutex<Vec<(PlayerId, GameError)>>,
    phases: Mutex<Vec<Phase>>,
    settled: Mutex<Vec<Vec<Payout>>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(self, player: u32, script: impl IntoIterator<Item = PlayerAction>) -> Self {
        self.actions
            .lock()
            .unwrap()
            .entry(PlayerId(player))
            .or_default()
            .extend(script);
        self
    }

    pub fn reveals(self, player: u32, script: impl IntoIterator<Item = RevealChoice>) -> Self {
        self.reveals
            .lock()
            .unwrap()
            .entry(PlayerId(player))
            .or_default()
            .extend(script);
        self
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    /// Players prompted for a betting decision, in order.
    pub fn action_order(&self) -> Vec<PlayerId> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Action(req) => Some(req.player),
                Prompt::Reveal(_) => None,
            })
            .collect()
    }

    pub fn action_requests(&self) -> Vec<ActionRequest> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Action(req) => Some(req),
                Prompt::Reveal(_) => None,
            })
            .collect()
    }

    pub fn reveal_requests(&self) -> Vec<RevealRequest> {
        self.prompts()
            .into_iter()
            .filter_map(|p| match p {
                Prompt::Reveal(req) => Some(req),
                Prompt::Action(_) => None,
            })
            .collect()
    }

    pub fn rejected(&self) -> Vec<(PlayerId, GameError)> {
        self.rejected.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.phases.lock().unwrap().clone()
    }

    pub fn settlements(&self) -> Vec<Vec<Payout>> {
        self.settled.lock().unwrap().clone()
    }
}

impl TableObserver for Scripted {
    fn on_action_requested(&self, table: &TableHandle, request: &ActionRequest) {
        self.prompts.lock().unwrap().push(Prompt::Action(request.clone()));
        let action = self
            .actions
            .lock()
            .unwrap()
            .get_mut(&request.player)
            .and_then(VecDeque::pop_front)
            .unwrap_or(PlayerAction::Call);
        if let Err(e) = table.submit_action(request.player, action) {
            self.rejected.lock().unwrap().push((request.player, e));
            table.submit_action(request.player, PlayerAction::Call).unwrap();
        }
    }

    fn on_reveal_requested(&self, table: &TableHandle, request: &RevealRequest) {
        self.prompts.lock().unwrap().push(Prompt::Reveal(request.clone()));
        let choice = self
            .reveals
            .lock()
            .unwrap()
            .get_mut(&request.player)
            .and_then(VecDeque::pop_front)
            .unwrap_or(RevealChoice::ShowBoth);
        table.submit_reveal(request.player, choice).unwrap();
    }

    fn on_phase_changed(&self, phase: Phase, _community: &[holdem_engine::cards::Card]) {
        self.phases.lock().unwrap().push(phase);
    }

    fn on_round_settled(&self, payouts: &[Payout]) {
        self.settled.lock().unwrap().push(payouts.to_vec());
    }
}

pub fn seats(stacks: &[u32]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &stack)| Player::new(PlayerId(i as u32), format!("p{i}"), stack))
        .collect()
}

pub fn ids(raw: &[u32]) -> Vec<PlayerId> {
    raw.iter().copied().map(PlayerId).collect()
}
