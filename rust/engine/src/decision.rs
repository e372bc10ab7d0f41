//! Single-shot decision slots and the collaborator-facing table handle.
//!
//! The engine registers at most one outstanding request per table, notifies
//! the [`TableObserver`], then awaits the matching response. Collaborators
//! answer through a cloned [`TableHandle`]; a response for which no request
//! is outstanding is ignored, and the slot is emptied the moment a response
//! is accepted so duplicates cannot retrigger it.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{Payout, Phase};
use crate::player::{PlayerAction, PlayerId, RevealChoice};
use crate::rules::{validate_action, ValidatedAction};

/// Turn prompt payload sent to the collaborator for the acting player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub player: PlayerId,
    pub phase: Phase,
    pub amount_to_call: u32,
    pub min_raise_floor: u32,
    pub stack: u32,
    /// Chips the player already committed this street
    pub committed: u32,
    pub hole_cards: Option<[Card; 2]>,
    pub community: Vec<Card>,
    /// Settled pots plus chips committed on the current street
    pub pot: u32,
}

/// Showdown prompt payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealRequest {
    pub player: PlayerId,
    pub hole_cards: Option<[Card; 2]>,
    pub community: Vec<Card>,
    /// Every other contender has mucked; the response is recorded for
    /// display only and cannot eliminate this player.
    pub last_standing: bool,
}

/// Result of a submission that was not rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// No matching request was outstanding; nothing changed.
    Ignored,
}

/// Notifications the engine pushes to the outer layer.
///
/// Callbacks run synchronously on the round's task after the request slot
/// is registered, so answering from inside a callback is allowed.
pub trait TableObserver: Send + Sync {
    fn on_action_requested(&self, table: &TableHandle, request: &ActionRequest);

    fn on_reveal_requested(&self, table: &TableHandle, request: &RevealRequest);

    fn on_phase_changed(&self, _phase: Phase, _community: &[Card]) {}

    fn on_round_settled(&self, _payouts: &[Payout]) {}
}

#[derive(Debug)]
enum Pending {
    Action {
        player: PlayerId,
        stack: u32,
        to_call: u32,
        reply: oneshot::Sender<ValidatedAction>,
    },
    Reveal {
        player: PlayerId,
        reply: oneshot::Sender<RevealChoice>,
    },
}

impl Pending {
    fn player(&self) -> PlayerId {
        match self {
            Pending::Action { player, .. } | Pending::Reveal { player, .. } => *player,
        }
    }
}

#[derive(Debug, Default)]
struct Slots {
    pending: Option<Pending>,
    leave: BTreeSet<PlayerId>,
    rebuy: BTreeSet<PlayerId>,
}

/// Cloneable handle used by collaborators to answer prompts and flag
/// between-round changes. Each table owns its own handle; nothing is shared
/// across tables.
#[derive(Debug, Clone, Default)]
pub struct TableHandle {
    inner: Arc<Mutex<Slots>>,
}

impl TableHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, Slots>, GameError> {
        self.inner.lock().map_err(|_| GameError::StatePoisoned)
    }

    /// Delivers a betting decision.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidBetAmount`] when a raise is below the amount owed;
    /// the request stays open so a corrected decision can be submitted.
    pub fn submit_action(
        &self,
        player: PlayerId,
        action: PlayerAction,
    ) -> Result<Submission, GameError> {
        let mut slots = self.slots()?;
        match slots.pending.take() {
            Some(Pending::Action {
                player: expected,
                stack,
                to_call,
                reply,
            }) if expected == player => match validate_action(stack, to_call, action) {
                Ok(validated) => {
                    if reply.send(validated).is_err() {
                        tracing::warn!(player = %player, "round stopped waiting for this decision");
                        return Ok(Submission::Ignored);
                    }
                    Ok(Submission::Accepted)
                }
                Err(err) => {
                    tracing::warn!(
                        player = %player,
                        action = ?action,
                        error = %err,
                        "rejected decision"
                    );
                    slots.pending = Some(Pending::Action {
                        player: expected,
                        stack,
                        to_call,
                        reply,
                    });
                    Err(err)
                }
            },
            other => {
                slots.pending = other;
                tracing::debug!(
                    player = %player,
                    action = ?action,
                    "ignored decision with no matching request"
                );
                Ok(Submission::Ignored)
            }
        }
    }

    /// Delivers a showdown reveal choice.
    pub fn submit_reveal(
        &self,
        player: PlayerId,
        choice: RevealChoice,
    ) -> Result<Submission, GameError> {
        let mut slots = self.slots()?;
        match slots.pending.take() {
            Some(Pending::Reveal {
                player: expected,
                reply,
            }) if expected == player => {
                if reply.send(choice).is_err() {
                    return Ok(Submission::Ignored);
                }
                Ok(Submission::Accepted)
            }
            other => {
                slots.pending = other;
                tracing::debug!(
                    player = %player,
                    choice = ?choice,
                    "ignored reveal with no matching request"
                );
                Ok(Submission::Ignored)
            }
        }
    }

    /// Player whose decision or reveal is outstanding, if any.
    pub fn current_actor(&self) -> Option<PlayerId> {
        self.slots()
            .ok()
            .and_then(|slots| slots.pending.as_ref().map(Pending::player))
    }

    /// Flags the player to be removed at the next round boundary.
    pub fn request_leave(&self, player: PlayerId) -> Result<(), GameError> {
        self.slots()?.leave.insert(player);
        Ok(())
    }

    /// Flags the player's stack to be restored at the next round boundary.
    pub fn request_rebuy(&self, player: PlayerId) -> Result<(), GameError> {
        self.slots()?.rebuy.insert(player);
        Ok(())
    }

    pub(crate) fn request_action(
        &self,
        player: PlayerId,
        stack: u32,
        to_call: u32,
    ) -> Result<oneshot::Receiver<ValidatedAction>, GameError> {
        let (reply, rx) = oneshot::channel();
        self.slots()?.pending = Some(Pending::Action {
            player,
            stack,
            to_call,
            reply,
        });
        Ok(rx)
    }

    pub(crate) fn request_reveal(
        &self,
        player: PlayerId,
    ) -> Result<oneshot::Receiver<RevealChoice>, GameError> {
        let (reply, rx) = oneshot::channel();
        self.slots()?.pending = Some(Pending::Reveal { player, reply });
        Ok(rx)
    }

    /// Drains leave and rebuy flags, in that order.
    pub(crate) fn take_lifecycle_flags(
        &self,
    ) -> Result<(BTreeSet<PlayerId>, BTreeSet<PlayerId>), GameError> {
        let mut slots = self.slots()?;
        Ok((
            std::mem::take(&mut slots.leave),
            std::mem::take(&mut slots.rebuy),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_without_request_is_ignored() {
        let table = TableHandle::new();
        assert_eq!(
            table.submit_action(PlayerId(0), PlayerAction::Call),
            Ok(Submission::Ignored)
        );
        assert_eq!(
            table.submit_reveal(PlayerId(0), RevealChoice::ShowBoth),
            Ok(Submission::Ignored)
        );
        assert_eq!(table.current_actor(), None);
    }

    #[test]
    fn slot_is_single_shot() {
        let table = TableHandle::new();
        let mut rx = table.request_action(PlayerId(1), 100, 2).unwrap();
        assert_eq!(table.current_actor(), Some(PlayerId(1)));
        assert_eq!(
            table.submit_action(PlayerId(1), PlayerAction::Call),
            Ok(Submission::Accepted)
        );
        assert_eq!(table.current_actor(), None);
        assert_eq!(
            table.submit_action(PlayerId(1), PlayerAction::Fold),
            Ok(Submission::Ignored)
        );
        assert_eq!(rx.try_recv(), Ok(ValidatedAction::Call(2)));
    }

    #[test]
    fn other_players_cannot_answer() {
        let table = TableHandle::new();
        let _rx = table.request_action(PlayerId(1), 100, 2).unwrap();
        assert_eq!(
            table.submit_action(PlayerId(2), PlayerAction::Fold),
            Ok(Submission::Ignored)
        );
        assert_eq!(
            table.submit_reveal(PlayerId(1), RevealChoice::Muck),
            Ok(Submission::Ignored)
        );
        assert_eq!(table.current_actor(), Some(PlayerId(1)));
    }

    #[test]
    fn invalid_raise_keeps_request_open() {
        let table = TableHandle::new();
        let mut rx = table.request_action(PlayerId(1), 100, 10).unwrap();
        assert!(matches!(
            table.submit_action(PlayerId(1), PlayerAction::Raise(3)),
            Err(GameError::InvalidBetAmount { .. })
        ));
        assert_eq!(table.current_actor(), Some(PlayerId(1)));
        assert_eq!(
            table.submit_action(PlayerId(1), PlayerAction::Raise(30)),
            Ok(Submission::Accepted)
        );
        assert_eq!(rx.try_recv(), Ok(ValidatedAction::Raise(30)));
    }

    #[test]
    fn lifecycle_flags_drain_once() {
        let table = TableHandle::new();
        table.request_leave(PlayerId(3)).unwrap();
        table.request_rebuy(PlayerId(4)).unwrap();
        let (leave, rebuy) = table.take_lifecycle_flags().unwrap();
        assert!(leave.contains(&PlayerId(3)));
        assert!(rebuy.contains(&PlayerId(4)));
        let (leave, rebuy) = table.take_lifecycle_flags().unwrap();
        assert!(leave.is_empty() && rebuy.is_empty());
    }
}
