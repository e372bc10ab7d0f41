use crate::cards::Card;
use crate::decision::{ActionRequest, TableHandle, TableObserver};
use crate::errors::GameError;
use crate::game::Phase;
use crate::logger::ActionRecord;
use crate::player::{Player, PlayerId};
use crate::rules::{min_raise_floor, ValidatedAction, BIG_BLIND};

/// What one closed street hands back to the controller.
#[derive(Debug, Clone, Default)]
pub struct StreetOutcome {
    /// Chips each player committed this street, in seat order
    pub commitments: Vec<(PlayerId, u32)>,
    /// Last player to raise, tracked on the river only
    pub river_raiser: Option<PlayerId>,
    pub actions: Vec<ActionRecord>,
}

/// One street of action among the players still able to bet.
///
/// The acting order is a fixed snapshot of the seats that had not folded
/// and still had chips when the street opened; folded and all-in seats are
/// skipped by predicate instead of being removed from the snapshot.
pub struct BettingRound<'a> {
    phase: Phase,
    dealer_seat: usize,
    players: &'a mut [Player],
    table: &'a TableHandle,
    observer: &'a dyn TableObserver,
    community: &'a [Card],
    settled_pot: u32,
}

impl<'a> BettingRound<'a> {
    pub fn new(
        phase: Phase,
        dealer_seat: usize,
        players: &'a mut [Player],
        table: &'a TableHandle,
        observer: &'a dyn TableObserver,
        community: &'a [Card],
        settled_pot: u32,
    ) -> Self {
        Self {
            phase,
            dealer_seat,
            players,
            table,
            observer,
            community,
            settled_pot,
        }
    }

    pub async fn run(self) -> Result<StreetOutcome, GameError> {
        let BettingRound {
            phase,
            dealer_seat,
            players,
            table,
            observer,
            community,
            settled_pot,
        } = self;

        let snapshot: Vec<usize> = (0..players.len())
            .filter(|&i| !players[i].has_folded() && players[i].stack() > 0)
            .collect();
        let mut outcome = StreetOutcome::default();

        if snapshot.len() > 1 {
            let n = snapshot.len();
            let first = snapshot
                .iter()
                .position(|&seat| seat > dealer_seat)
                .unwrap_or(0);
            let mut cursor = if phase == Phase::PreFlop {
                (first + 2) % n
            } else {
                first
            };
            let mut water_mark = if phase == Phase::PreFlop { BIG_BLIND } else { 0 };
            let big_blind = players.iter().position(Player::is_big_blind);

            loop {
                let contenders = snapshot.iter().filter(|&&i| !players[i].has_folded()).count();
                if contenders <= 1 || !snapshot.iter().any(|&i| players[i].can_act()) {
                    break;
                }

                let seat = snapshot[cursor];
                if !players[seat].can_act() {
                    cursor = (cursor + 1) % n;
                    continue;
                }

                let (decision, to_call) = {
                    let player = &players[seat];
                    let to_call = water_mark.saturating_sub(player.street_commitment());
                    let in_flight: u32 = players.iter().map(Player::street_commitment).sum();
                    let request = ActionRequest {
                        player: player.id(),
                        phase,
                        amount_to_call: to_call,
                        min_raise_floor: min_raise_floor(player.stack(), to_call),
                        stack: player.stack(),
                        committed: player.street_commitment(),
                        hole_cards: player.hand(),
                        community: community.to_vec(),
                        pot: settled_pot + in_flight,
                    };
                    let rx = table.request_action(request.player, request.stack, to_call)?;
                    tracing::debug!(
                        player = %request.player,
                        phase = ?phase,
                        to_call,
                        stack = request.stack,
                        "requesting decision"
                    );
                    observer.on_action_requested(table, &request);
                    let decision = rx
                        .await
                        .map_err(|_| GameError::DecisionChannelClosed(request.player))?;
                    (decision, to_call)
                };

                let player = &mut players[seat];
                match decision {
                    ValidatedAction::Fold => player.fold(),
                    ValidatedAction::Call(chips) | ValidatedAction::Raise(chips) => {
                        player.commit(chips);
                    }
                }
                tracing::debug!(
                    player = %player.id(),
                    action = ?decision,
                    committed = player.street_commitment(),
                    stack = player.stack(),
                    "decision applied"
                );
                outcome.actions.push(ActionRecord {
                    player: player.id(),
                    phase,
                    action: decision,
                });

                if decision.chips() > to_call {
                    water_mark = player.street_commitment();
                    let raiser = player.id();
                    for &i in &snapshot {
                        players[i].acted = false;
                    }
                    players[seat].acted = true;
                    if phase == Phase::River {
                        outcome.river_raiser = Some(raiser);
                    }
                } else {
                    player.acted = true;
                }

                let everyone_matched = snapshot.iter().all(|&i| {
                    let p = &players[i];
                    p.has_folded()
                        || p.is_all_in()
                        || (p.street_commitment() == water_mark && p.has_acted())
                });
                let option_pending = phase == Phase::PreFlop
                    && water_mark == BIG_BLIND
                    && big_blind.is_some_and(|bb| {
                        snapshot.contains(&bb)
                            && players[bb].can_act()
                            && !players[bb].has_acted()
                    });
                if everyone_matched && !option_pending {
                    break;
                }

                cursor = (cursor + 1) % n;
            }
        }

        outcome.commitments = players
            .iter()
            .map(|p| (p.id(), p.street_commitment()))
            .collect();
        for p in players.iter_mut() {
            p.reset_street();
        }
        Ok(outcome)
    }
}
