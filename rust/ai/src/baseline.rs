//! Baseline AI implementation for table play.
//!
//! A deterministic rule-based policy: preflop strength table, postflop hand
//! category from the evaluator, pot odds when facing a bet.

use crate::AIOpponent;
use holdem_engine::cards::Card;
use holdem_engine::decision::{ActionRequest, RevealRequest};
use holdem_engine::hand::{best_of_seven, Category};
use holdem_engine::player::{PlayerAction, RevealChoice};
use holdem_engine::rules::BIG_BLIND;

/// Simple baseline AI for simulations and tests.
///
/// # Strategy
///
/// **Preflop:**
/// - Strong hands (high pairs 77+, AK, AQ): raise or call
/// - Medium hands (suited connectors, Ax, small pairs): call if cheap
/// - Weak hands: fold to raises, check if free
///
/// **Postflop:**
/// - Strong hands (two pair+): bet or call
/// - Medium hands (one pair): check or call small bets
/// - Weak hands: fold unless the pot odds are generous
///
/// **Showdown:** always shows both cards.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::BaselineAI;
/// use holdem_ai::AIOpponent;
///
/// let ai = BaselineAI::new();
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Preflop hand strength on a 0-10 scale.
    ///
    /// - 9-10: premium (AA, KK, QQ, JJ, AKs)
    /// - 7-8: strong (TT-99, AK, AQ, KQs)
    /// - 5-6: medium (88-77, AJ, suited connectors)
    /// - 3-4: marginal (66-22, Ax, suited cards)
    /// - 0-2: weak offsuit cards
    fn evaluate_preflop_strength(hole_cards: [Card; 2]) -> u8 {
        let [c1, c2] = hole_cards;
        let r1 = c1.rank.value();
        let r2 = c2.rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 { 5 } else { 4 }
                } else if high >= 11 && low >= 9 {
                    4 // broadway
                } else {
                    2
                }
            }
        }
    }

    /// Postflop strength on a 0-10 scale from the best hand available with
    /// the cards seen so far. `None` before the flop.
    fn evaluate_postflop_strength(hole_cards: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut cards = hole_cards.to_vec();
        cards.extend_from_slice(board);
        let hand = best_of_seven(&cards);

        let base = match hand.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker_boost = u8::from(hand.kickers.first().is_some_and(|k| k.rank.value() >= 12));

        Some((base + kicker_boost).min(10))
    }

    fn hand_strength(hole_cards: [Card; 2], board: &[Card]) -> u8 {
        Self::evaluate_postflop_strength(hole_cards, board)
            .unwrap_or_else(|| Self::evaluate_preflop_strength(hole_cards))
    }

    /// Share of the final pot already in the middle: pot / (pot + call).
    fn calculate_pot_odds(pot_size: u32, call_amount: u32) -> f32 {
        if call_amount == 0 {
            return 1.0;
        }
        pot_size as f32 / (pot_size + call_amount) as f32
    }

    fn decide_action(hand_strength: u8, to_call: u32, stack: u32, pot: u32) -> PlayerAction {
        if to_call == 0 {
            return Self::decide_no_bet_action(hand_strength, stack, pot);
        }

        // a call would put the whole stack in
        if to_call >= stack {
            return if hand_strength >= 7 {
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            };
        }

        let pot_odds = Self::calculate_pot_odds(pot, to_call);
        match hand_strength {
            9..=10 => {
                let raise = to_call + (pot / 2).max(BIG_BLIND);
                PlayerAction::Raise(raise.min(stack))
            }
            7..=8 => PlayerAction::Call,
            5..=6 => {
                if pot_odds >= 0.7 || to_call <= pot / 4 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            3..=4 => {
                if pot_odds >= 0.8 || to_call <= pot / 6 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            _ => PlayerAction::Fold,
        }
    }

    /// Nothing owed: bet strong hands, check everything else.
    fn decide_no_bet_action(hand_strength: u8, stack: u32, pot: u32) -> PlayerAction {
        let bet = match hand_strength {
            9..=10 => pot * 2 / 3,
            7..=8 => pot / 2,
            _ => return PlayerAction::Call,
        };
        PlayerAction::Raise(bet.max(BIG_BLIND).min(stack))
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

impl AIOpponent for BaselineAI {
    fn decide(&self, request: &ActionRequest) -> PlayerAction {
        let Some(hole_cards) = request.hole_cards else {
            return if request.amount_to_call == 0 {
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            };
        };
        let strength = Self::hand_strength(hole_cards, &request.community);
        Self::decide_action(strength, request.amount_to_call, request.stack, request.pot)
    }

    fn reveal(&self, request: &RevealRequest) -> RevealChoice {
        match request.hole_cards {
            Some(_) => RevealChoice::ShowBoth,
            None => RevealChoice::Muck,
        }
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}
