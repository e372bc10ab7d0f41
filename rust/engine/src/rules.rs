use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::PlayerAction as A;

pub const SMALL_BLIND: u32 = 1;
pub const BIG_BLIND: u32 = 2;

/// A decision after range checks, carrying the chips it moves this action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Call(u32),
    Raise(u32),
}

impl ValidatedAction {
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold => 0,
            ValidatedAction::Call(n) | ValidatedAction::Raise(n) => n,
        }
    }
}

/// Validates a player action against the chips owed and the stack.
///
/// A raise amount is the number of chips put in by this action. Amounts
/// above the stack are clamped to the stack (all-in). A clamped amount that
/// does not exceed `to_call` is a call when it equals `to_call` or the whole
/// stack (a short all-in); anything lower is rejected.
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(validate_action(100, 10, PlayerAction::Call), Ok(ValidatedAction::Call(10)));
/// assert_eq!(validate_action(8, 10, PlayerAction::Call), Ok(ValidatedAction::Call(8)));
/// assert_eq!(validate_action(100, 10, PlayerAction::Raise(500)), Ok(ValidatedAction::Raise(100)));
/// assert!(validate_action(100, 10, PlayerAction::Raise(5)).is_err());
/// ```
pub fn validate_action(stack: u32, to_call: u32, action: A) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Call => Ok(ValidatedAction::Call(stack.min(to_call))),
        A::Raise(amount) => {
            let put_in = amount.min(stack);
            if put_in > to_call {
                Ok(ValidatedAction::Raise(put_in))
            } else if put_in == to_call || put_in == stack {
                Ok(ValidatedAction::Call(put_in))
            } else {
                Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: min_raise_floor(stack, to_call),
                })
            }
        }
    }
}

/// Smallest commitment that counts as a raise, capped by the stack.
pub fn min_raise_floor(stack: u32, to_call: u32) -> u32 {
    to_call.saturating_add(1).min(stack)
}

/// Small and big blind positions within the funded seats, given the
/// dealer's position among them. Two funded seats put the big blind back on
/// the dealer.
pub fn blind_positions(dealer: usize, funded: usize) -> (usize, usize) {
    ((dealer + 1) % funded, (dealer + 2) % funded)
}
