use crate::AIOpponent;
use holdem_engine::decision::{ActionRequest, RevealRequest};
use holdem_engine::player::{PlayerAction, RevealChoice};

/// Calls every bet and shows every hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAI;

impl AIOpponent for PassiveAI {
    fn decide(&self, _request: &ActionRequest) -> PlayerAction {
        PlayerAction::Call
    }

    fn reveal(&self, _request: &RevealRequest) -> RevealChoice {
        RevealChoice::ShowBoth
    }

    fn name(&self) -> &str {
        "PassiveAI"
    }
}
