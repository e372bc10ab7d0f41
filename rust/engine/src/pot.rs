use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// One settled pot: chips plus the players allowed to win them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<PlayerId>,
}

/// Ordered list of every pot created during a round.
///
/// Each settled street appends its own pots; nothing is merged across
/// streets, so eligibility stays exact for players who went all-in on an
/// earlier street.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a manager from a single street of commitments.
    pub fn from_contributions<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, u32)>,
    {
        let mut pm = Self::new();
        pm.settle_street(contributions);
        pm
    }

    /// Splits one street's commitments into layered pots and appends them.
    ///
    /// Each layer takes the smallest remaining commitment from every player
    /// still contributing; players who reach zero drop out of later layers.
    /// Returns the pots created for this street.
    pub fn settle_street<I>(&mut self, contributions: I) -> &[Pot]
    where
        I: IntoIterator<Item = (PlayerId, u32)>,
    {
        let start = self.pots.len();
        let mut remaining: Vec<(PlayerId, u32)> = contributions
            .into_iter()
            .filter(|&(_, amount)| amount > 0)
            .collect();

        while let Some(level) = remaining.iter().map(|&(_, amount)| amount).min() {
            let eligible: Vec<PlayerId> = remaining.iter().map(|&(id, _)| id).collect();
            self.pots.push(Pot {
                amount: level * eligible.len() as u32,
                eligible,
            });
            for entry in remaining.iter_mut() {
                entry.1 -= level;
            }
            remaining.retain(|&(_, amount)| amount > 0);
        }

        &self.pots[start..]
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn clear(&mut self) {
        self.pots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_commitments_are_excluded() {
        let pm =
            PotManager::from_contributions([(PlayerId(0), 0), (PlayerId(1), 4), (PlayerId(2), 4)]);
        assert_eq!(
            pm.pots(),
            &[Pot {
                amount: 8,
                eligible: vec![PlayerId(1), PlayerId(2)]
            }]
        );
    }

    #[test]
    fn empty_street_creates_no_pot() {
        let pm = PotManager::from_contributions(Vec::new());
        assert!(pm.pots().is_empty());
        assert_eq!(pm.total(), 0);
    }

    #[test]
    fn streets_accumulate_without_merging() {
        let mut pm = PotManager::new();
        pm.settle_street([(PlayerId(0), 2), (PlayerId(1), 2)]);
        pm.settle_street([(PlayerId(0), 10), (PlayerId(1), 10)]);
        assert_eq!(pm.pots().len(), 2);
        assert_eq!(pm.total(), 24);
    }
}
