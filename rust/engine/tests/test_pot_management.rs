use holdem_engine::player::PlayerId;
use holdem_engine::pot::{Pot, PotManager};

fn ids(raw: &[u32]) -> Vec<PlayerId> {
    raw.iter().copied().map(PlayerId).collect()
}

#[test]
fn short_all_in_splits_main_and_side_pot() {
    let pm = PotManager::from_contributions([
        (PlayerId(0), 50),
        (PlayerId(1), 100),
        (PlayerId(2), 100),
    ]);
    assert_eq!(
        pm.pots(),
        &[
            Pot {
                amount: 150,
                eligible: ids(&[0, 1, 2])
            },
            Pot {
                amount: 100,
                eligible: ids(&[1, 2])
            },
        ]
    );
    assert_eq!(pm.total(), 250);
}

#[test]
fn three_levels_nest_eligibility() {
    let pm = PotManager::from_contributions([
        (PlayerId(0), 100),
        (PlayerId(1), 20),
        (PlayerId(2), 60),
        (PlayerId(3), 100),
    ]);
    let amounts: Vec<u32> = pm.pots().iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![80, 120, 80]);
    assert_eq!(pm.pots()[1].eligible, ids(&[0, 2, 3]));
    assert_eq!(pm.pots()[2].eligible, ids(&[0, 3]));
    for pair in pm.pots().windows(2) {
        assert!(pair[1].eligible.iter().all(|id| pair[0].eligible.contains(id)));
    }
}

#[test]
fn equal_commitments_make_one_pot() {
    let pm = PotManager::from_contributions([(PlayerId(0), 30), (PlayerId(1), 30)]);
    assert_eq!(pm.pots().len(), 1);
    assert_eq!(pm.total(), 60);
}

#[test]
fn later_streets_append_their_own_pots() {
    let mut pm = PotManager::new();
    pm.settle_street([(PlayerId(0), 2), (PlayerId(1), 2), (PlayerId(2), 2)]);
    let created = pm
        .settle_street([(PlayerId(0), 0), (PlayerId(1), 40), (PlayerId(2), 25)])
        .to_vec();
    assert_eq!(
        created,
        vec![
            Pot {
                amount: 50,
                eligible: ids(&[1, 2])
            },
            Pot {
                amount: 15,
                eligible: ids(&[1])
            },
        ]
    );
    assert_eq!(pm.pots().len(), 3);
    assert_eq!(pm.total(), 71);
}
