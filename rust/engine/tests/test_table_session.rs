mod helpers;

use std::sync::Arc;

use helpers::{ids, seats, Scripted};
use holdem_engine::game::{Game, RoundSummary};
use holdem_engine::logger::{RoundLogger, RoundRecord};
use holdem_engine::player::{PlayerAction, PlayerId};
use holdem_engine::table::{Table, TableConfig};

/// Chips lost to floor division in one round, checked against the number of
/// winners of each pot.
fn unpaid_odd_chips(summary: &RoundSummary) -> u32 {
    let mut unpaid = 0;
    for (i, pot) in summary.pots.iter().enumerate() {
        let shares: Vec<u32> = summary
            .payouts
            .iter()
            .filter(|p| p.pot_index == i)
            .map(|p| p.amount)
            .collect();
        let paid: u32 = shares.iter().sum();
        assert!(!shares.is_empty());
        assert!(pot.amount - paid < shares.len() as u32);
        unpaid += pot.amount - paid;
    }
    unpaid
}

#[tokio::test]
async fn chips_are_conserved_across_rounds() {
    let obs = Arc::new(
        Scripted::new()
            .actions(0, [PlayerAction::Raise(6), PlayerAction::Call, PlayerAction::Raise(9)])
            .actions(1, [PlayerAction::Call, PlayerAction::Raise(3)])
            .actions(3, [PlayerAction::Fold]),
    );
    let mut table = Table::new(seats(&[150, 150, 150, 150]), obs, TableConfig::default());

    let rounds = table.play(12).await.unwrap();
    assert_eq!(rounds.len(), 12);

    let mut expected = 600;
    for summary in &rounds {
        expected -= unpaid_odd_chips(summary);
        let stacks: u32 = summary.stacks.iter().map(|&(_, s)| s).sum();
        assert_eq!(stacks, expected);
    }
    assert_eq!(table.game().chips_in_play(), expected);
}

#[tokio::test]
async fn dealer_rotates_each_round() {
    let obs = Arc::new(Scripted::new());
    let mut table = Table::new(seats(&[150, 150, 150]), obs, TableConfig::default());

    let dealers: Vec<PlayerId> = table
        .play(4)
        .await
        .unwrap()
        .iter()
        .map(|s| s.dealer)
        .collect();
    assert_eq!(dealers, ids(&[0, 1, 2, 0]));
}

#[tokio::test]
async fn leave_and_rebuy_apply_between_rounds() {
    let obs = Arc::new(
        Scripted::new()
            .actions(0, [PlayerAction::Raise(40)])
            .actions(1, [PlayerAction::Fold])
            .actions(2, [PlayerAction::Fold]),
    );
    let mut table = Table::new(seats(&[150, 150, 150]), obs, TableConfig::default());
    let handle = table.handle();
    handle.request_leave(PlayerId(2)).unwrap();
    handle.request_rebuy(PlayerId(0)).unwrap();
    handle.request_rebuy(PlayerId(1)).unwrap();

    let summary = table.play_round().await.unwrap().unwrap();
    // flags do not touch the round in progress
    assert_eq!(summary.stacks.len(), 3);
    assert_eq!(summary.stacks[0], (PlayerId(0), 153));

    let players = table.game().players();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].stack(), 150);
    assert_eq!(players[1].stack(), 150);
    assert_eq!(table.dealer_seat(), 1);

    let next = table.play_round().await.unwrap().unwrap();
    assert_eq!(next.dealer, PlayerId(1));
    assert_eq!(next.stacks.len(), 2);
}

#[tokio::test]
async fn leave_wins_over_rebuy() {
    let obs = Arc::new(Scripted::new());
    let mut table = Table::new(seats(&[150, 150, 150]), obs, TableConfig { starting_stack: 200 });
    let handle = table.handle();
    handle.request_rebuy(PlayerId(1)).unwrap();
    handle.request_leave(PlayerId(1)).unwrap();
    handle.request_rebuy(PlayerId(2)).unwrap();

    table.play_round().await.unwrap();

    let players = table.game().players();
    assert_eq!(players.iter().map(|p| p.id()).collect::<Vec<_>>(), ids(&[0, 2]));
    assert_eq!(players[1].stack(), 200);
}

#[tokio::test]
async fn seat_changes_rejected_mid_round() {
    let obs = Arc::new(Scripted::new());
    let mut game = Game::new(seats(&[150, 150]), obs);
    game.start_round(0).unwrap();
    assert!(game.apply_seat_changes(150).is_err());
}

#[tokio::test]
async fn table_stops_without_two_funded_players() {
    let obs = Arc::new(Scripted::new());
    let mut table = Table::new(seats(&[150, 0, 0]), obs, TableConfig::default());
    assert!(table.play_round().await.unwrap().is_none());
    assert!(table.play(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn rounds_are_written_as_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history").join("rounds.jsonl");
    let obs = Arc::new(Scripted::new());
    let game = Game::new(seats(&[150, 150, 150]), obs).with_seed(5);
    let mut table = Table::from_game(game, TableConfig::default())
        .with_logger(RoundLogger::create(&path).unwrap());

    table.play(3).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<RoundRecord> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 3);
    assert!(records[2].round_id.ends_with("-000003"));
    assert!(records.iter().all(|r| r.ts.is_some() && r.seed == Some(5)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn tables_run_independently() {
    let spawn_table = |seed: u64, stacks: Vec<u32>| {
        tokio::spawn(async move {
            let obs = Arc::new(Scripted::new());
            let total: u32 = stacks.iter().sum();
            let mut table = Table::from_game(
                Game::new(seats(&stacks), obs.clone()).with_seed(seed),
                TableConfig::default(),
            );
            let rounds = table.play(5).await.unwrap();
            (total, rounds, obs.action_order().len())
        })
    };

    let a = spawn_table(1, vec![150, 150, 150]);
    let b = spawn_table(2, vec![150, 150]);
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    for (total, rounds, prompts) in [a, b] {
        assert_eq!(rounds.len(), 5);
        assert!(prompts > 0);
        let unpaid: u32 = rounds.iter().map(unpaid_odd_chips).sum();
        let last = rounds.last().unwrap();
        let stacks: u32 = last.stacks.iter().map(|&(_, s)| s).sum();
        assert_eq!(stacks + unpaid, total);
    }
}
