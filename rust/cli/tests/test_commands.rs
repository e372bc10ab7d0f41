use holdem_cli::run;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn rounds_played(stdout: &str) -> usize {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Rounds played: "))
        .and_then(|n| n.trim().parse().ok())
        .expect("rounds line")
}

#[test]
fn help_lists_expected_commands() {
    let (code, out, _) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for cmd in ["sim", "eval", "deal", "cfg"] {
        assert!(out.contains(cmd), "help should mention {cmd}");
    }
}

#[test]
fn unknown_command_prints_usage_and_fails() {
    let (code, out, err) = run_cli(&["shuffle-up"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Usage: holdem <command>"));
    assert!(err.contains("  deal"));
}

#[test]
fn deal_is_reproducible_for_a_seed() {
    let (code, first, _) = run_cli(&["deal", "--seed", "7", "--players", "4"]);
    assert_eq!(code, 0);
    let (_, second, _) = run_cli(&["deal", "--seed", "7", "--players", "4"]);
    assert_eq!(first, second);
    assert!(first.contains("Seed: 7"));
    assert_eq!(first.lines().filter(|l| l.starts_with("Hole P")).count(), 4);
    assert!(first.contains("Hole P3:"));
    assert!(first.contains("Board:"));
}

#[test]
fn deal_rejects_a_single_player() {
    let (code, _, err) = run_cli(&["deal", "--players", "1"]);
    assert_eq!(code, 2);
    assert!(err.starts_with("Error: Invalid input"));
}

#[test]
fn eval_finds_the_wheel() {
    let (code, out, _) = run_cli(&["eval", "5h", "4d", "3c", "2s", "Ah"]);
    assert_eq!(code, 0);
    assert!(out.contains("Best hand: Straight"));
    assert!(out.contains("Category rank: 4"));
}

#[test]
fn eval_picks_the_best_five_of_seven() {
    let (code, out, _) = run_cli(&["eval", "Ah Ad", "Kc Kd 7s", "Ac 2h"]);
    assert_eq!(code, 0);
    assert!(out.contains("Best hand: Full House"));
}

#[test]
fn eval_reports_unparseable_cards() {
    let (code, _, err) = run_cli(&["eval", "Ah", "Kd", "Qc", "Js", "Zz"]);
    assert_eq!(code, 2);
    assert!(err.contains("unknown"));
}

#[test]
fn sim_conserves_chips_and_replays_with_a_seed() {
    let args = ["sim", "--rounds", "25", "--players", "4", "--seed", "11"];
    let (code, first, _) = run_cli(&args);
    assert_eq!(code, 0);
    assert!(first.contains("Seed: 11"));
    assert!(first.contains("Policy: BaselineAI"));
    assert!(first.contains("Chip conservation: ok"));
    assert_eq!(first.lines().filter(|l| l.starts_with("  P")).count(), 4);
    assert!(rounds_played(&first) >= 1);

    let (_, second, _) = run_cli(&args);
    assert_eq!(first, second);
}

#[test]
fn sim_with_passive_bots_plays_every_round() {
    let (code, out, err) = run_cli(&[
        "sim", "--rounds", "5", "--players", "3", "--seed", "2", "--ai", "passive",
    ]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.contains("Policy: PassiveAI"));
    assert_eq!(rounds_played(&out), 5);
}

#[test]
fn sim_rejects_unknown_policy() {
    let (code, _, err) = run_cli(&["sim", "--ai", "gto"]);
    assert_eq!(code, 2);
    assert!(err.contains("unknown AI type 'gto'"));
    assert!(err.contains("baseline"));
}

#[test]
fn sim_rejects_zero_rounds() {
    let (code, _, err) = run_cli(&["sim", "--rounds", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("rounds must be >=1"));
}

#[test]
fn sim_writes_one_record_per_round() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("rounds.jsonl");
    let path_str = path.to_string_lossy().into_owned();

    let (code, out, err) = run_cli(&[
        "sim", "--rounds", "6", "--players", "3", "--seed", "4", "--output", &path_str,
    ]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.contains("Round records:"));

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), rounds_played(&out));
    for (i, rec) in records.iter().enumerate() {
        let id = rec["round_id"].as_str().unwrap();
        assert!(id.ends_with(&format!("-{:06}", i + 1)), "{id}");
        assert_eq!(rec["seed"], 4);
        assert!(rec["ts"].is_string());
        assert!(rec["board"].as_array().unwrap().len() <= 5);
    }
}
