use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn bess_generate_writes_a_price_csv() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("prices.csv");
    let mut cmd = Command::cargo_bin("bess").unwrap();
    cmd.args([
        "generate",
        "--seed",
        "7",
        "--steps",
        "24",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("step,price"));
    assert_eq!(text.lines().count(), 25);
}

#[test]
fn bess_generate_is_deterministic_per_seed() {
    let tmp = tempdir().unwrap();
    let first = tmp.path().join("a.csv");
    let second = tmp.path().join("b.csv");
    for out in [&first, &second] {
        let mut cmd = Command::cargo_bin("bess").unwrap();
        cmd.args(["generate", "--seed", "42", "--steps", "48"])
            .args(["--out", out.to_str().unwrap()])
            .assert()
            .success();
    }
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn bess_solve_from_csv_writes_schedule_and_json() {
    let tmp = tempdir().unwrap();
    let prices = tmp.path().join("prices.csv");
    fs::write(&prices, "step,price\n0,10.0\n1,100.0\n").unwrap();
    let schedule = tmp.path().join("schedule.csv");
    let json = tmp.path().join("result.json");

    let mut cmd = Command::cargo_bin("bess").unwrap();
    cmd.args(["solve", "--prices", prices.to_str().unwrap()])
        .args(["--capacity", "10", "--power", "10"])
        .args(["--round-trip-efficiency", "1.0"])
        .args(["--out", schedule.to_str().unwrap()])
        .args(["--json-out", json.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: optimal"))
        .stdout(predicate::str::contains("Objective: $900"));

    let schedule_text = fs::read_to_string(&schedule).unwrap();
    assert!(schedule_text.starts_with("step,price,charge_mw,discharge_mw,soc_mwh"));
    assert_eq!(schedule_text.lines().count(), 3);

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap())
        .expect("result JSON parses");
    assert!((parsed["objective"].as_f64().unwrap() - 900.0).abs() < 1.0);
}

#[test]
fn bess_solve_rejects_an_unreachable_terminal_target() {
    let tmp = tempdir().unwrap();
    let prices = tmp.path().join("prices.csv");
    fs::write(&prices, "step,price\n0,10.0\n1,100.0\n").unwrap();

    let mut cmd = Command::cargo_bin("bess").unwrap();
    cmd.args(["solve", "--prices", prices.to_str().unwrap()])
        .args(["--capacity", "200", "--power", "10"])
        .args(["--final-soc-target", "150"])
        .assert()
        .failure();
}

#[test]
fn bess_sweep_writes_a_manifest() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("sweep");
    let mut cmd = Command::cargo_bin("bess").unwrap();
    cmd.args(["sweep", "--seed", "1", "--steps", "24"])
        .args(["--capacity", "50", "--power", "10", "--hurdle-rate", "5"])
        .args(["--trials", "2", "--threads", "1"])
        .args(["--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sweep finished: 2 ok"));
    assert!(out.join("sweep_manifest.json").exists());
    assert!(out.join("trial-1").join("result.json").exists());
    assert!(out.join("trial-2").join("result.json").exists());
}
