//! CLI integration tests for the genesis binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn genesis() -> Command {
    Command::cargo_bin("genesis").unwrap()
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_prints_summary() {
    genesis()
        .args(["run", "--frames", "60", "--population", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 NPCs"))
        .stdout(predicate::str::contains("Tick 60"))
        .stdout(predicate::str::contains("Behavior"))
        .stdout(predicate::str::contains("Occupations"));
}

#[test]
fn run_json_snapshot() {
    let value = json_output(genesis().args([
        "run",
        "--frames",
        "30",
        "--dt",
        "0.5",
        "--population",
        "5",
        "--json",
    ]));
    assert_eq!(value["tick"], 30);
    assert_eq!(value["npc_count"], 5);
    assert_eq!(value["run_state"], "running");
    assert_eq!(value["npcs"].as_array().unwrap().len(), 5);
    assert!((value["days_passed"].as_f64().unwrap() - 15.0).abs() < 1e-9);
}

#[test]
fn run_paused_keeps_clock_still() {
    let value = json_output(genesis().args([
        "run",
        "--frames",
        "20",
        "--population",
        "3",
        "--paused",
        "--json",
    ]));
    assert_eq!(value["tick"], 0);
    assert_eq!(value["run_state"], "paused");
}

#[test]
fn run_is_deterministic_per_seed() {
    let args = ["run", "--frames", "200", "--seed", "7", "--population", "20", "--json"];
    let first = json_output(genesis().args(args));
    let second = json_output(genesis().args(args));
    assert_eq!(first, second);
}

#[test]
fn run_time_scale_is_clamped() {
    let value = json_output(genesis().args([
        "run",
        "--frames",
        "1",
        "--population",
        "0",
        "--time-scale",
        "50",
        "--json",
    ]));
    assert_eq!(value["time_scale"], 10.0);
}

#[test]
fn run_verbose_lists_events() {
    genesis()
        .args(["run", "--frames", "300", "--population", "40", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event Log"))
        .stdout(predicate::str::contains("set off toward"));
}

#[test]
fn run_rejects_negative_dt() {
    genesis()
        .args(["run", "--frames", "1", "--dt=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frame delta"));
}

#[test]
fn run_with_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sim.json");
    fs::write(
        &path,
        r#"{ "seed": 3, "population": 4, "world": { "width": 50, "height": 40 } }"#,
    )
    .unwrap();

    let value = json_output(genesis().args([
        "run",
        "--frames",
        "10",
        "--json",
        "--config",
        path.to_str().unwrap(),
    ]));
    assert_eq!(value["npc_count"], 4);
    assert_eq!(value["width"], 50);
    assert_eq!(value["height"], 40);
}

#[test]
fn run_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "world": { "width": 0 } }"#).unwrap();

    genesis()
        .args(["run", "--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn run_missing_config_file() {
    genesis()
        .args(["run", "--config", "/nonexistent/genesis.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_prints_defaults() {
    let value = json_output(genesis().arg("config"));
    assert_eq!(value["seed"], 42);
    assert_eq!(value["population"], 100);
    assert_eq!(value["world"]["width"], 2000);
    assert_eq!(value["world"]["tick_rate"], 60);
}

#[test]
fn config_output_round_trips_through_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.json");
    let output = genesis().arg("config").output().unwrap();
    fs::write(&path, output.stdout).unwrap();

    genesis()
        .args(["run", "--frames", "5", "--config", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 NPCs"));
}
