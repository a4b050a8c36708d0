//! Integration tests for the `bbrz-dice` command line tool.
//!
//! Each test runs the built binary against a temporary directory of
//! generated replays and checks exit codes and report contents.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use bbrz_dice::report::{parse_line, SEPARATOR};
use common::{block_action, game_finished, replay, sample_match, write_bbrz};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bbrz-dice"))
        .args(args)
        .output()
        .expect("failed to run bbrz-dice")
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn sample_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let replays = dir.path().join("replays");
    std::fs::create_dir(&replays).unwrap();
    write_bbrz(&replays, "m1.bbrz", &[("r.bbr", sample_match().as_str())]);
    let other = replay(&[
        block_action("5", &["(0,3)"]),
        game_finished("Alice", &["5"], "Zoe", &[]),
    ]);
    write_bbrz(&replays, "m2.bbrz", &[("r.bbr", other.as_str())]);
    dir
}

#[test]
fn test_merged_report() {
    let dir = sample_dir();
    let out = dir.path().join("dice.csv");
    let output = run(&["-d", arg(&dir.path().join("replays")), "-o", arg(&out)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "Alice, BD, DS\nAlice, DS\nBob, DD\nBob, P, AD\nUnknown, P\n"
    );
    for line in text.lines() {
        assert!(parse_line(line).is_ok());
    }
}

#[test]
fn test_by_replay_report() {
    let dir = sample_dir();
    let out = dir.path().join("dice.txt");
    let output = run(&["-d", arg(&dir.path().join("replays")), "-o", arg(&out), "-s"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains(&format!("m1.bbrz\n{SEPARATOR}\nAlice, BD, DS\nBob, DD\n")));
    assert!(text.contains(&format!("m2.bbrz\n{SEPARATOR}\nAlice, DS\n{SEPARATOR}\n")));
}

#[test]
fn test_raw_report() {
    let dir = sample_dir();
    let out = dir.path().join("raw.txt");
    let output = run(&["-d", arg(&dir.path().join("replays")), "-o", arg(&out), "-r"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(&out).unwrap();
    let alice = text
        .lines()
        .map(|l| parse_line(l).unwrap())
        .find(|l| l.name == "Alice")
        .unwrap();
    assert_eq!(alice.dice.len(), 3);
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_json_report() {
    let dir = sample_dir();
    let out = dir.path().join("dice.json");
    let output = run(&[
        "-d",
        arg(&dir.path().join("replays")),
        "-o",
        arg(&out),
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(5));
    assert_eq!(value[0]["name"], "Alice");
    assert_eq!(value[0]["dice"], serde_json::json!(["BD", "DS"]));
}

#[test]
fn test_raw_and_sort_are_exclusive() {
    let dir = sample_dir();
    let out = dir.path().join("x.txt");
    let output = run(&["-d", arg(&dir.path().join("replays")), "-o", arg(&out), "-s", "-r"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!out.exists());
}

#[test]
fn test_existing_output_requires_force() {
    let dir = sample_dir();
    let out = dir.path().join("dice.csv");
    std::fs::write(&out, "old").unwrap();
    let replays = dir.path().join("replays");

    let output = run(&["-d", arg(&replays), "-o", arg(&out)]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "old");

    let output = run(&["-d", arg(&replays), "-o", arg(&out), "-f"]);
    assert!(output.status.success());
    assert!(std::fs::read_to_string(&out).unwrap().starts_with("Alice"));
}

#[test]
fn test_force_replaces_directory() {
    let dir = sample_dir();
    let out = dir.path().join("out_dir");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("inner.txt"), "x").unwrap();

    let output = run(&["-d", arg(&dir.path().join("replays")), "-o", arg(&out), "-f"]);
    assert!(output.status.success());
    assert!(out.is_file());
}

#[test]
fn test_missing_input_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dice.csv");
    let output = run(&["-d", arg(&dir.path().join("nope")), "-o", arg(&out)]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_broken_archive_is_skipped() {
    let dir = sample_dir();
    std::fs::write(dir.path().join("replays").join("broken.bbrz"), b"garbage").unwrap();
    let out = dir.path().join("dice.csv");

    let output = run(&["-d", arg(&dir.path().join("replays")), "-o", arg(&out)]);
    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 5);
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken.bbrz"));
}
