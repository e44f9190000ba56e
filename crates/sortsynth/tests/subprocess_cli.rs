//! Drives the real `sortsynth` binary and checks stdout, stderr and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use sortsynth_core::{MoveLog, is_sorted};
use tempfile::tempdir;

fn sortsynth_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sortsynth"))
}

fn run(args: &[&str]) -> Output {
    Command::new(sortsynth_bin())
        .args(args)
        .env_remove("SORTSYNTH_LOG")
        .output()
        .expect("spawn sortsynth")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_prints_all_algorithms() {
    let output = run(&["list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let names: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        names,
        ["bubble", "insertion", "selection", "heap", "quick", "merge"]
    );
}

#[test]
fn moves_json_replays_to_sorted() {
    let output = run(&["moves", "Insertion", "--size", "15", "--seed", "21"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["algorithm"], "insertion");
    let input: Vec<f64> = serde_json::from_value(json["input"].clone()).expect("input array");
    let log: MoveLog = serde_json::from_value(json["log"].clone()).expect("move log");
    assert_eq!(log.array_len(), 15);
    assert!(is_sorted(&log.replay(&input)));

    let again = run(&["moves", "insertion", "--size", "15", "--seed", "21"]);
    assert_eq!(again.stdout, output.stdout);
}

#[test]
fn unknown_algorithm_exits_with_two() {
    let output = run(&["play", "bogosort", "--quiet"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("bogosort"),
        "stderr: {}",
        stderr(&output)
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn play_prints_bars_and_summary() {
    let output = run(&[
        "play",
        "bubble",
        "--size",
        "10",
        "--seed",
        "8",
        "--step-ms",
        "0",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with('\r'));
    let summary = text.lines().last().expect("summary line");
    assert!(
        summary.starts_with("bubble: 10 values,"),
        "summary: {summary}"
    );
}

#[test]
fn play_switches_algorithms() {
    let output = run(&[
        "play",
        "heap",
        "--size",
        "16",
        "--seed",
        "2",
        "--step-ms",
        "0",
        "--then",
        "quick",
        "--switch-after",
        "5",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    let summary = text.lines().last().expect("summary line");
    assert!(
        summary.starts_with("heap -> quick: 16 values,"),
        "summary: {summary}"
    );
}

#[test]
fn pcm_output_holds_whole_tones() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("sortsynth.toml");
    fs::write(&config, "[audio]\ntone_ms = 1\nsample_rate = 8000\n").expect("write config");
    let pcm = dir.path().join("tones.pcm");

    let output = run(&[
        "play",
        "selection",
        "--size",
        "6",
        "--seed",
        "5",
        "--step-ms",
        "0",
        "--quiet",
        "--config",
        config.to_str().expect("utf-8 path"),
        "--pcm-out",
        pcm.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());

    // 1 ms at 8 kHz is 8 samples of 4 bytes; selection emits two tones per swap.
    let bytes = fs::metadata(&pcm).expect("pcm written").len();
    assert!(bytes > 0);
    assert_eq!(bytes % (2 * 8 * 4), 0);
}

#[test]
fn invalid_config_exits_with_two() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{"tone": {"base_hz": -1.0}}"#).expect("write config");

    let output = run(&[
        "play",
        "merge",
        "--quiet",
        "--config",
        config.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("tone.base_hz"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn verbose_logs_go_to_stderr() {
    let output = run(&[
        "-v",
        "play",
        "quick",
        "--size",
        "5",
        "--seed",
        "1",
        "--step-ms",
        "0",
        "--quiet",
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(
        stderr(&output).contains("playback started"),
        "stderr: {}",
        stderr(&output)
    );
}
