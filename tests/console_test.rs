//! End-to-end tests driving the bot binary over stdin
//! Run with: cargo test --test console_test

use std::io::Write;
use std::process::{Command, Stdio};

fn run_with_input(input: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_parrot-bot"))
        .arg("run")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Should spawn bot binary");

    // Write the script, then close stdin so the bot sees EOF and exits
    let mut stdin = child.stdin.take().expect("stdin piped");
    stdin
        .write_all(input.as_bytes())
        .expect("Should write input");
    drop(stdin);

    let output = child.wait_with_output().expect("Should wait for bot");
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn tts_command_round_trip() {
    let stdout = run_with_input("!tts hello there\n");
    assert!(
        stdout.contains("[BOT/TTS] hello there"),
        "Expected a TTS reply in: {}",
        stdout
    );
}

#[test]
fn tts_without_args_asks_for_query() {
    let stdout = run_with_input("!tts\n");
    assert!(stdout.contains("[BOT] Please provide a query."));
    assert!(!stdout.contains("[BOT/TTS]"));
}

#[test]
fn unprefixed_text_produces_no_reply() {
    let stdout = run_with_input("hello there\n");
    assert!(!stdout.contains("[BOT]"));
}

#[test]
fn unknown_alias_is_silent() {
    let stdout = run_with_input("!nosuch\n");
    assert!(!stdout.contains("[BOT]"));
}

#[test]
fn ping_replies_pong() {
    let stdout = run_with_input("!ping\n!pong\n");
    assert_eq!(stdout.matches("[BOT] Pong!").count(), 2);
}

#[test]
fn help_lists_commands() {
    let stdout = run_with_input("!help\n");
    assert!(stdout.contains("Available commands:"));
    assert!(stdout.contains("tts"));
}

#[test]
fn version_subcommand_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_parrot-bot"))
        .arg("version")
        .output()
        .expect("Should run bot binary");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("parrot-bot v"));
}

#[test]
fn init_config_emits_parseable_yaml() {
    let output = Command::new(env!("CARGO_BIN_EXE_parrot-bot"))
        .arg("init-config")
        .output()
        .expect("Should run bot binary");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prefix:"));
    assert!(stdout.contains("log-rejections:"));
}
