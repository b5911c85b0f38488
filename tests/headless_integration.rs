use std::fs;
use std::time::Duration;

use assert_matches::assert_matches;
use linedrill::app::{self, Exit};
use linedrill::config::Config;
use linedrill::error::SessionError;
use linedrill::input::{Keystroke, ScriptedKeys};
use linedrill::screen::Screen;

// Headless runs through the library: scripted keys in, escape codes into a
// byte buffer, real files in a temp dir.

fn screen() -> Screen<Vec<u8>> {
    Screen::new(Vec::new(), Duration::ZERO)
}

fn config_with_text(dir: &std::path::Path, text: &str) -> Config {
    let config = Config::in_dir(dir);
    fs::write(&config.practice_file, text).unwrap();
    config
}

#[test]
fn blank_line_is_skipped_and_one_miss_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_text(dir.path(), "ab\n\nc\n");

    // start gate, "ab", nothing for the blank line, one miss on "c", exit gate
    let mut keys = ScriptedKeys::typed("sabxce");
    let mut out = screen();
    let exit = app::run(&config, &mut keys, &mut out).unwrap();

    let summary = match exit {
        Exit::Completed(summary) => summary,
        other => panic!("expected a completed session, got {other:?}"),
    };
    assert_eq!(summary.misses, 1);
    assert_eq!(keys.remaining(), 0);

    let log = fs::read_to_string(&config.log_file).unwrap();
    let rows: Vec<Vec<&str>> = log.lines().map(|l| l.split(',').collect()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], ["Date", "MissCount", "Time(sec)"]);
    assert_eq!(rows[1][1], "1");
    assert_eq!(rows[1][0].len(), "YYYY/MM/DD".len());
    assert_eq!(rows[1][2].split('.').nth(1).map(str::len), Some(2));
}

#[test]
fn indentation_is_typed_for_the_user() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_text(dir.path(), "fn f() {\n    x\n}\n");

    let typed = format!("-{}{}{}.", "fn f() {", "x", "}");
    let mut keys = ScriptedKeys::typed(&typed);
    let mut out = screen();
    let exit = app::run(&config, &mut keys, &mut out).unwrap();

    assert_matches!(exit, Exit::Completed(s) if s.misses == 0);
}

#[test]
fn non_character_keys_count_as_misses() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_text(dir.path(), "a\n");

    let mut keys = ScriptedKeys::new([
        Keystroke::Other,
        Keystroke::Other,
        Keystroke::Char('b'),
        Keystroke::Char('a'),
        Keystroke::Other,
    ]);
    let mut out = screen();
    let exit = app::run(&config, &mut keys, &mut out).unwrap();

    assert_matches!(exit, Exit::Completed(s) if s.misses == 2);
}

#[test]
fn interrupt_on_any_line_leaves_log_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_text(dir.path(), "ab\ncd\nef\n");
    let prior = "Date,MissCount,Time(sec)\r\n2024/01/01,3,12.00\r\n";
    fs::write(&config.log_file, prior).unwrap();

    for typed in ["", "s", "sa", "sab", "sabcdx", "sabcdef"] {
        let mut keys = ScriptedKeys::typed(typed);
        let mut out = screen();
        let res = app::run(&config, &mut keys, &mut out);
        if typed == "sabcdef" {
            // only the exit gate is left, which runs after the log write
            assert_matches!(res, Err(SessionError::Interrupted));
            let log = fs::read_to_string(&config.log_file).unwrap();
            assert_eq!(log.lines().count(), 3);
            assert!(log.starts_with(prior));
        } else {
            assert_matches!(res, Err(SessionError::Interrupted), "typed {typed:?}");
            assert_eq!(fs::read_to_string(&config.log_file).unwrap(), prior);
        }
    }
}

#[test]
fn repeated_sessions_append_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_text(dir.path(), "z\n");

    for _ in 0..3 {
        let mut keys = ScriptedKeys::typed("-z-");
        let mut out = screen();
        app::run(&config, &mut keys, &mut out).unwrap();
    }

    let log = fs::read_to_string(&config.log_file).unwrap();
    assert_eq!(log.lines().count(), 4);
    assert_eq!(log.matches("Date,MissCount").count(), 1);
}

#[test]
fn missing_practice_file_without_sample_uses_bundled_text() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::in_dir(dir.path().join("fresh"));

    let mut keys = ScriptedKeys::default();
    let mut out = screen();
    let res = app::run(&config, &mut keys, &mut out);

    assert_matches!(res, Err(SessionError::Interrupted));
    let seeded = fs::read_to_string(&config.practice_file).unwrap();
    assert_eq!(Some(seeded.as_str()), linedrill::bootstrap::bundled_sample());
    assert!(!config.log_file.exists());
}
