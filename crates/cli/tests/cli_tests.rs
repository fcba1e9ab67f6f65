//! End-to-end tests of the `rv` command line and REPL over the sample sources.

use std::io::Cursor;

use rust_verbs_cli::repl::{BufferedInput, Repl};
use rust_verbs_cli::run_from;
use rust_verbs_cli::sample_commands::sample_sources;
use rust_verbs_core::file_handling::write_settings;
use rust_verbs_core::config::{ListFormat, Settings};
use rust_verbs_core::registry;
use tempfile::TempDir;

/// Runs `rv` with a settings path inside `temp_dir`; returns (stdout, stderr).
fn rv(temp_dir: &TempDir, args: &[&str]) -> (String, String) {
    let config_path = temp_dir.path().join("config.yml");
    let config_path = config_path.to_str().unwrap();

    let mut argv = vec!["rv", "--config-path", config_path];
    argv.extend_from_slice(args);

    let mut out = Vec::new();
    let mut err = Vec::new();
    run_from(&sample_sources(), argv, &mut out, &mut err).unwrap();

    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn repl_session(script: &str) -> String {
    let sources = sample_sources();
    let registry = registry::build(&sources).unwrap();
    let repl = Repl::new(&registry, &sources, "> ");

    let mut input = BufferedInput::new(Cursor::new(script.to_string()));
    let mut out = Vec::new();
    repl.run(&mut input, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_run_sum() {
    let temp_dir = TempDir::new().unwrap();

    let (out, err) = rv(&temp_dir, &["sum", "--a", "2", "--b", "3"]);
    assert_eq!(out, "5\n");
    assert!(err.is_empty());

    let (out, _) = rv(&temp_dir, &["sum", "--a", "2", "--b", "3", "--c", "4"]);
    assert_eq!(out, "9\n");
}

#[test]
fn test_run_boolean_flag() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("notes.txt");
    std::fs::write(&file, "x").unwrap();
    let file = file.to_str().unwrap();

    let (out, _) = rv(&temp_dir, &["test_path", "--path", file]);
    assert_eq!(out, "notes.txt\n");

    let (out, _) = rv(&temp_dir, &["test_path", "--path", file, "--full-path"]);
    assert!(out.trim_end().ends_with("notes.txt"));
    assert!(out.len() > "notes.txt\n".len());
}

#[test]
fn test_run_reports_validation_errors() {
    let temp_dir = TempDir::new().unwrap();

    let (out, err) = rv(&temp_dir, &["test_status", "--status", "7"]);
    assert!(out.is_empty());
    assert_eq!(
        err,
        "Invalid value 7 for argument `status`. Valid values are: 0, 1, 2\n"
    );

    let (_, err) = rv(&temp_dir, &["sum", "--a", "x", "--b", "3"]);
    assert!(err.contains("`a`"));
}

#[test]
fn test_run_unknown_command_suggests() {
    let temp_dir = TempDir::new().unwrap();

    let (out, err) = rv(&temp_dir, &["summ", "--a", "1"]);
    assert!(out.is_empty());
    assert_eq!(err, "Command not found: `summ`\nDid you mean `sum`?\n");
}

#[test]
fn test_run_renders_shapes() {
    let temp_dir = TempDir::new().unwrap();

    let (out, _) = rv(&temp_dir, &["people"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "name   age");
    assert_eq!(lines.len(), 5);

    let (out, _) = rv(&temp_dir, &["colours"]);
    assert_eq!(out, "red\ngreen\nblue\nyellow\n");

    let (out, _) = rv(&temp_dir, &["info"]);
    assert!(out.starts_with("name: rust-verbs-cli\n"));
}

#[test]
fn test_list_commands_uses_settings_format() {
    let temp_dir = TempDir::new().unwrap();

    let (out, _) = rv(&temp_dir, &["--list-commands"]);
    assert!(out.contains("name: sum"));

    let settings = Settings {
        list_format: ListFormat::Json,
        ..Settings::default()
    };
    let config_path = temp_dir.path().join("config.yml");
    write_settings(config_path.to_str().unwrap(), &settings).unwrap();

    let (out, _) = rv(&temp_dir, &["--list-commands"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["name"], "test");

    let (out, _) = rv(&temp_dir, &["--list-commands", "--format", "yaml"]);
    assert!(out.contains("name: test"));
}

#[test]
fn test_repl_session() {
    let out = repl_session(
        "sum a=2 b=3\n\
         \n\
         test_status status=1\n\
         test_status status=9\n\
         sum a=2\n\
         sum a=2 oops b=3\n\
         nope\n\
         colours\n",
    );

    let expected = "5\n\
                    1\n\
                    Invalid value 9 for argument `status`. Valid values are: 0, 1, 2\n\
                    Missing required argument `b` for command `sum`\n\
                    Invalid argument format: oops\n\
                    5\n\
                    Unknown command: nope\n\
                    red\ngreen\nblue\nyellow\n";
    assert_eq!(out, expected);
}

#[test]
fn test_repl_quoted_path() {
    let temp_dir = TempDir::new().unwrap();
    let spaced = temp_dir.path().join("some dir");
    std::fs::create_dir(&spaced).unwrap();

    let out = repl_session(&format!("test_path path=\"{}\"\n", spaced.display()));
    assert_eq!(out, "some dir\n");
}

#[test]
fn test_repl_missing_path_continues() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let out = repl_session(&format!("test_path path={}\ntest\n", missing.display()));
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("Path "));
    assert!(lines[0].ends_with("does not exist (argument `path`)"));
    assert_eq!(lines[1], "This is test");
}
