use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

/// The binary with a scrubbed environment, running inside `dir` so no stray
/// `.env` is picked up.
fn gemma(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gemma"));
    cmd.current_dir(dir)
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env_remove("RUST_LOG")
        .env("GEMINI_BASE_URL", "http://127.0.0.1:9/v1beta");
    cmd
}

fn documents() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prompt.txt"), "Echo the input.").unwrap();
    fs::write(dir.path().join("input.txt"), "hello").unwrap();
    dir
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn missing_input_flag_exits_with_one() {
    let dir = documents();
    let output = gemma(dir.path())
        .args(["-prompt=prompt.txt"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--input"));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_api_key_is_one_diagnostic_line() {
    let dir = documents();
    let output = gemma(dir.path())
        .args(["-prompt=prompt.txt", "-input=input.txt"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let stderr = stderr(&output);
    assert_eq!(stderr.trim_end().lines().count(), 1, "stderr: {stderr:?}");
    assert!(stderr.contains("configure: "));
    assert!(stderr.contains("GEMINI_API_KEY"));
    assert!(!stderr.contains('\u{1b}'));
    assert!(output.stdout.is_empty());
}

#[test]
fn unsupported_nested_type_names_the_property() {
    let dir = documents();
    fs::write(
        dir.path().join("schema.json"),
        r#"{"type":"object","properties":{"a":{"type":"object","properties":{"b":{"type":"weird"}}}}}"#,
    )
    .unwrap();

    let output = gemma(dir.path())
        .env("GEMINI_API_KEY", "test-key")
        .args([
            "-prompt=prompt.txt",
            "-input=input.txt",
            "-schema=schema.json",
            "-output=out.json",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let stderr = stderr(&output);
    assert_eq!(stderr.trim_end().lines().count(), 1, "stderr: {stderr:?}");
    assert!(stderr.contains("prepare schema: "));
    assert!(stderr.contains("`a`"));
    assert!(stderr.contains("`b`"));
    assert!(stderr.contains("`weird`"));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn help_exits_with_zero() {
    let dir = documents();
    let output = gemma(dir.path()).arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--prompt"));
    assert!(stdout.contains("GEMINI_API_KEY"));
}

#[test]
fn single_dash_help_exits_with_zero() {
    let dir = documents();
    let output = gemma(dir.path()).arg("-help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(!output.stdout.is_empty());
}
