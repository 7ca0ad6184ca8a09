// CLI tests driving the built binary.
use std::{fs, path::Path, process::Command, process::Output};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_xmlprobe");
    let mut command = Command::new(exe);
    command.env_remove("RUST_LOG");
    command
}

fn probe(path: &Path) -> Output {
    cmd().arg(path).output().expect("run xmlprobe")
}

fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn well_formed_exits_zero_silently() {
    let output = probe(Path::new("tests/read/well_formed.xml"));

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn mismatched_tag_prints_message_and_offset() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_temp(&temp, "mismatched.xml", "<root><child></root>");

    let output = probe(&path);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected stdout: {:?}", stdout);
    assert!(!lines[0].is_empty());
    assert_eq!(lines[1], "13");
}

#[test]
fn malformed_offset_is_within_input() {
    let temp = tempfile::tempdir().expect("tempdir");
    let contents = "<a><b></a>";
    let path = write_temp(&temp, "unterminated.xml", contents);

    let output = probe(&path);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let offset: usize = stdout
        .lines()
        .nth(1)
        .expect("offset line")
        .parse()
        .expect("offset is a non-negative integer");
    assert!(offset <= contents.len());
}

#[test]
fn empty_file_fails_at_zero() {
    let output = probe(Path::new("tests/read/empty.xml"));

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.lines().count(), 2);
    assert_eq!(stdout.lines().nth(1), Some("0"));
}

#[test]
fn repeated_runs_match() {
    let first = probe(Path::new("tests/read/unclosed.xml"));
    let second = probe(Path::new("tests/read/unclosed.xml"));

    assert_eq!(first.status.code(), Some(1));
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn missing_file_is_reported_on_stderr() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = probe(&temp.path().join("nope.xml"));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.xml"));
}

#[test]
fn missing_argument_is_a_usage_error() {
    let output = cmd().output().expect("run xmlprobe");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}
