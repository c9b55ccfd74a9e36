//! Integration tests for the bikeshare_explorer CLI

use assert_cmd::Command;

fn run(args: &[&str], export_dir: &std::path::Path) -> (String, String, bool) {
    run_with_log_level(args, export_dir, None)
}

fn run_with_log_level(
    args: &[&str],
    export_dir: &std::path::Path,
    rust_log: Option<&str>,
) -> (String, String, bool) {
    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

    let mut cmd = Command::cargo_bin("bikeshare_explorer").expect("binary should be built");
    match rust_log {
        Some(level) => cmd.env("RUST_LOG", level),
        None => cmd.env_remove("RUST_LOG"),
    };

    let output = cmd
        .env("LOG_FILE_PATH", export_dir.join("test.log"))
        .env("BIKESHARE_EXPORT_DIR", export_dir)
        .arg("--data-dir")
        .arg(fixtures)
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, success) = run(&["--help"], dir.path());

    assert!(success);
    assert!(stdout.contains("stats"));
    assert!(stdout.contains("export"));
}

#[test]
fn test_stats_table_output() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, success) = run(&["stats", "--city", "chicago"], dir.path());

    assert!(success);
    assert!(stdout.contains("| Most Popular Month"));
    assert!(stdout.contains("1 hours, 1 minutes, 1 seconds"));
    assert!(stdout.contains("Calculated in"));
}

#[test]
fn test_stats_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, success) = run(
        &["stats", "--city", "washington", "--month", "june", "--json"],
        dir.path(),
    );

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["record_count"], 1);
    assert_eq!(parsed["user"]["stats"]["gender"]["status"], "not_available");
}

#[test]
fn test_invalid_month_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, success) = run(&["stats", "--city", "chicago", "--month", "july"], dir.path());

    assert!(!success);
    assert!(stderr.contains("unknown month"));
}

#[test]
fn test_raw_past_end() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, success) = run(&["raw", "--city", "chicago", "--offset", "10"], dir.path());

    assert!(success);
    assert!(stdout.contains("No more data to display."));
}

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, success) = run(
        &["export", "--city", "new york city", "--day", "monday"],
        dir.path(),
    );

    // no new_york_city.csv fixture
    assert!(!success);

    let (stdout, _, success) = run(&["export", "--city", "chicago", "--day", "monday"], dir.path());
    assert!(success);
    assert!(stdout.contains("chicago_all_monday_bikeshare_data.csv"));
    assert!(dir.path().join("chicago_all_monday_bikeshare_data.csv").exists());
}

#[test]
fn test_rust_log_raises_stderr_level() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["stats", "--city", "chicago"];

    let (_, stderr, success) = run_with_log_level(&args, dir.path(), None);
    assert!(success);
    assert!(stderr.contains("City data loaded"));
    assert!(!stderr.contains("Opening city file"));

    let (_, stderr, success) = run_with_log_level(&args, dir.path(), Some("debug"));
    assert!(success);
    assert!(stderr.contains("Opening city file"));
    assert!(stderr.contains("Applied filter"));
}
