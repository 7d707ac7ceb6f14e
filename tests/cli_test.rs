//! End-to-end runs of the `attendance` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn attendance(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("attendance").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("ATTENDANCE_DATA_FILE", data_dir.path().join("attendance.csv"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    attendance(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("filter"));
}

#[test]
fn add_then_summary() {
    let dir = TempDir::new().unwrap();

    attendance(&dir)
        .args(["add", "101", "2026-02-01", "Present"])
        .assert()
        .success()
        .stdout("Record added.\n");

    attendance(&dir)
        .args(["summary", "101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Present: 1  Absent: 0  Leave: 0  Rate: 100.0%"));
}

#[test]
fn validation_errors_exit_non_zero() {
    let dir = TempDir::new().unwrap();

    attendance(&dir)
        .args(["add", "101", "02-01-2026", "Present"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Date must be in YYYY-MM-DD format"));

    attendance(&dir)
        .args(["add", "101", "2026-02-01", "Late"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Status must be one of Present, Absent, Leave"));

    // nothing was written
    assert!(!dir.path().join("attendance.csv").exists());
}

#[test]
fn usage_errors_exit_two() {
    let dir = TempDir::new().unwrap();
    attendance(&dir).args(["add", "101"]).assert().code(2);
    attendance(&dir).args(["filter", "2026-02-01"]).assert().code(2);
}

#[test]
fn list_and_unknown_employee() {
    let dir = TempDir::new().unwrap();

    attendance(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("No attendance records yet.\n");

    attendance(&dir)
        .args(["summary", "999"])
        .assert()
        .success()
        .stdout("No records found for this employee.\n");
}

#[test]
fn import_reports_count_and_export_round_trips() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("upload.csv");
    std::fs::write(
        &source,
        "Employee_ID,Date,Status\n2,2026-02-02,Absent\n1,2026-02-01,Present\nx,2026-02-01,Present\n",
    )
    .unwrap();

    attendance(&dir)
        .arg("import")
        .arg(&source)
        .assert()
        .success()
        .stdout("Imported 2 records.\n");

    let exported = dir.path().join("out.csv");
    attendance(&dir)
        .arg("export")
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Exported 2 records"));

    assert_eq!(
        std::fs::read_to_string(&exported).unwrap(),
        "Employee_ID,Date,Status\n1,2026-02-01,Present\n2,2026-02-02,Absent\n"
    );
}
