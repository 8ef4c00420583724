//! End-to-end runs of the `budgetlens` binary against a temporary data dir

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "budgetlens";

fn lens(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGETLENS_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_creates_data_files() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialized BudgetLens"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("budgets.json").exists());

    lens(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("already set up"));
}

#[test]
fn budget_analysis_round_trip() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["budget", "add", "Food", "Transport", "--amount", "100", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("Food + Transport"));

    for (amount, category) in [("100", "Food"), ("50", "Transport")] {
        lens(&dir)
            .args(["txn", "add", amount, "--category", category, "--date", "2024-06-10"])
            .assert()
            .success();
    }

    lens(&dir)
        .args(["budget", "analyze", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("$150.00").and(contains("over by $50.00")));
}

#[test]
fn conflicting_budget_fails() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["budget", "add", "Food,Transport", "--amount", "300", "--month", "2024-06"])
        .assert()
        .success();

    lens(&dir)
        .args(["budget", "add", "food", "--amount", "50", "--month", "2024-06"])
        .assert()
        .failure()
        .stderr(contains("Categories already budgeted for 2024-06: food"));
}

#[test]
fn invalid_budget_input_is_reported() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["budget", "add", "Food", "--amount", "-5", "--month", "2024-06"])
        .assert()
        .failure()
        .stderr(contains("greater than zero"));

    lens(&dir)
        .args(["budget", "add", "Food", "--amount", "5", "--month", "2024-6"])
        .assert()
        .failure()
        .stderr(contains("expected YYYY-MM"));
}

#[test]
fn calendar_and_summary_render() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["budget", "add", "Food", "--amount", "100", "--month", "2023-03"])
        .assert()
        .success();
    lens(&dir)
        .args(["txn", "add", "90", "--category", "Food", "--date", "2023-03-05"])
        .assert()
        .success();
    lens(&dir)
        .args(["txn", "add", "500", "--income", "--date", "2023-03-06"])
        .assert()
        .success();

    lens(&dir)
        .args(["budget", "calendar", "--year", "2023"])
        .assert()
        .success()
        .stdout(contains("Mar").and(contains("warning")));

    lens(&dir)
        .args(["report", "summary", "--window", "previous", "--year", "2023"])
        .assert()
        .success()
        .stdout(contains("Total expenses:  $90.00").and(contains("Top category:    Food")));

    lens(&dir)
        .args(["report", "years"])
        .assert()
        .success()
        .stdout(contains("2023"));
}

#[test]
fn unknown_window_is_rejected() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["report", "summary", "--window", "fortnight"])
        .assert()
        .failure()
        .stderr(contains("Unknown time window"));
}

#[test]
fn history_lists_changes() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["budget", "add", "Rent", "--amount", "900", "--month", "2024-01"])
        .assert()
        .success();

    lens(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(contains("CREATE Budget").and(contains("(Rent)")));
}

#[test]
fn config_set_persists() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["config", "warning_threshold", "60"])
        .assert()
        .success();

    lens(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("warning_threshold:  60"));
}

#[test]
fn bad_date_format_is_refused() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["config", "date_format", "%Q"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    lens(&dir)
        .args(["txn", "add", "5", "--category", "Food", "--date", "2024-06-01"])
        .assert()
        .success();
    lens(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(contains("2024-06-01"));
}

#[test]
fn bad_date_format_in_config_file_falls_back() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"date_format": "%Q"}"#).unwrap();

    lens(&dir)
        .args(["txn", "add", "5", "--category", "Food", "--date", "2024-06-01"])
        .assert()
        .success()
        .stdout(contains("2024-06-01"));
}

#[test]
fn double_sign_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    lens(&dir)
        .args(["budget", "add", "Food", "--amount", "--5", "--month", "2024-06"])
        .assert()
        .failure()
        .stderr(contains("Invalid money format"));

    lens(&dir)
        .args(["budget", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Food").not());
}
