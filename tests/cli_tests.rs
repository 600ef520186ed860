#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env_remove("MONTH_GRID_CONFIG");
    cmd
}

fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    cli().write_stdin(script.to_string()).assert()
}

#[test]
fn cli_jumps_to_month_and_navigates() {
    run_cli("go 2024-02\nnext\nprev\nprev\nquit\n")
        .success()
        .stdout(str_contains("February 2024"))
        .stdout(str_contains("March 2024"))
        .stdout(str_contains("January 2024"));
}

#[test]
fn cli_prev_from_january_rolls_back_year() {
    run_cli("go 2024-01\nprev\nquit\n")
        .success()
        .stdout(str_contains("December 2023"));
}

#[test]
fn cli_switches_week_start() {
    run_cli("week mon\nquit\n")
        .success()
        .stdout(str_contains("Week starts on monday."))
        .stdout(str_contains(" Mon   Tue   Wed   Thu   Fri   Sat   Sun  "));
}

#[test]
fn cli_rejects_invalid_month() {
    run_cli("go 2024-13\nquit\n")
        .success()
        .stdout(str_contains("Error: invalid month '13'"));
}

#[test]
fn cli_loads_config_holidays() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"week_start": "monday", "holidays": {"2024-07-04": "Independence Day"}}"#,
    )
    .unwrap();

    cli()
        .arg(&config)
        .write_stdin("go 2024-07\nholidays\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("Config loaded from"))
        .stdout(str_contains("2024-07-04  Independence Day"))
        .stdout(str_contains(" Mon   Tue"));
}

#[test]
fn cli_save_and_load_csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"holidays": {"2024-12-25": "Christmas Day"}}"#).unwrap();
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!("save csv {path}\nload csv {path}\ngo 2024-12\nholidays\nquit\n");

    let assert = cli().arg(&config).write_stdin(script).assert().success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Holidays saved to"), "{output}");
    assert!(output.contains("Loaded 1 holidays from"), "{output}");
    assert!(output.contains("2024-12-25  Christmas Day"), "{output}");
}

#[test]
fn cli_prints_year_view() {
    let assert = run_cli("year 2024\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Annual Calendar 2024"));
    for month in ["January 2024", "June 2024", "December 2024"] {
        assert!(output.contains(month), "missing {month}");
    }
}

#[test]
fn cli_prints_grid_json() {
    run_cli("go 2024-02\njson\nquit\n")
        .success()
        .stdout(str_contains("\"leading_blanks\": 4"));
}

#[test]
fn cli_marks_holiday_on_weekend_with_both_markers() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    // 2026-07-04 is a Saturday
    fs::write(&config, r#"{"holidays": {"2026-07-04": "Independence Day"}}"#).unwrap();

    let assert = cli()
        .arg(&config)
        .write_stdin("go 2026-07\nquit\n")
        .assert()
        .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let july = output.split("July 2026").last().unwrap_or_default();
    assert!(july.contains(" 4 !*"), "{july}");
    assert!(july.contains(" 5 *"), "{july}");
}

#[test]
fn cli_hides_weekend_marker_when_highlighting_is_off() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"highlight_weekends": false, "holidays": {"2026-07-04": "Independence Day"}}"#,
    )
    .unwrap();

    let assert = cli()
        .arg(&config)
        .write_stdin("go 2026-07\nquit\n")
        .assert()
        .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let july = output.split("July 2026").last().unwrap_or_default();
    assert!(!july.contains('*'), "{july}");
    assert!(july.contains('!'), "{july}");
}

#[test]
fn cli_reads_config_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("env-config.json");
    fs::write(
        &config,
        r#"{"week_start": "monday", "holidays": {"2024-05-01": "Labor Day"}}"#,
    )
    .unwrap();

    cli()
        .env("MONTH_GRID_CONFIG", &config)
        .write_stdin("go 2024-05\nholidays\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("Config loaded from"))
        .stdout(str_contains("env-config.json"))
        .stdout(str_contains("2024-05-01  Labor Day"))
        .stdout(str_contains(" Mon   Tue"));
}
