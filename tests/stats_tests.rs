//! Integration tests for the stats command

#![allow(deprecated)]

use chrono::{Duration, Local, NaiveDate};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{in_log, init_log};

fn days_ago(n: i64) -> NaiveDate {
    Local::now().date_naive() - Duration::days(n)
}

fn add(temp: &TempDir, weight: f64, date: NaiveDate) {
    in_log(temp.path())
        .arg("add")
        .arg(weight.to_string())
        .arg("--date")
        .arg(date.format("%Y-%m-%d").to_string())
        .assert()
        .success();
}

#[test]
fn test_stats_empty_log() {
    let temp = TempDir::new().unwrap();
    init_log(temp.path());

    in_log(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("RANGE: WEEKLY"))
        .stdout(predicate::str::contains("7-day avg:     0.00 kg (no data)"))
        .stdout(predicate::str::contains("30-day avg:    0.00 kg"))
        .stdout(predicate::str::contains("Total change:  +0.00 kg"))
        .stdout(predicate::str::contains("No data in range"))
        .stdout(predicate::str::contains("BMI trend:      →"));
}

#[test]
fn test_weekly_range_excludes_old_records() {
    let temp = TempDir::new().unwrap();
    init_log(temp.path());

    add(&temp, 80.0, days_ago(10));
    add(&temp, 79.0, days_ago(3));
    add(&temp, 78.0, days_ago(1));

    let old_label = days_ago(10).format("%d/%m").to_string();
    let recent_label = days_ago(3).format("%d/%m").to_string();

    in_log(temp.path())
        .arg("stats")
        .arg("--range")
        .arg("weekly")
        .assert()
        .success()
        .stdout(predicate::str::contains("7-day avg:     78.50 kg (2 samples)"))
        .stdout(predicate::str::contains("30-day avg:    79.00 kg"))
        .stdout(predicate::str::contains("Total change:  -1.00 kg"))
        .stdout(predicate::str::contains("Records:       3"))
        .stdout(predicate::str::contains(format!("{}   79.00 kg", recent_label)))
        .stdout(predicate::str::contains(format!("{}   80.00 kg", old_label)).not());

    in_log(temp.path())
        .arg("stats")
        .arg("--range")
        .arg("monthly")
        .assert()
        .success()
        .stdout(predicate::str::contains("RANGE: MONTHLY"))
        .stdout(predicate::str::contains("Total change:  -2.00 kg"));
}

#[test]
fn test_stats_uses_configured_range() {
    let temp = TempDir::new().unwrap();
    init_log(temp.path());

    in_log(temp.path())
        .arg("config")
        .arg("default_range")
        .arg("all")
        .assert()
        .success();

    in_log(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("RANGE: ALL"));
}

#[test]
fn test_stats_invalid_range_fails() {
    let temp = TempDir::new().unwrap();
    init_log(temp.path());

    in_log(temp.path())
        .arg("stats")
        .arg("--range")
        .arg("fortnightly")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("weekly, monthly, yearly, all"));
}

#[test]
fn test_stats_biometric_indicators() {
    let temp = TempDir::new().unwrap();
    init_log(temp.path());

    let csv = temp.path().join("scale.csv");
    fs::write(
        &csv,
        format!(
            "date,weight,bodyFat,muscleMass,bmi\n{},70,16,30,20\n{},70,15,30,20.05\n",
            days_ago(2).format("%Y-%m-%d"),
            days_ago(1).format("%Y-%m-%d"),
        ),
    )
    .unwrap();
    in_log(temp.path()).arg("import").arg(&csv).assert().success();

    in_log(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Biometric records: 2"))
        .stdout(predicate::str::contains("Body fat (7d):  15.5 %"))
        .stdout(predicate::str::contains("Muscle/fat:     2.00"))
        .stdout(predicate::str::contains("BMI trend:      →"));
}
