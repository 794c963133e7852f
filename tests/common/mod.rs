#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use spendbook::{
    core::{FixedClock, Session},
    ledger::{Description, Transaction, Value},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn setup_test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn expense(description: &str, cents: u64, on: NaiveDate) -> Transaction {
    Transaction::expense(
        Description::new(description).expect("valid description"),
        Value::from_cents(cents),
        on,
    )
}

/// A session whose clock is pinned to `today`, seeded with `transactions`.
pub fn session_on(today: NaiveDate, transactions: Vec<Transaction>) -> Session {
    Session::new(Box::new(FixedClock::new(today))).with_transactions(transactions)
}
