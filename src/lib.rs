#![doc(test(attr(deny(warnings))))]

//! Spendbook keeps a personal ledger of expenses and incomes with full
//! undo/redo history and calendar-aware cloning of recurring entries.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Spendbook tracing initialized.");
    });
}
