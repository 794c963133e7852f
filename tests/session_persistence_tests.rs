mod common;

use common::{date, expense, session_on, setup_test_dir};
use spendbook::{
    commands::{CloneCommand, DeleteCommand, Dispatch, Index, UpdateCommand},
    config::{Config, ConfigManager},
    errors::LedgerError,
    ledger::{Remark, TransactionEdits, TransactionStore},
    utils::persistence,
};

#[test]
fn save_then_load_restores_transactions_and_clears_history() {
    let dir = setup_test_dir();
    let path = dir.join("books.json");
    let mut session = session_on(
        date(2024, 6, 10),
        vec![expense("Lunch", 1250, date(2024, 1, 15))],
    );
    session
        .run(Dispatch::undoable(CloneCommand::new(
            Index::from_one_based(1).unwrap(),
            "monthly:2".parse().unwrap(),
        )))
        .unwrap();
    session.save(&path).unwrap();
    assert!(session.history().has_undo());

    let mut restored = session_on(date(2024, 6, 10), Vec::new());
    restored
        .run(Dispatch::undoable(CloneCommand::new(
            Index::from_one_based(1).unwrap(),
            "daily:1".parse().unwrap(),
        )))
        .unwrap_err();
    assert_eq!(restored.load(&path).unwrap(), 3);
    assert_eq!(restored.store().as_slice(), session.store().as_slice());
    assert!(!restored.history().has_undo());
    assert!(matches!(restored.undo(), Err(LedgerError::NothingToUndo)));
}

#[test]
fn failed_load_keeps_the_current_session() {
    let dir = setup_test_dir();
    let mut session = session_on(
        date(2024, 6, 10),
        vec![expense("Lunch", 1250, date(2024, 1, 15))],
    );
    session
        .run(Dispatch::undoable(DeleteCommand::new(
            Index::from_one_based(1).unwrap(),
        )))
        .unwrap();

    assert!(session.load(&dir.join("missing.json")).is_err());
    assert!(session.store().is_empty());
    assert!(session.history().has_undo());
}

#[test]
fn edits_survive_a_round_trip_through_disk() {
    let dir = setup_test_dir();
    let path = dir.join("edited.json");
    let mut session = session_on(
        date(2024, 6, 10),
        vec![expense("Lunch", 1250, date(2024, 1, 15))],
    );
    let edits = TransactionEdits {
        remark: Some(Remark::new("team lunch")),
        ..TransactionEdits::default()
    };
    session
        .run(Dispatch::undoable(
            UpdateCommand::new(Index::from_one_based(1).unwrap(), edits).unwrap(),
        ))
        .unwrap();
    session.save(&path).unwrap();

    let loaded = persistence::load_transactions(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].remark().as_str(), "team lunch");
}

#[test]
fn config_drives_history_depth_and_data_file() {
    let dir = setup_test_dir();
    let manager = ConfigManager::with_base_dir(dir.clone());
    let config = Config {
        data_file: None,
        history_limit: 2,
    };
    manager.save(&config).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(manager.data_file(&config), dir.join("transactions.json"));

    let clock = spendbook::core::FixedClock::new(date(2024, 6, 10));
    let mut session = spendbook::core::Session::with_config(Box::new(clock), &config)
        .with_transactions(vec![expense("Lunch", 1250, date(2024, 1, 15))]);
    for _ in 0..3 {
        session
            .run(Dispatch::undoable(CloneCommand::new(
                Index::from_one_based(1).unwrap(),
                "daily:1".parse().unwrap(),
            )))
            .unwrap();
    }
    assert_eq!(session.store().len(), 4);
    assert_eq!(session.history().undo_len(), 2);
}
