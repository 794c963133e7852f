use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures every ledger, history, and persistence failure.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid occurrence: {0}")]
    InvalidOccurrence(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("The transaction index provided is invalid (index {index}, {displayed} displayed)")]
    InvalidTargetIndex { index: usize, displayed: usize },
    #[error("No undoable command to undo!")]
    NothingToUndo,
    #[error("No undone command to redo!")]
    NothingToRedo,
    #[error("This transaction already exists: {0}")]
    DuplicateTransaction(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Date out of supported range: {0}")]
    DateOutOfRange(String),
    #[error("Internal contract violated: {0}")]
    ContractViolation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// Returns true for programming errors that correct callers never trigger.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, LedgerError::ContractViolation(_))
    }
}

pub type Result<T> = StdResult<T, LedgerError>;
