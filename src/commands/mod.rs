//! Units of work dispatched against a session.

pub mod add;
pub mod clone;
pub mod delete;
pub mod list;
pub mod update;

use std::fmt;

use crate::core::context::CommandContext;
use crate::errors::{LedgerError, Result};
use crate::ledger::Transaction;

pub use add::AddCommand;
pub use clone::CloneCommand;
pub use delete::DeleteCommand;
pub use list::ListCommand;
pub use update::UpdateCommand;

/// A single unit of work. Returns a human-readable summary on success.
pub trait Command: fmt::Debug {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<String>;
}

/// Commands whose effect on the store can be reversed and re-applied.
///
/// `undo` is valid after `execute` or `redo`; `redo` only after `undo`. Both
/// work from state retained by `execute`, never by re-deriving it.
pub trait Undoable: Command {
    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String>;
    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String>;
}

/// A command ready to be run by a session.
#[derive(Debug)]
pub enum Dispatch {
    Plain(Box<dyn Command>),
    Undoable(Box<dyn Undoable>),
}

impl Dispatch {
    pub fn plain(command: impl Command + 'static) -> Self {
        Dispatch::Plain(Box::new(command))
    }

    pub fn undoable(command: impl Undoable + 'static) -> Self {
        Dispatch::Undoable(Box::new(command))
    }
}

/// One-based position in the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    pub fn from_one_based(index: usize) -> Result<Self> {
        if index == 0 {
            return Err(LedgerError::Validation(
                "index must be a positive integer".into(),
            ));
        }
        Ok(Self(index - 1))
    }

    pub fn from_zero_based(index: usize) -> Self {
        Self(index)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }

    /// Looks the index up in the store's displayed list.
    ///
    /// Returns the entry's position in the full store along with a copy of
    /// it, so equal-valued entries are told apart by position.
    pub fn resolve(self, ctx: &CommandContext<'_>) -> Result<(usize, Transaction)> {
        ctx.store
            .store_position(self.0)
            .and_then(|position| {
                ctx.store
                    .get(position)
                    .map(|transaction| (position, transaction.clone()))
            })
            .ok_or_else(|| LedgerError::InvalidTargetIndex {
                index: self.one_based(),
                displayed: ctx.store.displayed_len(),
            })
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

/// Lifecycle of an undoable command instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Constructed,
    Executed,
    Undone,
    Redone,
}

impl CommandState {
    pub fn ensure_executable(self, command: &str) -> Result<()> {
        match self {
            CommandState::Constructed => Ok(()),
            other => Err(violation(command, "execute", other)),
        }
    }

    pub fn ensure_undoable(self, command: &str) -> Result<()> {
        match self {
            CommandState::Executed | CommandState::Redone => Ok(()),
            other => Err(violation(command, "undo", other)),
        }
    }

    pub fn ensure_redoable(self, command: &str) -> Result<()> {
        match self {
            CommandState::Undone => Ok(()),
            other => Err(violation(command, "redo", other)),
        }
    }
}

fn violation(command: &str, action: &str, state: CommandState) -> LedgerError {
    tracing::error!(command, action, ?state, "command used outside its lifecycle");
    LedgerError::ContractViolation(format!("cannot {action} {command} while {state:?}"))
}

/// Joins transactions one per line for undo/redo summaries.
pub(crate) fn list_lines(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_rejects_zero() {
        assert!(Index::from_one_based(0).is_err());
        let index = Index::from_one_based(3).unwrap();
        assert_eq!(index.zero_based(), 2);
        assert_eq!(index.to_string(), "3");
    }

    #[test]
    fn state_guards() {
        assert!(CommandState::Constructed.ensure_executable("clone").is_ok());
        assert!(CommandState::Executed.ensure_executable("clone").is_err());
        assert!(CommandState::Constructed.ensure_undoable("clone").is_err());
        assert!(CommandState::Redone.ensure_undoable("clone").is_ok());
        assert!(CommandState::Executed.ensure_redoable("clone").is_err());
        let err = CommandState::Undone.ensure_undoable("clone").unwrap_err();
        assert!(err.is_contract_violation());
    }
}
