use super::{Command, CommandState, Index, Undoable};
use crate::core::context::CommandContext;
use crate::errors::{LedgerError, Result};
use crate::ledger::Transaction;

pub const COMMAND_WORD: &str = "delete";

/// Removes the displayed transaction at an index.
#[derive(Debug)]
pub struct DeleteCommand {
    target: Index,
    state: CommandState,
    removed: Option<(usize, Transaction)>,
}

impl DeleteCommand {
    pub fn new(target: Index) -> Self {
        Self {
            target,
            state: CommandState::Constructed,
            removed: None,
        }
    }

    fn removed(&self) -> Result<&(usize, Transaction)> {
        self.removed.as_ref().ok_or_else(|| {
            LedgerError::ContractViolation("delete has no retained transaction".into())
        })
    }
}

impl Command for DeleteCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_executable(COMMAND_WORD)?;
        let (position, _) = self.target.resolve(ctx)?;
        let removed = ctx.store.remove_at(position)?;
        let message = format!("Deleted transaction: {removed}");
        self.removed = Some((position, removed));
        self.state = CommandState::Executed;
        Ok(message)
    }
}

impl Undoable for DeleteCommand {
    /// Puts the entry back at its original position.
    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_undoable(COMMAND_WORD)?;
        let (position, transaction) = self.removed()?.clone();
        let message = format!("Added deleted transaction: {transaction}");
        ctx.store.insert(position, transaction)?;
        self.state = CommandState::Undone;
        Ok(message)
    }

    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_redoable(COMMAND_WORD)?;
        let (position, transaction) = self.removed()?;
        if ctx.store.get(*position) != Some(transaction) {
            return Err(LedgerError::ContractViolation(
                "deleted transaction is no longer at its original position".into(),
            ));
        }
        let removed = ctx.store.remove_at(*position)?;
        self.state = CommandState::Redone;
        Ok(format!("Deleted transaction: {removed}"))
    }
}
