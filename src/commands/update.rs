use super::{Command, CommandState, Index, Undoable};
use crate::core::context::CommandContext;
use crate::errors::{LedgerError, Result};
use crate::ledger::{Transaction, TransactionEdits};

pub const COMMAND_WORD: &str = "update";

/// Replaces the displayed transaction at an index with an edited copy.
#[derive(Debug)]
pub struct UpdateCommand {
    target: Index,
    edits: TransactionEdits,
    state: CommandState,
    swap: Option<Swap>,
}

/// Where an update landed and the entries on either side of it.
#[derive(Debug)]
struct Swap {
    position: usize,
    original: Transaction,
    updated: Transaction,
}

impl UpdateCommand {
    pub fn new(target: Index, edits: TransactionEdits) -> Result<Self> {
        if edits.is_empty() {
            return Err(LedgerError::Validation(
                "at least one field to update must be provided".into(),
            ));
        }
        Ok(Self {
            target,
            edits,
            state: CommandState::Constructed,
            swap: None,
        })
    }

    fn swap(&self) -> Result<&Swap> {
        self.swap.as_ref().ok_or_else(|| {
            LedgerError::ContractViolation("update has no retained transactions".into())
        })
    }
}

impl Command for UpdateCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_executable(COMMAND_WORD)?;
        let (position, original) = self.target.resolve(ctx)?;
        let updated = original.edited(&self.edits);
        if updated != original && ctx.store.contains(&updated) {
            return Err(LedgerError::DuplicateTransaction(updated.to_string()));
        }
        ctx.store.replace_at(position, updated.clone())?;
        let message = format!("Updated transaction: {updated}\nOriginal: {original}");
        self.swap = Some(Swap {
            position,
            original,
            updated,
        });
        self.state = CommandState::Executed;
        Ok(message)
    }
}

impl Undoable for UpdateCommand {
    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_undoable(COMMAND_WORD)?;
        let swap = self.swap()?;
        swap_in(ctx, swap.position, &swap.updated, swap.original.clone())?;
        let message = format!("Reverted transaction: {}", swap.original);
        self.state = CommandState::Undone;
        Ok(message)
    }

    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_redoable(COMMAND_WORD)?;
        let swap = self.swap()?;
        swap_in(ctx, swap.position, &swap.original, swap.updated.clone())?;
        let message = format!("Updated transaction: {}", swap.updated);
        self.state = CommandState::Redone;
        Ok(message)
    }
}

/// Replaces the entry at `position`, which must still equal `expected`.
fn swap_in(
    ctx: &mut CommandContext<'_>,
    position: usize,
    expected: &Transaction,
    replacement: Transaction,
) -> Result<()> {
    if ctx.store.get(position) != Some(expected) {
        tracing::error!(position, "updated transaction moved since it was edited");
        return Err(LedgerError::ContractViolation(
            "updated transaction is no longer at its original position".into(),
        ));
    }
    ctx.store.replace_at(position, replacement)?;
    Ok(())
}
