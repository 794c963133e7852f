use super::{list_lines, Command, CommandState, Index, Undoable};
use crate::core::clone_engine::CloneEngine;
use crate::core::context::CommandContext;
use crate::errors::{LedgerError, Result};
use crate::ledger::{Occurrence, TimeInterval, TimeUnit, Transaction};

pub const COMMAND_WORD: &str = "clone";

/// Clones the displayed transaction at an index, optionally as a recurring batch.
#[derive(Debug)]
pub struct CloneCommand {
    target: Index,
    occurrence: Occurrence,
    unit: TimeUnit,
    state: CommandState,
    batch: Vec<Transaction>,
}

impl CloneCommand {
    pub fn new(target: Index, occurrence: Occurrence) -> Self {
        Self {
            target,
            occurrence,
            unit: occurrence.frequency_unit(),
            state: CommandState::Constructed,
            batch: Vec::new(),
        }
    }

    pub fn target(&self) -> Index {
        self.target
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// Calendar step derived from the occurrence at construction.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The clones appended by the last execute, in append order.
    pub fn batch(&self) -> &[Transaction] {
        &self.batch
    }
}

impl Command for CloneCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_executable(COMMAND_WORD)?;
        let (_, source) = self.target.resolve(ctx)?;
        let step = TimeInterval::single(self.unit);
        self.batch =
            CloneEngine::clone_into(ctx, &source, step, self.occurrence.occurrence_count())?;
        self.state = CommandState::Executed;

        let (frequency, times) = if self.occurrence.is_single_shot() {
            ("for today", 1)
        } else {
            (
                self.occurrence.frequency_label(),
                self.occurrence.occurrence_count(),
            )
        };
        Ok(format!(
            "Cloned transaction: {source}\n(Cloned {frequency} {times} time(s))"
        ))
    }
}

impl Undoable for CloneCommand {
    /// Pops exactly the entries the matching execute appended.
    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_undoable(COMMAND_WORD)?;
        let count = self.batch.len();
        let len = ctx.store.len();
        let tail_matches = len >= count
            && self
                .batch
                .iter()
                .enumerate()
                .all(|(offset, clone)| ctx.store.get(len - count + offset) == Some(clone));
        if !tail_matches {
            tracing::error!(count, len, "store tail no longer holds the cloned batch");
            return Err(LedgerError::ContractViolation(
                "store tail no longer holds the cloned batch".into(),
            ));
        }

        let mut removed = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(transaction) = ctx.store.remove_last() {
                removed.push(transaction);
            }
        }
        self.state = CommandState::Undone;
        tracing::debug!(removed = removed.len(), "undid clone");
        Ok(format!(
            "Deleted cloned transaction(s):\n{}",
            list_lines(&removed)
        ))
    }

    /// Re-appends the retained batch, so redo never re-reads today's date.
    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_redoable(COMMAND_WORD)?;
        for clone in &self.batch {
            ctx.store.append(clone.clone());
            ctx.scroll_if_visible(clone);
        }
        self.state = CommandState::Redone;
        tracing::debug!(added = self.batch.len(), "redid clone");
        Ok(format!(
            "Added cloned transaction(s):\n{}",
            list_lines(&self.batch)
        ))
    }
}
