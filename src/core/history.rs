//! Undo/redo stack discipline for reversible commands.

use std::collections::VecDeque;

use crate::commands::Undoable;
use crate::errors::{LedgerError, Result};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Two chronological stacks of reversible commands.
///
/// History never calls `undo`/`redo` itself; it only moves commands between
/// the stacks and hands the moved command back to the caller. Recording a
/// new command discards every pending redo entry.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Box<dyn Undoable>>,
    redo_stack: Vec<Box<dyn Undoable>>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the undo stack at `limit` entries; `0` leaves it unbounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn record(&mut self, command: Box<dyn Undoable>) {
        if self.has_redo() {
            tracing::debug!(discarded = self.redo_stack.len(), "clearing redo stack");
            self.redo_stack.clear();
        }
        self.undo_stack.push_back(command);
        if self.limit > 0 && self.undo_stack.len() > self.limit {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!(?evicted, "history limit reached, dropping oldest command");
            }
        }
    }

    /// Moves the newest undoable command onto the redo stack and returns it.
    pub fn pop_for_undo(&mut self) -> Result<&mut dyn Undoable> {
        let command = self.undo_stack.pop_back().ok_or(LedgerError::NothingToUndo)?;
        self.redo_stack.push(command);
        let command: &mut dyn Undoable = match self.redo_stack.last_mut() {
            Some(command) => command.as_mut(),
            None => return Err(LedgerError::NothingToUndo),
        };
        Ok(command)
    }

    /// Moves the newest undone command back onto the undo stack and returns it.
    pub fn pop_for_redo(&mut self) -> Result<&mut dyn Undoable> {
        let command = self.redo_stack.pop().ok_or(LedgerError::NothingToRedo)?;
        self.undo_stack.push_back(command);
        let command: &mut dyn Undoable = match self.undo_stack.back_mut() {
            Some(command) => command.as_mut(),
            None => return Err(LedgerError::NothingToRedo),
        };
        Ok(command)
    }

    /// Reverses the last `pop_for_undo` after the command's undo failed.
    pub fn rollback_undo(&mut self) {
        if let Some(command) = self.redo_stack.pop() {
            self.undo_stack.push_back(command);
        }
    }

    /// Reverses the last `pop_for_redo` after the command's redo failed.
    pub fn rollback_redo(&mut self) {
        if let Some(command) = self.undo_stack.pop_back() {
            self.redo_stack.push(command);
        }
    }

    pub fn has_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::core::context::CommandContext;

    #[derive(Debug)]
    struct Marker(u32);

    impl Command for Marker {
        fn execute(&mut self, _ctx: &mut CommandContext<'_>) -> Result<String> {
            Ok(format!("marker {}", self.0))
        }
    }

    impl Undoable for Marker {
        fn undo(&mut self, _ctx: &mut CommandContext<'_>) -> Result<String> {
            Ok(format!("undo {}", self.0))
        }

        fn redo(&mut self, _ctx: &mut CommandContext<'_>) -> Result<String> {
            Ok(format!("redo {}", self.0))
        }
    }

    fn tag(command: &dyn Undoable) -> String {
        format!("{command:?}")
    }

    #[test]
    fn empty_history_reports_nothing_to_do() {
        let mut history = History::new();
        assert!(matches!(
            history.pop_for_undo(),
            Err(LedgerError::NothingToUndo)
        ));
        assert!(matches!(
            history.pop_for_redo(),
            Err(LedgerError::NothingToRedo)
        ));
    }

    #[test]
    fn undo_then_redo_moves_between_stacks() {
        let mut history = History::new();
        history.record(Box::new(Marker(1)));
        history.record(Box::new(Marker(2)));

        assert_eq!(tag(history.pop_for_undo().unwrap()), "Marker(2)");
        assert_eq!((history.undo_len(), history.redo_len()), (1, 1));
        assert_eq!(tag(history.pop_for_undo().unwrap()), "Marker(1)");
        assert!(!history.has_undo());

        assert_eq!(tag(history.pop_for_redo().unwrap()), "Marker(1)");
        assert_eq!(tag(history.pop_for_redo().unwrap()), "Marker(2)");
        assert!(!history.has_redo());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = History::new();
        history.record(Box::new(Marker(1)));
        history.pop_for_undo().unwrap();
        assert!(history.has_redo());

        history.record(Box::new(Marker(2)));
        assert!(!history.has_redo());
        assert!(matches!(
            history.pop_for_redo(),
            Err(LedgerError::NothingToRedo)
        ));
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = History::with_limit(2);
        for id in 1..=3 {
            history.record(Box::new(Marker(id)));
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(tag(history.pop_for_undo().unwrap()), "Marker(3)");
        assert_eq!(tag(history.pop_for_undo().unwrap()), "Marker(2)");
        assert!(history.pop_for_undo().is_err());
    }

    #[test]
    fn rollback_restores_stacks() {
        let mut history = History::new();
        history.record(Box::new(Marker(1)));
        history.pop_for_undo().unwrap();
        history.rollback_undo();
        assert_eq!((history.undo_len(), history.redo_len()), (1, 0));

        history.pop_for_undo().unwrap();
        history.pop_for_redo().unwrap();
        history.rollback_redo();
        assert_eq!((history.undo_len(), history.redo_len()), (0, 1));
    }
}
