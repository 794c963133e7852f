use super::{Command, CommandState, Undoable};
use crate::core::context::CommandContext;
use crate::errors::{LedgerError, Result};
use crate::ledger::{Transaction, TransactionKind};

pub const EXPENSE_WORD: &str = "expense";
pub const INCOME_WORD: &str = "income";

/// Adds a new expense or income at the end of the store.
#[derive(Debug)]
pub struct AddCommand {
    transaction: Transaction,
    state: CommandState,
}

impl AddCommand {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            state: CommandState::Constructed,
        }
    }

    fn word(&self) -> &'static str {
        match self.transaction.kind() {
            TransactionKind::Expense => EXPENSE_WORD,
            TransactionKind::Income => INCOME_WORD,
        }
    }
}

impl Command for AddCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_executable(self.word())?;
        if ctx.store.contains(&self.transaction) {
            return Err(LedgerError::DuplicateTransaction(
                self.transaction.to_string(),
            ));
        }
        ctx.store.append(self.transaction.clone());
        ctx.scroll_if_visible(&self.transaction);
        self.state = CommandState::Executed;
        tracing::info!(kind = %self.transaction.kind(), "added transaction");
        Ok(format!(
            "New {} added: {}",
            self.transaction.kind(),
            self.transaction
        ))
    }
}

impl Undoable for AddCommand {
    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_undoable(self.word())?;
        let removed = ctx.store.remove(&self.transaction)?;
        self.state = CommandState::Undone;
        Ok(format!("Deleted transaction: {removed}"))
    }

    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<String> {
        self.state.ensure_redoable(self.word())?;
        ctx.store.append(self.transaction.clone());
        ctx.scroll_if_visible(&self.transaction);
        self.state = CommandState::Redone;
        Ok(format!("Added transaction: {}", self.transaction))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::clock::FixedClock;
    use crate::ledger::{Description, TransactionList, TransactionStore, Value};

    fn salary() -> Transaction {
        Transaction::income(
            Description::new("Salary").unwrap(),
            Value::from_cents(300_000),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn duplicate_values_are_refused() {
        let mut store = TransactionList::from_transactions(vec![salary()]);
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        let mut ctx = CommandContext::new(&mut store, &clock);
        let err = AddCommand::new(salary()).execute(&mut ctx).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateTransaction(_)));
        assert_eq!(ctx.store.len(), 1);
    }

    #[test]
    fn add_undo_redo_cycle() {
        let mut store = TransactionList::new();
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        let mut ctx = CommandContext::new(&mut store, &clock);
        let mut command = AddCommand::new(salary());

        let message = command.execute(&mut ctx).unwrap();
        assert!(message.starts_with("New income added: [+] Salary"));
        command.undo(&mut ctx).unwrap();
        assert!(ctx.store.is_empty());
        command.redo(&mut ctx).unwrap();
        assert_eq!(ctx.store.get(0), Some(&salary()));
    }
}
