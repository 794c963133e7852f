use std::path::Path;

use crate::commands::Dispatch;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::context::CommandContext;
use crate::core::display::TransactionDisplay;
use crate::core::history::History;
use crate::errors::Result;
use crate::ledger::{Transaction, TransactionList, TransactionStore};
use crate::utils::persistence;

/// Owns the store, the history, and the clock for one editing session.
///
/// Every command runs through [`Session::run`], so undoable commands reach
/// the history only after they executed successfully.
pub struct Session {
    store: TransactionList,
    history: History,
    clock: Box<dyn Clock>,
    display: Option<Box<dyn TransactionDisplay>>,
}

impl Session {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            store: TransactionList::new(),
            history: History::new(),
            clock,
            display: None,
        }
    }

    pub fn with_config(clock: Box<dyn Clock>, config: &Config) -> Self {
        Self {
            history: History::with_limit(config.history_limit),
            ..Self::new(clock)
        }
    }

    /// Seeds the store. Intended for freshly built sessions.
    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.store.set_transactions(transactions);
        self
    }

    pub fn store(&self) -> &TransactionList {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    pub fn attach_display(&mut self, display: Box<dyn TransactionDisplay>) {
        self.display = Some(display);
    }

    pub fn detach_display(&mut self) -> Option<Box<dyn TransactionDisplay>> {
        self.display.take()
    }

    pub fn run(&mut self, dispatch: Dispatch) -> Result<String> {
        let Self {
            store,
            history,
            clock,
            display,
        } = self;
        let mut ctx = context(store, &**clock, display);
        match dispatch {
            Dispatch::Plain(mut command) => command.execute(&mut ctx),
            Dispatch::Undoable(mut command) => {
                let message = command.execute(&mut ctx)?;
                tracing::debug!(?command, "recording command");
                history.record(command);
                Ok(message)
            }
        }
    }

    pub fn undo(&mut self) -> Result<String> {
        let Self {
            store,
            history,
            clock,
            display,
        } = self;
        let command = history.pop_for_undo()?;
        let mut ctx = context(store, &**clock, display);
        match command.undo(&mut ctx) {
            Ok(message) => Ok(message),
            Err(err) => {
                tracing::warn!(%err, "undo failed, command stays on the undo stack");
                history.rollback_undo();
                Err(err)
            }
        }
    }

    pub fn redo(&mut self) -> Result<String> {
        let Self {
            store,
            history,
            clock,
            display,
        } = self;
        let command = history.pop_for_redo()?;
        let mut ctx = context(store, &**clock, display);
        match command.redo(&mut ctx) {
            Ok(message) => Ok(message),
            Err(err) => {
                tracing::warn!(%err, "redo failed, command stays on the redo stack");
                history.rollback_redo();
                Err(err)
            }
        }
    }

    /// Replaces the store with the file's contents and starts a fresh history.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let transactions = persistence::load_transactions(path)?;
        let count = transactions.len();
        self.store.set_transactions(transactions);
        self.history.clear();
        tracing::info!(count, path = %path.display(), "loaded transactions");
        Ok(count)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        persistence::save_transactions(self.store.as_slice(), path)?;
        tracing::info!(count = self.store.len(), path = %path.display(), "saved transactions");
        Ok(())
    }
}

fn context<'a>(
    store: &'a mut TransactionList,
    clock: &'a dyn Clock,
    display: &'a mut Option<Box<dyn TransactionDisplay>>,
) -> CommandContext<'a> {
    let ctx = CommandContext::new(store, clock);
    match display {
        Some(display) => ctx.with_display(&mut **display),
        None => ctx,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::NaiveDate;

    use super::*;
    use crate::commands::{AddCommand, CloneCommand, DeleteCommand, Index, ListCommand};
    use crate::core::clock::FixedClock;
    use crate::errors::LedgerError;
    use crate::ledger::{Description, Occurrence, Value, ViewFilter};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn coffee(on: NaiveDate) -> Transaction {
        Transaction::expense(Description::new("Coffee").unwrap(), Value::from_cents(450), on)
    }

    fn session() -> Session {
        Session::new(Box::new(FixedClock::new(date(2024, 6, 10))))
            .with_transactions(vec![coffee(date(2024, 1, 15))])
    }

    struct Recorder(Rc<RefCell<Vec<usize>>>);

    impl TransactionDisplay for Recorder {
        fn scroll_to(&mut self, displayed_position: usize) {
            self.0.borrow_mut().push(displayed_position);
        }
    }

    #[test]
    fn failed_execute_is_not_recorded() {
        let mut session = session();
        let err = session
            .run(Dispatch::undoable(AddCommand::new(coffee(date(2024, 1, 15)))))
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateTransaction(_)));
        assert!(!session.history().has_undo());
    }

    #[test]
    fn plain_commands_skip_history() {
        let mut session = session();
        session
            .run(Dispatch::plain(ListCommand::new(ViewFilter::All)))
            .unwrap();
        assert!(!session.history().has_undo());
        assert!(matches!(session.undo(), Err(LedgerError::NothingToUndo)));
    }

    #[test]
    fn clone_undo_redo_through_session() {
        let mut session = session();
        let occurrence: Occurrence = "monthly:2".parse().unwrap();
        let command = CloneCommand::new(Index::from_one_based(1).unwrap(), occurrence);
        session.run(Dispatch::undoable(command)).unwrap();
        assert_eq!(session.store().len(), 3);

        session.undo().unwrap();
        assert_eq!(session.store().as_slice(), &[coffee(date(2024, 1, 15))]);
        assert!(session.history().has_redo());

        session.redo().unwrap();
        assert_eq!(session.store().len(), 3);
        assert_eq!(session.store().get(2), Some(&coffee(date(2024, 3, 15))));
    }

    #[test]
    fn failed_undo_rolls_back_the_stack_move() {
        let mut session = session();
        session
            .run(Dispatch::undoable(CloneCommand::new(
                Index::from_one_based(1).unwrap(),
                "daily:1".parse().unwrap(),
            )))
            .unwrap();
        session.store.append(coffee(date(2024, 12, 25)));

        assert!(session.undo().unwrap_err().is_contract_violation());
        assert_eq!(
            (session.history().undo_len(), session.history().redo_len()),
            (1, 0)
        );
    }

    #[test]
    fn new_command_discards_redo() {
        let mut session = session();
        session
            .run(Dispatch::undoable(DeleteCommand::new(
                Index::from_one_based(1).unwrap(),
            )))
            .unwrap();
        session.undo().unwrap();
        session
            .run(Dispatch::undoable(AddCommand::new(coffee(date(2024, 2, 1)))))
            .unwrap();
        assert!(matches!(session.redo(), Err(LedgerError::NothingToRedo)));
    }

    #[test]
    fn display_follows_visible_clones() {
        let scrolled = Rc::new(RefCell::new(Vec::new()));
        let mut session = session();
        session.attach_display(Box::new(Recorder(Rc::clone(&scrolled))));
        session
            .run(Dispatch::undoable(CloneCommand::new(
                Index::from_one_based(1).unwrap(),
                "weekly:2".parse().unwrap(),
            )))
            .unwrap();
        assert_eq!(*scrolled.borrow(), vec![1, 2]);

        assert!(session.detach_display().is_some());
        session.undo().unwrap();
        session.redo().unwrap();
        assert_eq!(scrolled.borrow().len(), 2);
    }

    #[test]
    fn config_limit_bounds_history() {
        let config = Config {
            history_limit: 1,
            ..Config::default()
        };
        let clock = FixedClock::new(date(2024, 6, 10));
        let mut session = Session::with_config(Box::new(clock), &config);
        for day in 1..=3 {
            session
                .run(Dispatch::undoable(AddCommand::new(coffee(date(2024, 5, day)))))
                .unwrap();
        }
        assert_eq!(session.history().undo_len(), 1);
    }
}
