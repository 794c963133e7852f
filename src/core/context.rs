use chrono::NaiveDate;

use crate::core::clock::Clock;
use crate::core::display::TransactionDisplay;
use crate::ledger::{Transaction, TransactionStore};

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub store: &'a mut dyn TransactionStore,
    pub clock: &'a dyn Clock,
    display: Option<&'a mut dyn TransactionDisplay>,
}

impl<'a> CommandContext<'a> {
    pub fn new(store: &'a mut dyn TransactionStore, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            clock,
            display: None,
        }
    }

    pub fn with_display(mut self, display: &'a mut dyn TransactionDisplay) -> Self {
        self.display = Some(display);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn has_display(&self) -> bool {
        self.display.is_some()
    }

    /// Scrolls an attached display to the last displayed entry when
    /// `transaction` passes the store's current filter.
    pub fn scroll_if_visible(&mut self, transaction: &Transaction) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        if self.store.is_in_view(transaction) {
            display.scroll_to(self.store.displayed_len().saturating_sub(1));
        }
    }
}
