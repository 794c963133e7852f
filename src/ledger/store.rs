use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};
use crate::errors::{LedgerError, Result};

/// Which slice of the store is currently displayed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViewFilter {
    #[default]
    All,
    Month {
        year: i32,
        month: u32,
    },
    Kind(TransactionKind),
}

impl ViewFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match *self {
            ViewFilter::All => true,
            ViewFilter::Month { year, month } => {
                let date = transaction.date();
                date.year() == year && date.month() == month
            }
            ViewFilter::Kind(kind) => transaction.kind() == kind,
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewFilter::All => f.write_str("all transactions"),
            ViewFilter::Month { year, month } => {
                match NaiveDate::from_ymd_opt(*year, *month, 1) {
                    Some(first) => write!(f, "transactions in {}", first.format("%B %Y")),
                    None => write!(f, "transactions in {month:02}/{year}"),
                }
            }
            ViewFilter::Kind(kind) => write!(f, "{kind} transactions"),
        }
    }
}

/// Ordered collection of ledger entries that commands mutate.
pub trait TransactionStore {
    /// Appends at the tail. Uniqueness checks are the caller's concern.
    fn append(&mut self, transaction: Transaction);
    fn insert(&mut self, position: usize, transaction: Transaction) -> Result<()>;
    fn remove_last(&mut self) -> Option<Transaction>;
    fn remove_at(&mut self, position: usize) -> Result<Transaction>;
    /// Removes the last entry equal to `transaction`.
    fn remove(&mut self, transaction: &Transaction) -> Result<Transaction>;
    /// Overwrites the entry at `position`, returning the previous one.
    fn replace_at(&mut self, position: usize, updated: Transaction) -> Result<Transaction>;
    fn set_transactions(&mut self, transactions: Vec<Transaction>);
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&Transaction>;
    fn contains(&self, transaction: &Transaction) -> bool;
    fn filter(&self) -> ViewFilter;
    fn set_filter(&mut self, filter: ViewFilter);
    /// Entries passing the current filter, in store order.
    fn displayed(&self) -> Vec<&Transaction>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_in_view(&self, transaction: &Transaction) -> bool {
        self.filter().matches(transaction)
    }

    fn displayed_len(&self) -> usize {
        self.displayed().len()
    }

    /// Maps a zero-based displayed index to its position in the full store.
    fn store_position(&self, displayed_index: usize) -> Option<usize> {
        (0..self.len())
            .filter(|&position| {
                self.get(position)
                    .is_some_and(|transaction| self.is_in_view(transaction))
            })
            .nth(displayed_index)
    }
}

/// In-memory `TransactionStore` backed by a vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionList {
    transactions: Vec<Transaction>,
    #[serde(skip)]
    filter: ViewFilter,
}

impl TransactionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            filter: ViewFilter::All,
        }
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }
}

impl TransactionStore for TransactionList {
    fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    fn insert(&mut self, position: usize, transaction: Transaction) -> Result<()> {
        if position > self.transactions.len() {
            return Err(LedgerError::ContractViolation(format!(
                "insert position {position} beyond {} entries",
                self.transactions.len()
            )));
        }
        self.transactions.insert(position, transaction);
        Ok(())
    }

    fn remove_last(&mut self) -> Option<Transaction> {
        self.transactions.pop()
    }

    fn remove_at(&mut self, position: usize) -> Result<Transaction> {
        if position >= self.transactions.len() {
            return Err(LedgerError::TransactionNotFound(format!(
                "no entry at position {position}"
            )));
        }
        Ok(self.transactions.remove(position))
    }

    fn remove(&mut self, transaction: &Transaction) -> Result<Transaction> {
        let position = self
            .transactions
            .iter()
            .rposition(|candidate| candidate == transaction)
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction.to_string()))?;
        Ok(self.transactions.remove(position))
    }

    fn replace_at(&mut self, position: usize, updated: Transaction) -> Result<Transaction> {
        let slot = self.transactions.get_mut(position).ok_or_else(|| {
            LedgerError::TransactionNotFound(format!("no entry at position {position}"))
        })?;
        Ok(std::mem::replace(slot, updated))
    }

    fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    fn len(&self) -> usize {
        self.transactions.len()
    }

    fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    fn contains(&self, transaction: &Transaction) -> bool {
        self.transactions.contains(transaction)
    }

    fn filter(&self) -> ViewFilter {
        self.filter
    }

    fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
    }

    fn displayed(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| self.filter.matches(transaction))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::{Description, Value};

    fn entry(description: &str, day: u32, kind: TransactionKind) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let description = Description::new(description).unwrap();
        let value = Value::from_cents(500);
        match kind {
            TransactionKind::Expense => Transaction::expense(description, value, date),
            TransactionKind::Income => Transaction::income(description, value, date),
        }
    }

    #[test]
    fn append_and_remove_last_are_lifo() {
        let mut list = TransactionList::new();
        let laksa = entry("Laksa", 1, TransactionKind::Expense);
        let salary = entry("Salary", 2, TransactionKind::Income);
        list.append(laksa.clone());
        list.append(salary.clone());

        assert_eq!(list.len(), 2);
        assert_eq!(list.remove_last(), Some(salary));
        assert_eq!(list.remove_last(), Some(laksa));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn remove_by_value_requires_presence() {
        let mut list = TransactionList::new();
        let laksa = entry("Laksa", 1, TransactionKind::Expense);
        assert!(matches!(
            list.remove(&laksa),
            Err(LedgerError::TransactionNotFound(_))
        ));
        list.append(laksa.clone());
        assert_eq!(list.remove(&laksa).unwrap(), laksa);
        assert!(!list.contains(&laksa));
    }

    #[test]
    fn replace_at_touches_only_that_position() {
        let laksa = entry("Laksa", 1, TransactionKind::Expense);
        let penang = entry("Penang Laksa", 1, TransactionKind::Expense);
        let mut list = TransactionList::from_transactions(vec![laksa.clone(), laksa.clone()]);

        assert_eq!(list.replace_at(1, penang.clone()).unwrap(), laksa);
        assert_eq!(list.as_slice(), &[laksa, penang.clone()]);
        assert!(list.replace_at(2, penang).is_err());
    }

    #[test]
    fn store_position_skips_filtered_entries() {
        let laksa = entry("Laksa", 1, TransactionKind::Expense);
        let salary = entry("Salary", 2, TransactionKind::Income);
        let mut list = TransactionList::from_transactions(vec![
            laksa.clone(),
            salary.clone(),
            laksa,
            salary,
        ]);
        assert_eq!(list.store_position(2), Some(2));

        list.set_filter(ViewFilter::Kind(TransactionKind::Income));
        assert_eq!(list.store_position(0), Some(1));
        assert_eq!(list.store_position(1), Some(3));
        assert_eq!(list.store_position(2), None);
    }

    #[test]
    fn insert_restores_position() {
        let mut list = TransactionList::new();
        let a = entry("A", 1, TransactionKind::Expense);
        let b = entry("B", 2, TransactionKind::Expense);
        let c = entry("C", 3, TransactionKind::Expense);
        list.set_transactions(vec![a.clone(), c.clone()]);
        list.insert(1, b.clone()).unwrap();
        assert_eq!(list.as_slice(), &[a, b, c]);
        assert!(list.insert(9, entry("D", 4, TransactionKind::Expense)).is_err());
    }

    #[test]
    fn filter_limits_displayed_entries() {
        let mut list = TransactionList::new();
        let laksa = entry("Laksa", 1, TransactionKind::Expense);
        let salary = entry("Salary", 2, TransactionKind::Income);
        list.append(laksa.clone());
        list.append(salary.clone());

        list.set_filter(ViewFilter::Kind(TransactionKind::Income));
        assert_eq!(list.displayed(), vec![&salary]);
        assert!(list.is_in_view(&salary));
        assert!(!list.is_in_view(&laksa));

        list.set_filter(ViewFilter::Month {
            year: 2024,
            month: 2,
        });
        assert_eq!(list.displayed_len(), 0);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn filter_labels() {
        assert_eq!(ViewFilter::All.to_string(), "all transactions");
        assert_eq!(
            ViewFilter::Month {
                year: 2024,
                month: 3
            }
            .to_string(),
            "transactions in March 2024"
        );
    }
}
