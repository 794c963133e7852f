//! Ledger domain values, calendar stepping, recurrence rules, and storage.

pub mod occurrence;
pub mod store;
pub mod time_interval;
pub mod transaction;

pub use occurrence::{Frequency, Occurrence, MAX_OCCURRENCES, MAX_YEARLY_OCCURRENCES};
pub use store::{TransactionList, TransactionStore, ViewFilter};
pub use time_interval::{TimeInterval, TimeUnit};
pub use transaction::{
    parse_date, Description, Remark, Tag, Transaction, TransactionEdits, TransactionKind, Value,
    DATE_FORMAT,
};
