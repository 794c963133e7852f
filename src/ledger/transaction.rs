use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Date format used when parsing and displaying transaction dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Monetary direction of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    fn marker(self) -> &'static str {
        match self {
            TransactionKind::Expense => "[-]",
            TransactionKind::Income => "[+]",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Validation(
                "description must not be blank".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Description::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative amount held in integer cents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Value {
    cents: u64,
}

impl Value {
    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }
}

impl FromStr for Value {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self> {
        let invalid = || {
            LedgerError::Validation(format!(
                "value `{raw}` must be a non-negative amount with at most two decimals"
            ))
        };
        let trimmed = raw.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if trimmed.ends_with('.') {
            return Err(invalid());
        }
        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };
        whole
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .map(Value::from_cents)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Remark(String);

impl Remark {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || !trimmed.chars().all(char::is_alphanumeric) {
            return Err(LedgerError::Validation(format!(
                "tag `{trimmed}` must be a single alphanumeric word"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Tag::new(value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|err| {
        LedgerError::Validation(format!("date `{}` must look like dd/mm/yyyy ({err})", raw.trim()))
    })
}

/// An immutable ledger entry.
///
/// Equality covers every field, so two entries only compare equal when kind,
/// description, value, remark, date, and tags all match. Edits never mutate an
/// entry in place; they produce a new value that replaces the old one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Transaction {
    kind: TransactionKind,
    description: Description,
    value: Value,
    #[serde(default)]
    remark: Remark,
    date: NaiveDate,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        description: Description,
        value: Value,
        remark: Remark,
        date: NaiveDate,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            kind,
            description,
            value,
            remark,
            date,
            tags,
        }
    }

    pub fn expense(description: Description, value: Value, date: NaiveDate) -> Self {
        Self::new(
            TransactionKind::Expense,
            description,
            value,
            Remark::default(),
            date,
            BTreeSet::new(),
        )
    }

    pub fn income(description: Description, value: Value, date: NaiveDate) -> Self {
        Self::new(
            TransactionKind::Income,
            description,
            value,
            Remark::default(),
            date,
            BTreeSet::new(),
        )
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn remark(&self) -> &Remark {
        &self.remark
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Copy of this entry with every field kept except the date.
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }

    pub fn with_remark(&self, remark: Remark) -> Self {
        Self {
            remark,
            ..self.clone()
        }
    }

    pub fn with_tags(&self, tags: BTreeSet<Tag>) -> Self {
        Self {
            tags,
            ..self.clone()
        }
    }

    /// Applies the non-empty fields of `edits`, keeping kind and the rest.
    pub fn edited(&self, edits: &TransactionEdits) -> Self {
        Self {
            kind: self.kind,
            description: edits
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            value: edits.value.unwrap_or(self.value),
            remark: edits.remark.clone().unwrap_or_else(|| self.remark.clone()),
            date: edits.date.unwrap_or(self.date),
            tags: edits.tags.clone().unwrap_or_else(|| self.tags.clone()),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} Value: {} Date: {} Remarks: {} Tags: ",
            self.kind.marker(),
            self.description,
            self.value,
            self.date.format(DATE_FORMAT),
            self.remark
        )?;
        for tag in &self.tags {
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

/// Field replacements for an update; `None` keeps the current field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEdits {
    pub description: Option<Description>,
    pub value: Option<Value>,
    pub remark: Option<Remark>,
    pub date: Option<NaiveDate>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl TransactionEdits {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.value.is_none()
            && self.remark.is_none()
            && self.date.is_none()
            && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Transaction {
        Transaction::expense(
            Description::new("Lunch").unwrap(),
            "12.50".parse().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn value_parses_common_forms() {
        assert_eq!("12".parse::<Value>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Value>().unwrap().cents(), 1250);
        assert_eq!("0.07".parse::<Value>().unwrap().cents(), 7);
        assert_eq!("12.50".parse::<Value>().unwrap().to_string(), "12.50");
    }

    #[test]
    fn value_rejects_malformed_input() {
        for raw in ["", "-1", "1.234", "abc", "1.", ".5", "1,50"] {
            assert!(raw.parse::<Value>().is_err(), "accepted `{raw}`");
        }
    }

    #[test]
    fn blank_description_and_bad_tags_are_rejected() {
        assert!(Description::new("   ").is_err());
        assert!(Tag::new("two words").is_err());
        assert!(Tag::new("food").is_ok());
    }

    #[test]
    fn equality_covers_every_field() {
        let base = lunch();
        assert_eq!(base, lunch());
        assert_ne!(
            base,
            base.with_date(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap())
        );
        assert_ne!(base, base.with_remark(Remark::new("with drinks")));
        let tags = BTreeSet::from([Tag::new("food").unwrap()]);
        assert_ne!(base, base.with_tags(tags));
    }

    #[test]
    fn display_includes_marker_and_tags() {
        let tags = BTreeSet::from([Tag::new("food").unwrap(), Tag::new("work").unwrap()]);
        let rendered = lunch().with_tags(tags).to_string();
        assert_eq!(
            rendered,
            "[-] Lunch Value: 12.50 Date: 15/01/2024 Remarks:  Tags: [food][work]"
        );
    }

    #[test]
    fn edits_keep_kind() {
        let edits = TransactionEdits {
            value: Some("3.00".parse().unwrap()),
            ..TransactionEdits::default()
        };
        let edited = lunch().edited(&edits);
        assert_eq!(edited.kind(), TransactionKind::Expense);
        assert_eq!(edited.value().cents(), 300);
        assert_eq!(edited.description().as_str(), "Lunch");
    }

    #[test]
    fn parse_date_uses_day_first_format() {
        assert_eq!(
            parse_date("01/06/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_date("2024-06-01").is_err());
    }

    #[test]
    fn serde_round_trip_keeps_equality() {
        let original = lunch();
        let json = serde_json::to_string(&original).unwrap();
        let restored: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
