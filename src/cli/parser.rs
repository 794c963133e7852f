//! Prefix-style argument parsing (`n/Lunch v/12.50 t/food`).

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::commands::Index;
use crate::ledger::{
    parse_date, Description, Occurrence, Remark, Tag, TransactionKind, Value, ViewFilter,
};

pub(crate) const PREFIX_INDEX: &str = "i/";
pub(crate) const PREFIX_OCCURRENCE: &str = "o/";
pub(crate) const PREFIX_DESCRIPTION: &str = "n/";
pub(crate) const PREFIX_VALUE: &str = "v/";
pub(crate) const PREFIX_DATE: &str = "d/";
pub(crate) const PREFIX_REMARK: &str = "r/";
pub(crate) const PREFIX_TAG: &str = "t/";
pub(crate) const PREFIX_MONTH: &str = "m/";

/// Arguments split into a free-text preamble and prefixed values.
///
/// A token without a known prefix continues the previous value, so
/// `n/Chicken rice` reads as one description without quoting.
#[derive(Debug, Default)]
pub(crate) struct PrefixArgs {
    preamble: Vec<String>,
    values: Vec<(&'static str, String)>,
}

impl PrefixArgs {
    pub(crate) fn parse(args: &[&str], prefixes: &[&'static str]) -> Self {
        let mut parsed = Self::default();
        for token in args {
            match prefixes.iter().find(|prefix| token.starts_with(**prefix)) {
                Some(prefix) => parsed
                    .values
                    .push((*prefix, token[prefix.len()..].to_string())),
                None => match parsed.values.last_mut() {
                    Some((_, value)) => {
                        value.push(' ');
                        value.push_str(token);
                    }
                    None => parsed.preamble.push(token.to_string()),
                },
            }
        }
        parsed
    }

    pub(crate) fn preamble(&self) -> String {
        self.preamble.join(" ")
    }

    pub(crate) fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(candidate, _)| *candidate == prefix)
            .map(|(_, value)| value.trim())
    }

    pub(crate) fn all(&self, prefix: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(candidate, _)| *candidate == prefix)
            .map(|(_, value)| value.trim())
            .collect()
    }

    pub(crate) fn has(&self, prefix: &str) -> bool {
        self.values.iter().any(|(candidate, _)| *candidate == prefix)
    }

    pub(crate) fn require(&self, prefix: &str, field: &str) -> Result<&str, CommandError> {
        self.value(prefix).ok_or_else(|| missing(field, prefix))
    }

    /// Rejects repeats of prefixes that only make sense once.
    pub(crate) fn ensure_single(&self, prefixes: &[&str]) -> Result<(), CommandError> {
        for prefix in prefixes {
            if self.all(prefix).len() > 1 {
                return Err(CommandError::InvalidArguments(format!(
                    "`{prefix}` may only be given once"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn ensure_no_preamble(&self) -> Result<(), CommandError> {
        if self.preamble.is_empty() {
            Ok(())
        } else {
            Err(CommandError::InvalidArguments(format!(
                "unexpected argument `{}`",
                self.preamble()
            )))
        }
    }

    pub(crate) fn index(&self) -> Result<Index, CommandError> {
        let raw = self.require(PREFIX_INDEX, "index")?;
        let index: usize = raw.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("index `{raw}` must be a positive integer"))
        })?;
        Ok(Index::from_one_based(index)?)
    }

    pub(crate) fn description(&self) -> Result<Option<Description>, CommandError> {
        Ok(self.value(PREFIX_DESCRIPTION).map(Description::new).transpose()?)
    }

    pub(crate) fn amount(&self) -> Result<Option<Value>, CommandError> {
        Ok(self.value(PREFIX_VALUE).map(str::parse::<Value>).transpose()?)
    }

    pub(crate) fn date(&self) -> Result<Option<NaiveDate>, CommandError> {
        Ok(self.value(PREFIX_DATE).map(parse_date).transpose()?)
    }

    pub(crate) fn remark(&self) -> Option<Remark> {
        self.value(PREFIX_REMARK).map(Remark::new)
    }

    /// `None` when no `t/` was given; an empty `t/` clears the tags.
    pub(crate) fn tags(&self) -> Result<Option<BTreeSet<Tag>>, CommandError> {
        if !self.has(PREFIX_TAG) {
            return Ok(None);
        }
        let mut tags = BTreeSet::new();
        for raw in self.all(PREFIX_TAG) {
            if !raw.is_empty() {
                tags.insert(Tag::new(raw)?);
            }
        }
        Ok(Some(tags))
    }

    pub(crate) fn occurrence(&self) -> Result<Occurrence, CommandError> {
        match self.value(PREFIX_OCCURRENCE) {
            Some(raw) => Ok(raw.parse::<Occurrence>()?),
            None => Ok(Occurrence::once()),
        }
    }
}

pub(crate) fn missing(field: &str, prefix: &str) -> CommandError {
    CommandError::InvalidArguments(format!("missing {field} (use `{prefix}...`)"))
}

/// Parses the argument of `list`: nothing, `expense`, `income`, or `m/MM/YYYY`.
pub(crate) fn parse_view_filter(args: &PrefixArgs) -> Result<ViewFilter, CommandError> {
    if let Some(raw) = args.value(PREFIX_MONTH) {
        args.ensure_no_preamble()?;
        return parse_month(raw);
    }
    match args.preamble().to_ascii_lowercase().as_str() {
        "" | "all" => Ok(ViewFilter::All),
        "expense" | "expenses" => Ok(ViewFilter::Kind(TransactionKind::Expense)),
        "income" | "incomes" => Ok(ViewFilter::Kind(TransactionKind::Income)),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown list filter `{other}` (use expense, income, or m/MM/YYYY)"
        ))),
    }
}

fn parse_month(raw: &str) -> Result<ViewFilter, CommandError> {
    let invalid =
        || CommandError::InvalidArguments(format!("month `{raw}` must look like MM/YYYY"));
    let (month, year) = raw.split_once('/').ok_or_else(invalid)?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(ViewFilter::Month { year, month })
}
