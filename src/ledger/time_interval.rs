use std::fmt;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Calendar granularity used when stepping clone dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Day => "Day",
            TimeUnit::Week => "Week",
            TimeUnit::Month => "Month",
            TimeUnit::Year => "Year",
        };
        f.write_str(label)
    }
}

/// A time unit and multiplier.
///
/// Month and year arithmetic clamps to the last valid day of the target
/// month, so Jan 31 plus one month lands on Feb 28 (or Feb 29 in leap years)
/// and Feb 29 plus one year lands on Feb 28.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    /// Single-unit interval (`every == 1`).
    pub fn single(unit: TimeUnit) -> Self {
        Self::new(1, unit)
    }

    pub fn next_date(&self, from: NaiveDate) -> Result<NaiveDate> {
        self.advance(from, 1)
    }

    /// Returns `from` moved forward by `steps` intervals.
    ///
    /// The offset is applied to `from` in one go instead of chaining
    /// `next_date`, so month-end anchors do not drift (Jan 31 + 2 months is
    /// Mar 31, not Mar 28/29).
    pub fn advance(&self, from: NaiveDate, steps: u32) -> Result<NaiveDate> {
        let amount = self
            .every
            .checked_mul(steps)
            .ok_or_else(|| out_of_range(from, *self, steps))?;
        let shifted = match self.unit {
            TimeUnit::Day => from.checked_add_days(Days::new(u64::from(amount))),
            TimeUnit::Week => from.checked_add_days(Days::new(u64::from(amount) * 7)),
            TimeUnit::Month => from.checked_add_months(Months::new(amount)),
            TimeUnit::Year => amount
                .checked_mul(12)
                .and_then(|months| from.checked_add_months(Months::new(months))),
        };
        shifted.ok_or_else(|| out_of_range(from, *self, steps))
    }

    pub fn label(&self) -> String {
        match (self.every, self.unit) {
            (1, TimeUnit::Day) => "Daily".into(),
            (1, TimeUnit::Week) => "Weekly".into(),
            (1, TimeUnit::Month) => "Monthly".into(),
            (1, TimeUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }
}

fn out_of_range(from: NaiveDate, interval: TimeInterval, steps: u32) -> LedgerError {
    LedgerError::DateOutOfRange(format!(
        "{} advanced {} x {}",
        from,
        steps,
        interval.label()
    ))
}
