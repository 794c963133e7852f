use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::time_interval::TimeUnit;
use crate::errors::{LedgerError, Result};

pub const MAX_YEARLY_OCCURRENCES: u32 = 5;
pub const MAX_OCCURRENCES: u32 = 12;

/// How often clones recur.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn unit(self) -> TimeUnit {
        match self {
            Frequency::Daily => TimeUnit::Day,
            Frequency::Weekly => TimeUnit::Week,
            Frequency::Monthly => TimeUnit::Month,
            Frequency::Yearly => TimeUnit::Year,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    pub fn max_occurrences(self) -> u32 {
        match self {
            Frequency::Yearly => MAX_YEARLY_OCCURRENCES,
            _ => MAX_OCCURRENCES,
        }
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(LedgerError::InvalidOccurrence(format!(
                "`{other}` is not a frequency; use daily, weekly, monthly or yearly"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated recurrence request: frequency plus number of repeats.
///
/// Yearly occurrences accept 0 to 5 repeats, every other frequency 0 to 12.
/// A count of zero means "duplicate once, dated today".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Occurrence {
    frequency: Frequency,
    count: u32,
}

impl Occurrence {
    pub fn new(frequency: Frequency, count: i64) -> Result<Self> {
        let max = frequency.max_occurrences();
        match u32::try_from(count) {
            Ok(count) if count <= max => Ok(Self { frequency, count }),
            _ => Err(LedgerError::InvalidOccurrence(format!(
                "{} occurrences must be between 0 and {max}, got {count}",
                frequency
            ))),
        }
    }

    /// Builds an occurrence from a frequency label such as `"monthly"`.
    pub fn from_label(label: &str, count: i64) -> Result<Self> {
        Self::new(label.parse()?, count)
    }

    /// The single-shot default used when no occurrence is given.
    pub fn once() -> Self {
        Self {
            frequency: Frequency::Daily,
            count: 0,
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn frequency_unit(&self) -> TimeUnit {
        self.frequency.unit()
    }

    pub fn occurrence_count(&self) -> u32 {
        self.count
    }

    pub fn frequency_label(&self) -> &'static str {
        self.frequency.label()
    }

    pub fn is_single_shot(&self) -> bool {
        self.count == 0
    }
}

impl Default for Occurrence {
    fn default() -> Self {
        Self::once()
    }
}

impl FromStr for Occurrence {
    type Err = LedgerError;

    /// Parses `FREQUENCY:COUNT`, e.g. `monthly:5`.
    fn from_str(raw: &str) -> Result<Self> {
        let (label, count) = raw.trim().split_once(':').ok_or_else(|| {
            LedgerError::InvalidOccurrence(format!(
                "`{}` must look like FREQUENCY:NUMBER_OF_OCCURRENCES",
                raw.trim()
            ))
        })?;
        let count: i64 = count.trim().parse().map_err(|_| {
            LedgerError::InvalidOccurrence(format!("`{}` is not a whole number", count.trim()))
        })?;
        Self::from_label(label, count)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.frequency, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_depend_on_frequency() {
        assert!(Occurrence::from_label("yearly", 5).is_ok());
        assert!(Occurrence::from_label("yearly", 6).is_err());
        assert!(Occurrence::from_label("monthly", 12).is_ok());
        assert!(Occurrence::from_label("monthly", 13).is_err());
        assert!(Occurrence::from_label("daily", 0).is_ok());
        assert!(Occurrence::from_label("weekly", -1).is_err());
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        let err = Occurrence::from_label("hourly", 1).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidOccurrence(_)));
    }

    #[test]
    fn frequency_maps_to_calendar_unit() {
        assert_eq!(
            Occurrence::from_label("daily", 1).unwrap().frequency_unit(),
            TimeUnit::Day
        );
        assert_eq!(
            Occurrence::from_label("Weekly", 1).unwrap().frequency_unit(),
            TimeUnit::Week
        );
        assert_eq!(
            Occurrence::from_label("MONTHLY", 1).unwrap().frequency_unit(),
            TimeUnit::Month
        );
        assert_eq!(
            Occurrence::from_label("yearly", 1).unwrap().frequency_unit(),
            TimeUnit::Year
        );
    }

    #[test]
    fn parses_user_token() {
        let occurrence: Occurrence = "monthly:3".parse().unwrap();
        assert_eq!(occurrence.frequency(), Frequency::Monthly);
        assert_eq!(occurrence.occurrence_count(), 3);
        assert_eq!(occurrence.frequency_label(), "monthly");
        assert!("monthly".parse::<Occurrence>().is_err());
        assert!("monthly:x".parse::<Occurrence>().is_err());
    }

    #[test]
    fn default_is_single_shot() {
        let once = Occurrence::default();
        assert!(once.is_single_shot());
        assert_eq!(once.to_string(), "daily:0");
    }
}
