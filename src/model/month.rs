use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, written as `YYYY-MM`. Used to group and filter expenses by month.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month that `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, `1` for January through `12` for December.
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Expected format: "2024-01"
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Month must be in format 'YYYY-MM', got: {s}"))?;

        if year.len() != 4 || month.len() != 2 {
            anyhow::bail!("Month must be in format 'YYYY-MM', got: {s}");
        }

        let year = year
            .parse::<i32>()
            .map_err(|e| anyhow::anyhow!("Invalid year in '{s}': {e}"))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("Invalid month in '{s}': {e}"))?;

        MonthKey::new(year, month).ok_or_else(|| anyhow::anyhow!("Month out of range: {s}"))
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MonthKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
