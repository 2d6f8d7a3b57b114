use crate::error::{Error, ErrorType};
use crate::model::{Amount, MonthKey};
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single logged spending event.
///
/// Stored as a JSON object with the keys `id`, `amount`, `category`, `date` and `note`, e.g.
/// ```json
/// {"id": 1704441600000, "amount": 100, "category": "Food", "date": "2024-01-05", "note": "lunch"}
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Expense {
    id: u64,
    amount: Amount,
    category: String,
    date: NaiveDate,
    #[serde(default)]
    note: String,
}

impl Expense {
    /// Builds an expense after checking that `amount` is greater than zero and storable (see
    /// `Amount::is_storable`) and that `category` is not blank. `category` and `note` are trimmed.
    ///
    /// # Errors
    /// - `ErrorType::Validation` if either check fails.
    pub fn new(
        id: u64,
        amount: Amount,
        category: impl AsRef<str>,
        date: NaiveDate,
        note: impl AsRef<str>,
    ) -> Result<Self> {
        if !amount.is_positive() {
            return Err(Error::msg(
                ErrorType::Validation,
                format!("Amount must be greater than zero, got {amount}"),
            ));
        }
        if !amount.is_storable() {
            return Err(Error::msg(
                ErrorType::Validation,
                format!(
                    "Amount must have at most {} decimal places and be at most {}, got {amount}",
                    Amount::SCALE,
                    Amount::MAX
                ),
            ));
        }
        let category = category.as_ref().trim();
        if category.is_empty() {
            return Err(Error::msg(ErrorType::Validation, "Category is required"));
        }
        Ok(Self {
            id,
            amount,
            category: category.to_string(),
            date,
            note: note.as_ref().trim().to_string(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// Whether this record satisfies the invariants that `Expense::new` enforces. Records read
    /// from storage bypass `new`, so this is checked on load.
    pub(crate) fn is_valid(&self) -> bool {
        self.amount.is_positive() && self.amount.is_storable() && !self.category.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_new_trims_fields() {
        let amount = Amount::from_str("12.5").unwrap();
        let e = Expense::new(7, amount, "  Food ", date("2024-01-05"), " lunch  ").unwrap();
        assert_eq!(e.id(), 7);
        assert_eq!(e.amount(), amount);
        assert_eq!(e.category(), "Food");
        assert_eq!(e.note(), "lunch");
        assert_eq!(e.month_key().to_string(), "2024-01");
    }

    #[test]
    fn test_new_rejects_non_positive_amount() {
        for raw in ["0", "-5", ""] {
            let amount = Amount::from_str(raw).unwrap();
            let err = Expense::new(1, amount, "Food", date("2024-01-05"), "").unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Validation, "amount {raw:?}");
        }
    }

    #[test]
    fn test_new_rejects_unstorable_amount() {
        for raw in ["1234567890.123456789", "0.001", "10000000000000"] {
            let amount = Amount::from(rust_decimal::Decimal::from_str(raw).unwrap());
            let err = Expense::new(1, amount, "Food", date("2024-01-05"), "").unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Validation, "amount {raw}");
        }
    }

    #[test]
    fn test_new_rejects_blank_category() {
        let amount = Amount::from_str("10").unwrap();
        let err = Expense::new(1, amount, "   ", date("2024-01-05"), "").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(err.to_string().contains("Category is required"));
    }

    #[test]
    fn test_json_layout() {
        let amount = Amount::from_str("100").unwrap();
        let e = Expense::new(1704441600000, amount, "Food", date("2024-01-05"), "").unwrap();
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"id":1704441600000,"amount":100,"category":"Food","date":"2024-01-05","note":""}"#
        );
    }

    #[test]
    fn test_missing_note_reads_as_empty() {
        let json = r#"{"id":1,"amount":3.5,"category":"Tea","date":"2024-02-01"}"#;
        let e: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(e.note(), "");
        assert!(e.is_valid());
    }
}
