//! CSV export of the expense set.
//!
//! The output starts with an `id,amount,category,note,date` header followed by one row per expense
//! in stored order. Commas in notes are replaced by spaces and no field is quoted.

use crate::error::{ErrorType, IntoResult, Re};
use crate::model::Expense;
use crate::Result;
use anyhow::Context;
use std::io::Write;

/// The header row of an export.
pub const HEADER: [&str; 5] = ["id", "amount", "category", "note", "date"];

/// Writes `expenses` as CSV to `writer`.
///
/// # Errors
/// - `ErrorType::Export` if writing fails.
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<()> {
    write_records(expenses, writer).pub_result(ErrorType::Export)
}

/// Renders `expenses` as a CSV `String`.
pub fn to_csv(expenses: &[Expense]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(expenses, &mut buf)?;
    String::from_utf8(buf)
        .context("CSV output is not valid UTF-8")
        .pub_result(ErrorType::Export)
}

fn write_records<W: Write>(expenses: &[Expense], writer: W) -> Re<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)
        .context("Unable to write CSV header")?;
    for e in expenses {
        wtr.write_record([
            e.id().to_string(),
            e.amount().to_string(),
            e.category().to_string(),
            e.note().replace(',', " "),
            e.date().to_string(),
        ])
        .with_context(|| format!("Unable to write CSV row for expense {}", e.id()))?;
    }
    wtr.flush().context("Unable to flush CSV output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn expense(id: u64, amount: &str, category: &str, date: &str, note: &str) -> Expense {
        Expense::new(
            id,
            Amount::from_str(amount).unwrap(),
            category,
            NaiveDate::from_str(date).unwrap(),
            note,
        )
        .unwrap()
    }

    #[test]
    fn test_to_csv() {
        let expenses = vec![
            expense(1704441600000, "100", "Food", "2024-01-05", "lunch, with team"),
            expense(1706745600000, "12.50", "Travel", "2024-02-01", ""),
        ];
        let csv = to_csv(&expenses).unwrap();
        assert_eq!(
            csv,
            "id,amount,category,note,date\n\
             1704441600000,100,Food,lunch  with team,2024-01-05\n\
             1706745600000,12.5,Travel,,2024-02-01\n"
        );
    }

    #[test]
    fn test_to_csv_keeps_stored_order() {
        let expenses = vec![
            expense(3, "1", "C", "2024-01-01", ""),
            expense(1, "1", "A", "2024-03-01", ""),
            expense(2, "1", "B", "2024-02-01", ""),
        ];
        let csv = to_csv(&expenses).unwrap();
        let ids: Vec<&str> = csv
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_to_csv_no_quoting() {
        let expenses = vec![expense(1, "5", "Say \"hi\"", "2024-01-01", "a \"quoted\" note")];
        let csv = to_csv(&expenses).unwrap();
        assert!(csv.contains("1,5,Say \"hi\",a \"quoted\" note,2024-01-01"), "{csv}");
    }

    #[test]
    fn test_to_csv_empty_is_header_only() {
        assert_eq!(to_csv(&[]).unwrap(), "id,amount,category,note,date\n");
    }
}
