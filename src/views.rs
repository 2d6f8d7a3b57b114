//! Read-only derivations over an expense set: the filtered list, summary totals and the monthly
//! series behind the bar chart.
//!
//! Totals and the monthly series are always computed over the whole set. Filter criteria only
//! narrow the list.

use crate::model::{Amount, Criteria, Expense, MonthKey};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Three-letter month names, January first, used to label the monthly series.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Summary sums over an expense set.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Expenses dated `today`.
    pub today: Amount,
    /// Expenses dated in the same month as `today`.
    pub month: Amount,
    /// Every expense.
    pub all: Amount,
}

/// Returns the expenses that match `criteria`, most recent first.
///
/// The month filter is applied first, then the exact category filter, then the case-insensitive
/// search over note and category. The result is sorted by date descending, and expenses with the
/// same date are ordered by id descending so the most recently created comes first.
pub fn filter(expenses: &[Expense], criteria: &Criteria) -> Vec<Expense> {
    let mut out: Vec<Expense> = expenses
        .iter()
        .filter(|e| criteria.matches_month(e))
        .filter(|e| criteria.matches_category(e))
        .filter(|e| criteria.matches_search(e))
        .cloned()
        .collect();
    out.sort_by_key(|e| Reverse((e.date(), e.id())));
    out
}

/// Sums the expenses dated `today`, dated in `today`'s month, and all of them.
pub fn totals(expenses: &[Expense], today: NaiveDate) -> Totals {
    let this_month = MonthKey::of(today);
    Totals {
        today: expenses
            .iter()
            .filter(|e| e.date() == today)
            .map(Expense::amount)
            .sum(),
        month: expenses
            .iter()
            .filter(|e| e.month_key() == this_month)
            .map(Expense::amount)
            .sum(),
        all: expenses.iter().map(Expense::amount).sum(),
    }
}

/// Sums the expenses dated in `year` by month. Index 0 is January.
pub fn monthly_series(expenses: &[Expense], year: i32) -> [Amount; 12] {
    let mut series = [Amount::ZERO; 12];
    for e in expenses.iter().filter(|e| e.date().year() == year) {
        let ix = e.date().month0() as usize;
        series[ix] = series[ix] + e.amount();
    }
    series
}
