//! Read-only command handlers: list, totals and chart.

use crate::args::{ChartArgs, ListArgs};
use crate::commands::{plural, Out};
use crate::model::{Amount, Expense};
use crate::views::{Totals, MONTH_LABELS};
use crate::{Config, Result};
use chrono::{Datelike, Local};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// The widest bar drawn by `expenses chart`.
const BAR_WIDTH: usize = 40;

/// Lists the expenses matching the filter arguments, most recent first, as a table on stdout.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Expense>>> {
    let store = config.open_store();
    let expenses = store.filter(&args.criteria());
    if expenses.is_empty() {
        return Ok(Out::new("No expenses found", expenses));
    }
    let message = format!(
        "Listed {} of {} expense{}",
        expenses.len(),
        store.len(),
        plural(store.len())
    );
    let report = render_table(&expenses, config.currency_symbol());
    Ok(Out::new(message, expenses).with_report(report))
}

/// Shows what was spent today, this month and overall.
pub async fn totals(config: Config) -> Result<Out<Totals>> {
    let store = config.open_store();
    let totals = store.totals();
    let symbol = config.currency_symbol();
    let rows = [
        ("Today", totals.today),
        ("This month", totals.month),
        ("All time", totals.all),
    ];
    let report = render_rows(rows.iter().map(|(label, amount)| (*label, amount.formatted(symbol))));
    Ok(Out::new("Computed totals", totals).with_report(report))
}

/// One bar of the monthly chart.
#[derive(Debug, Clone, Serialize)]
pub struct MonthBar {
    pub label: String,
    pub total: Amount,
}

/// The structured output of `expenses chart`.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub year: i32,
    pub months: Vec<MonthBar>,
}

/// Shows the per-month spending of a year as a text bar chart. The year defaults to the current
/// one.
pub async fn chart(config: Config, args: ChartArgs) -> Result<Out<Chart>> {
    let year = args.year().unwrap_or_else(|| Local::now().year());
    let store = config.open_store();
    let series = store.monthly_series(year);

    let months: Vec<MonthBar> = MONTH_LABELS
        .iter()
        .zip(series)
        .map(|(label, total)| MonthBar {
            label: label.to_string(),
            total,
        })
        .collect();
    let report = render_chart(&months, config.currency_symbol());
    Ok(Out::new(format!("Monthly spending for {year}"), Chart { year, months }).with_report(report))
}

fn render_table(expenses: &[Expense], symbol: &str) -> String {
    let header = ["ID", "DATE", "CATEGORY", "AMOUNT", "NOTE"].map(String::from);
    let rows: Vec<[String; 5]> = expenses
        .iter()
        .map(|e| {
            [
                e.id().to_string(),
                e.date().to_string(),
                e.category().to_string(),
                e.amount().formatted(symbol),
                e.note().to_string(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(ix, (cell, width))| {
                // amounts are right aligned
                if ix == 3 {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

fn render_rows<'a>(rows: impl Iterator<Item = (&'a str, String)> + Clone) -> String {
    let label_width = rows.clone().map(|(l, _)| l.len()).max().unwrap_or_default();
    let value_width = rows
        .clone()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or_default();
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<label_width$}  {value:>value_width$}");
    }
    out
}

fn render_chart(months: &[MonthBar], symbol: &str) -> String {
    let max = months.iter().map(|m| m.total).max().unwrap_or(Amount::ZERO);
    let values: Vec<String> = months.iter().map(|m| m.total.formatted(symbol)).collect();
    let value_width = values
        .iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for (month, value) in months.iter().zip(&values) {
        let len = bar_len(month.total, max);
        let bar = "#".repeat(len);
        let line = format!("{}  {value:>value_width$}  {bar}", month.label);
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Scales `total` against `max` onto `BAR_WIDTH` columns. Any non-zero total gets at least one.
fn bar_len(total: Amount, max: Amount) -> usize {
    if !total.is_positive() || !max.is_positive() {
        return 0;
    }
    let scaled = total.value() * Decimal::from(BAR_WIDTH) / max.value();
    scaled
        .round()
        .to_usize()
        .unwrap_or(BAR_WIDTH)
        .clamp(1, BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Criteria, MonthKey};
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let env = TestEnv::new().await;
        let a = env.add_expense("100", "Food", "2024-01-05", "lunch");
        let b = env.add_expense("50", "Travel", "2024-01-06", "taxi");
        let c = env.add_expense("20", "Food", "2024-02-01", "snack");

        let out = list(env.config(), ListArgs::new(None, None, None))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap(), &vec![c.clone(), b.clone(), a.clone()]);
        let report = out.report().unwrap();
        assert!(report.starts_with("ID"), "{report}");
        assert!(report.contains("₹100.00"), "{report}");
        assert_eq!(report.lines().count(), 4);

        let month = MonthKey::from_str("2024-01").unwrap();
        let out = list(
            env.config(),
            ListArgs::new(Some(month), Some("Food".to_string()), None),
        )
        .await
        .unwrap();
        assert_eq!(out.structure().unwrap(), &vec![a]);
    }

    #[tokio::test]
    async fn test_list_search() {
        let env = TestEnv::new().await;
        env.add_expense("100", "Food", "2024-01-05", "lunch");
        let b = env.add_expense("50", "Travel", "2024-01-06", "Taxi to airport");
        let args = ListArgs::new(None, None, Some("TAXI".to_string()));
        assert_eq!(args.criteria(), Criteria::new().search("TAXI"));
        let out = list(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap(), &vec![b]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let out = list(env.config(), ListArgs::new(None, None, None))
            .await
            .unwrap();
        assert_eq!(out.message(), "No expenses found");
        assert!(out.report().is_none());
        assert!(out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_totals() {
        let env = TestEnv::new().await;
        let today = Local::now().date_naive().to_string();
        env.add_expense("100", "Food", &today, "");
        env.add_expense("50", "Travel", "2001-03-04", "");

        let out = totals(env.config()).await.unwrap();
        let totals = out.structure().unwrap();
        assert_eq!(totals.today, Amount::from_str("100").unwrap());
        assert_eq!(totals.month, Amount::from_str("100").unwrap());
        assert_eq!(totals.all, Amount::from_str("150").unwrap());
        let report = out.report().unwrap();
        assert!(report.contains("All time"), "{report}");
        assert!(report.contains("₹150.00"), "{report}");
    }

    #[tokio::test]
    async fn test_chart() {
        let env = TestEnv::new().await;
        env.add_expense("100", "Food", "2024-01-05", "");
        env.add_expense("50", "Food", "2024-03-05", "");
        env.add_expense("70", "Food", "2023-03-05", "");

        let out = chart(env.config(), ChartArgs::new(Some(2024))).await.unwrap();
        let chart = out.structure().unwrap();
        assert_eq!(chart.year, 2024);
        assert_eq!(chart.months.len(), 12);
        assert_eq!(chart.months[0].label, "Jan");
        assert_eq!(chart.months[0].total, Amount::from_str("100").unwrap());
        assert_eq!(chart.months[2].total, Amount::from_str("50").unwrap());
        assert!(chart.months[1].total.is_zero());

        let report = out.report().unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].ends_with(&"#".repeat(BAR_WIDTH)), "{report}");
        assert!(lines[2].ends_with(&"#".repeat(BAR_WIDTH / 2)), "{report}");
        assert!(!lines[1].contains('#'), "{report}");
    }

    #[test]
    fn test_bar_len() {
        let max = Amount::from_str("1000").unwrap();
        assert_eq!(bar_len(Amount::ZERO, max), 0);
        assert_eq!(bar_len(max, max), BAR_WIDTH);
        assert_eq!(bar_len(Amount::from_str("1").unwrap(), max), 1);
        assert_eq!(bar_len(Amount::from_str("500").unwrap(), max), BAR_WIDTH / 2);
        assert_eq!(bar_len(Amount::from_str("5").unwrap(), Amount::ZERO), 0);
    }
}
