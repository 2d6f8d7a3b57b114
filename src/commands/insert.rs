//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Expense;
use crate::{Change, Config, Error, ErrorType, Result};
use chrono::Local;

/// Records a new expense. The date defaults to today's local date.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message with the generated id.
/// - The new `Expense`.
///
/// # Errors
///
/// - `ErrorType::Validation` if the amount is not positive or the category is blank.
/// - `ErrorType::Persistence` if the expense set cannot be saved.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Expense>> {
    let date = args.date().unwrap_or_else(|| Local::now().date_naive());
    let mut store = config.open_store();
    let expense = match store.create(args.amount(), args.category(), date, args.note())? {
        Change::Created(expense) => expense,
        other => {
            return Err(Error::msg(
                ErrorType::Internal,
                format!("Adding an expense returned {other:?}"),
            ))
        }
    };
    let message = format!(
        "Added expense {}: {} {} on {}",
        expense.id(),
        expense.category(),
        expense.amount().formatted(config.currency_symbol()),
        expense.date()
    );
    Ok(Out::new(message, expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_add() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(
            Amount::from_str("1200.5").unwrap(),
            "Food",
            Some(NaiveDate::from_str("2024-01-05").unwrap()),
            Some("team lunch".to_string()),
        );
        let out = add(env.config(), args).await.unwrap();
        assert!(out.message().contains("₹1,200.50"), "{}", out.message());

        let added = out.structure().unwrap();
        assert_eq!(added.category(), "Food");
        assert_eq!(added.note(), "team lunch");

        let stored = env.stored();
        assert_eq!(stored, vec![added.clone()]);
    }

    #[tokio::test]
    async fn test_add_defaults_to_today() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(Amount::from_str("5").unwrap(), "Tea", None, None);
        let out = add(env.config(), args).await.unwrap();
        let added = out.structure().unwrap();
        assert_eq!(added.date(), Local::now().date_naive());
        assert_eq!(added.note(), "");
    }

    #[tokio::test]
    async fn test_add_rejects_zero_amount() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(Amount::from_str("0").unwrap(), "X", None, None);
        let err = add(env.config(), args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(env.stored().is_empty());
        assert!(!env.config().storage().path().exists());
    }
}
