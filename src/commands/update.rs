//! Edit command handler.

use crate::args::EditArgs;
use crate::commands::Out;
use crate::model::Expense;
use crate::{Change, Config, Error, ErrorType, Result};

/// Changes an existing expense. Fields not given in `args` keep their stored value.
///
/// # Errors
///
/// - `ErrorType::NotFound` if there is no expense with the given id.
/// - `ErrorType::Validation` if the resulting amount or category is invalid.
/// - `ErrorType::Persistence` if the expense set cannot be saved.
pub async fn edit(config: Config, args: EditArgs) -> Result<Out<Expense>> {
    let id = args.id();
    let mut store = config.open_store();
    let current = store
        .get(id)
        .cloned()
        .ok_or_else(|| Error::msg(ErrorType::NotFound, format!("Expense {id} not found")))?;

    let amount = args.amount().unwrap_or(current.amount());
    let category = args.category().unwrap_or(current.category());
    let date = args.date().unwrap_or(current.date());
    let note = args.note().unwrap_or(current.note());

    let (before, after) = match store.update(id, amount, category, date, note)? {
        Change::Updated { before, after } => (before, after),
        other => {
            return Err(Error::msg(
                ErrorType::Internal,
                format!("Editing expense {id} returned {other:?}"),
            ))
        }
    };
    let message = if before == after {
        format!("Expense {id} is unchanged")
    } else {
        format!(
            "Updated expense {id}: {} {} on {}",
            after.category(),
            after.amount().formatted(config.currency_symbol()),
            after.date()
        )
    };
    Ok(Out::new(message, after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_edit_merges_fields() {
        let env = TestEnv::new().await;
        let added = env.add_expense("100", "Food", "2024-01-05", "lunch");

        let args = EditArgs::new(added.id()).with_amount(Amount::from_str("150").unwrap());
        let out = edit(env.config(), args).await.unwrap();
        let after = out.structure().unwrap();
        assert_eq!(after.id(), added.id());
        assert_eq!(after.amount(), Amount::from_str("150").unwrap());
        assert_eq!(after.category(), "Food");
        assert_eq!(after.date(), added.date());
        assert_eq!(after.note(), "lunch");

        assert_eq!(env.stored(), vec![after.clone()]);
    }

    #[tokio::test]
    async fn test_edit_clears_note() {
        let env = TestEnv::new().await;
        let added = env.add_expense("100", "Food", "2024-01-05", "lunch");
        let args = EditArgs::new(added.id()).with_note("");
        let out = edit(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().note(), "");
    }

    #[tokio::test]
    async fn test_edit_missing_is_not_found() {
        let env = TestEnv::new().await;
        env.add_expense("100", "Food", "2024-01-05", "");
        let err = edit(env.config(), EditArgs::new(42)).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NotFound);
    }

    #[tokio::test]
    async fn test_edit_rejects_blank_category() {
        let env = TestEnv::new().await;
        let added = env.add_expense("100", "Food", "2024-01-05", "");
        let args = EditArgs::new(added.id()).with_category("   ");
        let err = edit(env.config(), args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert_eq!(env.stored(), vec![added]);
    }
}
