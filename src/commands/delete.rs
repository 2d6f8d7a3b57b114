//! Delete and clear command handlers.

use crate::args::{ClearArgs, DeleteArgs};
use crate::backup::CLEAR;
use crate::commands::{confirm, plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Expense;
use crate::{Change, Config, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Deletes one expense after asking for confirmation, unless `--yes` was given.
///
/// Deleting an id that does not exist is not an error. Nothing is written and the message says
/// so.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<Expense>> {
    let id = args.id();
    let mut store = config.open_store();
    let expense = match store.get(id) {
        Some(expense) => expense.clone(),
        None => return Ok(format!("There is no expense with id {id}").into()),
    };

    let prompt = format!(
        "Delete expense {id} ({} {} on {})?",
        expense.category(),
        expense.amount().formatted(config.currency_symbol()),
        expense.date()
    );
    if !args.yes() && !confirm(&prompt)? {
        return Ok("Delete cancelled".into());
    }

    match store.delete(id)? {
        Change::Deleted(removed) => Ok(Out::new(format!("Deleted expense {id}"), removed)),
        _ => Ok(format!("There is no expense with id {id}").into()),
    }
}

/// The outcome of `expenses clear`.
#[derive(Debug, Clone, Serialize)]
pub struct Cleared {
    /// How many expenses were removed.
    pub count: usize,
    /// The backup written before clearing.
    pub backup: PathBuf,
}

/// Deletes every expense after asking for confirmation, unless `--yes` was given. The current
/// set is saved to the backups directory first.
pub async fn clear(config: Config, args: ClearArgs) -> Result<Out<Cleared>> {
    let mut store = config.open_store();
    if store.is_empty() {
        return Ok("Nothing to clear".into());
    }

    let count = store.len();
    let prompt = format!("Delete all {count} expense{}?", plural(count));
    if !args.yes() && !confirm(&prompt)? {
        return Ok("Clear cancelled".into());
    }

    let backup = config
        .backup()
        .save_json(CLEAR, store.expenses())
        .await
        .pub_result(ErrorType::Persistence)?;
    debug!("Saved backup to {}", backup.display());

    let count = match store.clear()? {
        Change::Cleared(count) => count,
        _ => count,
    };
    Ok(Out::new(
        format!(
            "Cleared {count} expense{}, a backup was saved to {}",
            plural(count),
            backup.display()
        ),
        Cleared { count, backup },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete() {
        let env = TestEnv::new().await;
        let a = env.add_expense("100", "Food", "2024-01-05", "");
        let b = env.add_expense("50", "Travel", "2024-01-06", "");

        let out = delete(env.config(), DeleteArgs::new(a.id(), true))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&a));
        assert_eq!(env.stored(), vec![b]);
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let env = TestEnv::new().await;
        let a = env.add_expense("100", "Food", "2024-01-05", "");
        let out = delete(env.config(), DeleteArgs::new(a.id() + 1, true))
            .await
            .unwrap();
        assert!(out.structure().is_none());
        assert!(out.message().contains("There is no expense"));
        assert_eq!(env.stored(), vec![a]);
    }

    #[tokio::test]
    async fn test_clear_writes_backup() {
        let env = TestEnv::new().await;
        let a = env.add_expense("100", "Food", "2024-01-05", "");
        let b = env.add_expense("50", "Travel", "2024-01-06", "");

        let out = clear(env.config(), ClearArgs::new(true)).await.unwrap();
        let cleared = out.structure().unwrap();
        assert_eq!(cleared.count, 2);
        assert!(env.stored().is_empty());

        let json = std::fs::read_to_string(&cleared.backup).unwrap();
        let saved: Vec<Expense> = serde_json::from_str(&json).unwrap();
        assert_eq!(saved, vec![a, b]);
    }

    #[tokio::test]
    async fn test_clear_empty() {
        let env = TestEnv::new().await;
        let out = clear(env.config(), ClearArgs::new(true)).await.unwrap();
        assert_eq!(out.message(), "Nothing to clear");
        assert!(out.structure().is_none());
    }
}
