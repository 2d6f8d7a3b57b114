//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{export, fs, Config, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Passing this as `--output` writes the CSV to stdout.
const STDOUT: &str = "-";

/// The outcome of `expenses export`.
#[derive(Debug, Clone, Serialize)]
pub struct Exported {
    /// How many expenses were written.
    pub count: usize,
    /// The file that was written, `None` when the CSV went to stdout.
    pub path: Option<PathBuf>,
}

/// Exports every expense, in stored order, as CSV. The destination defaults to
/// `$EXPENSES_HOME/expenses.csv`.
///
/// # Errors
/// - `ErrorType::Export` if the file cannot be created or written.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<Exported>> {
    let store = config.open_store();
    if store.is_empty() {
        return Ok("Nothing to export".into());
    }
    let count = store.len();

    if args.output() == Some(Path::new(STDOUT)) {
        let csv = export::to_csv(store.expenses())?;
        return Ok(Out::new(
            format!("Exported {count} expense{}", plural(count)),
            Exported { count, path: None },
        )
        .with_report(csv));
    }

    let path = args
        .output()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.export_path());
    let file = fs::file(&path).pub_result(ErrorType::Export)?;
    export::write_csv(store.expenses(), file)?;
    debug!("Wrote {count} rows to {}", path.display());

    Ok(Out::new(
        format!(
            "Exported {count} expense{} to {}",
            plural(count),
            path.display()
        ),
        Exported {
            count,
            path: Some(path),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_csv;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_export_default_path() {
        let env = TestEnv::new().await;
        let a = env.add_expense("100", "Food", "2024-01-05", "lunch, dinner");
        let b = env.add_expense("50", "Travel", "2024-01-06", "");

        let out = export(env.config(), ExportArgs::new(None)).await.unwrap();
        let exported = out.structure().unwrap();
        assert_eq!(exported.count, 2);
        assert_eq!(exported.path.as_deref(), Some(env.config().export_path().as_path()));

        let written = std::fs::read_to_string(env.config().export_path()).unwrap();
        assert_eq!(written, to_csv(&[a.clone(), b.clone()]).unwrap());
        let expected = format!(
            "id,amount,category,note,date\n{},100,Food,lunch  dinner,2024-01-05\n{},50,Travel,,2024-01-06\n",
            a.id(),
            b.id()
        );
        assert_eq!(written, expected);
    }

    #[tokio::test]
    async fn test_export_to_stdout() {
        let env = TestEnv::new().await;
        let a = env.add_expense("100", "Food", "2024-01-05", "");
        let out = export(env.config(), ExportArgs::new(Some(PathBuf::from("-"))))
            .await
            .unwrap();
        assert!(out.structure().unwrap().path.is_none());
        assert_eq!(out.report().unwrap(), to_csv(&[a]).unwrap());
        assert!(!env.config().export_path().exists());
    }

    #[tokio::test]
    async fn test_export_nothing() {
        let env = TestEnv::new().await;
        let out = export(env.config(), ExportArgs::new(None)).await.unwrap();
        assert_eq!(out.message(), "Nothing to export");
        assert!(!env.config().export_path().exists());
    }

    #[tokio::test]
    async fn test_export_bad_path() {
        let env = TestEnv::new().await;
        env.add_expense("100", "Food", "2024-01-05", "");
        let path = env.config().root().join("missing").join("out.csv");
        let err = export(env.config(), ExportArgs::new(Some(path)))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Export);
    }
}
