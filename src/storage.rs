//! The `Storage` trait is a single key/value slot that holds the serialized expense set, plus the
//! `load` and `persist` functions that move an expense set in and out of it.
//!
//! `FileStorage` keeps the value in `<dir>/<key>.json`. `MemoryStorage` keeps it in memory, which is
//! useful for tests and for embedding the store in another program.

use crate::error::{ErrorType, IntoResult, Re};
use crate::model::Expense;
use crate::{fs, Result};
use anyhow::{bail, Context};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// The key under which the expense set is stored unless configured otherwise.
pub const DEFAULT_KEY: &str = "expenses";

/// A slot that holds one serialized value.
pub trait Storage {
    /// Returns the stored value, or `None` if nothing has been stored yet.
    fn read(&self) -> Re<Option<String>>;

    /// Replaces the stored value. Either the whole value is written or the previous value remains.
    fn write(&mut self, value: &str) -> Re<()>;
}

/// Reads the expense set from `storage`.
///
/// This never fails: a missing value, an unreadable value or a value that does not parse all
/// yield an empty set. Records that violate the expense invariants (invalid amount or blank
/// category) are skipped, and so is any record whose id was already seen earlier in the value.
pub fn load<S>(storage: &S) -> Vec<Expense>
where
    S: Storage + ?Sized,
{
    let raw = match storage.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored expenses found, starting with an empty set");
            return Vec::new();
        }
        Err(e) => {
            warn!("Unable to read stored expenses, starting with an empty set: {e:#}");
            return Vec::new();
        }
    };

    let expenses: Vec<Expense> = match serde_json::from_str(&raw) {
        Ok(expenses) => expenses,
        Err(e) => {
            warn!("Stored expenses are corrupt, starting with an empty set: {e}");
            return Vec::new();
        }
    };

    let total = expenses.len();
    let valid: Vec<Expense> = expenses.into_iter().filter(Expense::is_valid).collect();
    if valid.len() < total {
        warn!(
            "Skipped {} stored expense(s) with an invalid amount or blank category",
            total - valid.len()
        );
    }

    let total = valid.len();
    let mut seen = HashSet::new();
    let unique: Vec<Expense> = valid.into_iter().filter(|e| seen.insert(e.id())).collect();
    if unique.len() < total {
        warn!(
            "Skipped {} stored expense(s) with an id that was already used",
            total - unique.len()
        );
    }
    trace!("Loaded {} expenses", unique.len());
    unique
}

/// Serializes the whole expense set and replaces the stored value with it.
///
/// # Errors
/// - `ErrorType::Persistence` if serialization or the write fails.
pub fn persist<S>(storage: &mut S, expenses: &[Expense]) -> Result<()>
where
    S: Storage + ?Sized,
{
    let json = serde_json::to_string(expenses)
        .context("Unable to serialize expenses")
        .pub_result(ErrorType::Persistence)?;
    storage
        .write(&json)
        .context("Unable to save expenses")
        .pub_result(ErrorType::Persistence)?;
    trace!("Persisted {} expenses", expenses.len());
    Ok(())
}

/// Stores the value as a JSON file named after the storage key.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at `<dir>/<key>.json`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Re<Option<String>> {
        fs::read_optional(&self.path)
    }

    /// Writes to a temporary sibling and renames it over the target.
    fn write(&mut self, value: &str) -> Re<()> {
        let temp = self.temp_path();
        fs::write_all(&temp, value)?;
        fs::rename(&temp, &self.path)
    }
}

/// Keeps the value in memory.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemoryStorage {
    value: Option<String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            fail_writes: false,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// When set, every write fails as if the storage quota were exceeded.
    pub fn set_fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Re<Option<String>> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Re<()> {
        if self.fail_writes {
            bail!("Storage quota exceeded");
        }
        self.value = Some(value.to_string());
        Ok(())
    }
}
