//! `ExpenseStore` owns the canonical expense set and keeps its stored copy in sync.
//!
//! Every mutation is applied to a copy of the set, the copy is persisted, and only then does it
//! replace the in-memory set. A failed write therefore leaves both the store and the storage as
//! they were. Each mutation returns a `Change` describing what happened so that callers can decide
//! what to redraw.

use crate::error::{Error, ErrorType};
use crate::model::{Amount, Criteria, Expense};
use crate::storage::{self, Storage};
use crate::views::{self, Totals};
use crate::Result;
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// The outcome of a mutation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Created(Expense),
    Updated { before: Expense, after: Expense },
    Deleted(Expense),
    /// The set was emptied. Holds the number of expenses removed.
    Cleared(usize),
    /// Nothing matched, nothing was written.
    Unchanged,
}

impl Change {
    /// The expense that was created, updated (new version) or deleted.
    pub fn expense(&self) -> Option<&Expense> {
        match self {
            Change::Created(e) | Change::Deleted(e) => Some(e),
            Change::Updated { after, .. } => Some(after),
            Change::Cleared(_) | Change::Unchanged => None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Change::Unchanged)
    }
}

/// Owns the expense set and the `Storage` it is mirrored to.
#[derive(Debug)]
pub struct ExpenseStore<S: Storage> {
    storage: S,
    expenses: Vec<Expense>,
}

impl<S: Storage> ExpenseStore<S> {
    /// Opens a store over `storage`, loading whatever it holds. Missing or corrupt data results in
    /// an empty store.
    pub fn open(storage: S) -> Self {
        let expenses = storage::load(&storage);
        debug!("Opened expense store with {} expenses", expenses.len());
        Self { storage, expenses }
    }

    /// The canonical set, in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Writes the current set to storage.
    pub fn persist(&mut self) -> Result<()> {
        storage::persist(&mut self.storage, &self.expenses)
    }

    /// Records a new expense with a fresh id.
    ///
    /// # Errors
    /// - `ErrorType::Validation` if `amount` is not positive or `category` is blank. Nothing is
    ///   changed.
    /// - `ErrorType::Persistence` if the write fails. Nothing is changed.
    pub fn create(
        &mut self,
        amount: Amount,
        category: &str,
        date: NaiveDate,
        note: &str,
    ) -> Result<Change> {
        let expense = Expense::new(self.next_id()?, amount, category, date, note)?;
        let mut next = self.expenses.clone();
        next.push(expense.clone());
        self.commit(next)?;
        info!("Created expense {}", expense.id());
        Ok(Change::Created(expense))
    }

    /// Replaces every field but the id of the expense with `id`.
    ///
    /// # Errors
    /// - `ErrorType::Validation` if `amount` is not positive or `category` is blank.
    /// - `ErrorType::NotFound` if there is no expense with `id`.
    /// - `ErrorType::Persistence` if the write fails.
    ///
    /// In every error case nothing is changed.
    pub fn update(
        &mut self,
        id: u64,
        amount: Amount,
        category: &str,
        date: NaiveDate,
        note: &str,
    ) -> Result<Change> {
        let after = Expense::new(id, amount, category, date, note)?;
        let ix = self
            .position(id)
            .ok_or_else(|| Error::msg(ErrorType::NotFound, format!("Expense {id} not found")))?;
        let mut next = self.expenses.clone();
        let before = std::mem::replace(&mut next[ix], after.clone());
        self.commit(next)?;
        info!("Updated expense {id}");
        Ok(Change::Updated { before, after })
    }

    /// Removes the expense with `id`. Returns `Change::Unchanged` without writing if there is
    /// none.
    pub fn delete(&mut self, id: u64) -> Result<Change> {
        let ix = match self.position(id) {
            Some(ix) => ix,
            None => {
                debug!("Delete of expense {id} ignored, it does not exist");
                return Ok(Change::Unchanged);
            }
        };
        let mut next = self.expenses.clone();
        let removed = next.remove(ix);
        self.commit(next)?;
        info!("Deleted expense {id}");
        Ok(Change::Deleted(removed))
    }

    /// Removes every expense.
    pub fn clear(&mut self) -> Result<Change> {
        let count = self.expenses.len();
        self.commit(Vec::new())?;
        info!("Cleared {count} expenses");
        Ok(Change::Cleared(count))
    }

    /// See `views::filter`.
    pub fn filter(&self, criteria: &Criteria) -> Vec<Expense> {
        views::filter(&self.expenses, criteria)
    }

    /// Totals over the whole set relative to the local date.
    pub fn totals(&self) -> Totals {
        views::totals(&self.expenses, Local::now().date_naive())
    }

    /// See `views::monthly_series`.
    pub fn monthly_series(&self, year: i32) -> [Amount; 12] {
        views::monthly_series(&self.expenses, year)
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.expenses.iter().position(|e| e.id() == id)
    }

    /// The creation time in milliseconds, bumped past the largest existing id so that two
    /// expenses created within the same millisecond still get distinct ids. If the largest id is
    /// `u64::MAX` the first unused id from the creation time onwards is taken instead.
    fn next_id(&self) -> Result<u64> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let max = match self.expenses.iter().map(Expense::id).max() {
            Some(max) => max,
            None => return Ok(now),
        };
        if let Some(next) = max.checked_add(1) {
            return Ok(now.max(next));
        }
        let used: HashSet<u64> = self.expenses.iter().map(Expense::id).collect();
        (now..=u64::MAX)
            .chain(0..now)
            .find(|id| !used.contains(id))
            .ok_or_else(|| Error::msg(ErrorType::Validation, "No unused expense id is left"))
    }

    fn commit(&mut self, next: Vec<Expense>) -> Result<()> {
        storage::persist(&mut self.storage, &next)?;
        self.expenses = next;
        Ok(())
    }
}
