use crate::model::{Expense, MonthKey};
use serde::{Deserialize, Serialize};

/// Filter criteria for listing expenses. Every criterion is optional and an empty `Criteria`
/// matches everything.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    /// Only expenses dated in this month.
    pub month: Option<MonthKey>,
    /// Only expenses whose category is exactly this label.
    pub category: Option<String>,
    /// Case-insensitive substring matched against the note or the category.
    pub search: Option<String>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub(crate) fn matches_month(&self, expense: &Expense) -> bool {
        match self.month {
            Some(month) => expense.month_key() == month,
            None => true,
        }
    }

    pub(crate) fn matches_category(&self, expense: &Expense) -> bool {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => expense.category() == category,
            _ => true,
        }
    }

    /// A blank search string matches everything.
    pub(crate) fn matches_search(&self, expense: &Expense) -> bool {
        let query = match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };
        expense.note().to_lowercase().contains(&query)
            || expense.category().to_lowercase().contains(&query)
    }
}
