//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
mod criteria;
mod expense;
mod month;

pub use amount::{Amount, AmountError};
pub use criteria::Criteria;
pub use expense::Expense;
pub use month::MonthKey;
