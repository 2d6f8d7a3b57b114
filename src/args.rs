//! These structs provide the CLI interface for the expenses CLI.

use crate::model::{Amount, Criteria, MonthKey};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line personal expense tracker.
///
/// Record what you spend, list and search it, see what you spent today, this month and overall,
/// chart your spending by month, and export everything as CSV. Data is kept in a JSON file in
/// your expenses home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/expenses; pass --expenses-home or set EXPENSES_HOME to put it somewhere else.
    Init,
    /// Record a new expense.
    Add(AddArgs),
    /// Change an existing expense. Fields that are not given keep their current value.
    Edit(EditArgs),
    /// Delete an expense.
    Delete(DeleteArgs),
    /// Delete every expense. A backup is written to the .backups directory first.
    Clear(ClearArgs),
    /// List expenses, most recent first, optionally filtered.
    List(ListArgs),
    /// Show what was spent today, this month and overall.
    Totals,
    /// Show spending per month for a year as a bar chart.
    Chart(ChartArgs),
    /// Export every expense as CSV.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expense data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// How much was spent, e.g. 250 or 1,200.50. A leading currency symbol is ignored.
    #[arg(long, short = 'a')]
    amount: Amount,

    /// What the money was spent on, e.g. Food.
    #[arg(long, short = 'c')]
    category: String,

    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long, short = 'd')]
    date: Option<NaiveDate>,

    /// An optional free-form note.
    #[arg(long, short = 'n')]
    note: Option<String>,
}

impl AddArgs {
    pub fn new(
        amount: Amount,
        category: impl Into<String>,
        date: Option<NaiveDate>,
        note: Option<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            note,
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn note(&self) -> &str {
        self.note.as_deref().unwrap_or_default()
    }
}

/// Args for the `expenses edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The id of the expense, as shown by `expenses list`.
    id: u64,

    /// The new amount.
    #[arg(long, short = 'a')]
    amount: Option<Amount>,

    /// The new category.
    #[arg(long, short = 'c')]
    category: Option<String>,

    /// The new date as YYYY-MM-DD.
    #[arg(long, short = 'd')]
    date: Option<NaiveDate>,

    /// The new note. Pass an empty string to remove the note.
    #[arg(long, short = 'n')]
    note: Option<String>,
}

impl EditArgs {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            amount: None,
            category: None,
            date: None,
            note: None,
        }
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the expense, as shown by `expenses list`.
    id: u64,

    /// Do not ask for confirmation.
    #[arg(long, short = 'y')]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: u64, yes: bool) -> Self {
        Self { id, yes }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `expenses clear` command.
#[derive(Debug, Parser, Clone)]
pub struct ClearArgs {
    /// Do not ask for confirmation.
    #[arg(long, short = 'y')]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `expenses list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show expenses from this month, given as YYYY-MM.
    #[arg(long, short = 'm')]
    month: Option<MonthKey>,

    /// Only show expenses with exactly this category.
    #[arg(long, short = 'c')]
    category: Option<String>,

    /// Only show expenses whose note or category contains this text, ignoring case.
    #[arg(long, short = 's')]
    search: Option<String>,
}

impl ListArgs {
    pub fn new(month: Option<MonthKey>, category: Option<String>, search: Option<String>) -> Self {
        Self {
            month,
            category,
            search,
        }
    }

    pub fn criteria(&self) -> Criteria {
        Criteria {
            month: self.month,
            category: self.category.clone(),
            search: self.search.clone(),
        }
    }
}

/// Args for the `expenses chart` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ChartArgs {
    /// The year to chart. Defaults to the current year.
    #[arg(long, short = 'y')]
    year: Option<i32>,
}

impl ChartArgs {
    pub fn new(year: Option<i32>) -> Self {
        Self { year }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

/// Args for the `expenses export` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// Where to write the CSV file. Use - for stdout. Defaults to $EXPENSES_HOME/expenses.csv
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory.",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
