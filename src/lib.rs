pub mod args;
mod backup;
pub mod commands;
mod config;
mod error;
pub mod export;
mod fs;
pub mod model;
pub mod storage;
pub mod store;
mod utils;
pub mod views;


pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use store::{Change, ExpenseStore};
