use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, ErrorType, Result};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Add(add_args) => commands::add(load(home).await?, add_args.clone())
            .await?
            .print(),

        Command::Edit(edit_args) => commands::edit(load(home).await?, edit_args.clone())
            .await?
            .print(),

        Command::Delete(delete_args) => commands::delete(load(home).await?, delete_args.clone())
            .await?
            .print(),

        Command::Clear(clear_args) => commands::clear(load(home).await?, clear_args.clone())
            .await?
            .print(),

        Command::List(list_args) => commands::list(load(home).await?, list_args.clone())
            .await?
            .print(),

        Command::Totals => commands::totals(load(home).await?).await?.print(),

        Command::Chart(chart_args) => commands::chart(load(home).await?, chart_args.clone())
            .await?
            .print(),

        Command::Export(export_args) => commands::export(load(home).await?, export_args.clone())
            .await?
            .print(),
    };
    Ok(())
}

async fn load(home: &Path) -> Result<Config> {
    Config::load(home)
        .await
        .map_err(|e| expense_tracker::Error::new(ErrorType::Config, e))
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this package's library and binary.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
