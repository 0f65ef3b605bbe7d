//! Interactive student database entry point.
//!
//! # Responsibility
//! - Merge defaults, config file and command-line flags into one `SdmsConfig`.
//! - Open the store and hand control to the menu loop.
//! - Exit non-zero only when setup fails; operation errors stay in the loop.

mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sdms_core::{
    core_version, demo_seed_student, init_logging, SdmsConfig, SqliteStudentStore, StudentService,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::menu::Menu;

/// Student database manager with encrypted-at-rest grades.
#[derive(Parser, Debug)]
#[command(name = "sdms")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file (`:memory:` for a throwaway store)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Grade cipher key
    #[arg(long)]
    key: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Do not insert the demo record into an empty store
    #[arg(long)]
    no_seed: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let store = SqliteStudentStore::open(config.store_location(), config.cipher_key.as_bytes())
        .with_context(|| format!("failed to open student store at {}", config.db_path.display()))?;
    let service = StudentService::new(store);

    if config.seed_demo_record {
        service
            .seed_if_empty(&demo_seed_student())
            .context("failed to seed demo record")?;
    }

    let stdin = io::stdin();
    Menu::new(&service, stdin.lock(), io::stdout()).run()?;

    service.into_repo().close()?;
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn load_config(args: Args) -> Result<SdmsConfig> {
    let mut config = match &args.config {
        Some(path) => SdmsConfig::from_file(path)?,
        None => SdmsConfig::default(),
    };

    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(key) = args.key {
        config.cipher_key = key;
    }
    if let Some(log_dir) = args.log_dir {
        config.log_dir = Some(log_dir);
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    if args.no_seed {
        config.seed_demo_record = false;
    }

    config.validate()?;
    Ok(config)
}
