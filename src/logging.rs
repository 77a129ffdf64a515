// File: ./src/logging.rs
// Logger setup for the binary. The TUI owns the terminal, so it logs to a file.
use crate::context::AppContext;
use anyhow::Result;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;

pub const LOG_LEVEL_ENV: &str = "CONFLINE_LOG";

/// Level from `CONFLINE_LOG`, `info` when unset or unparsable.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .add_filter_allow_str("confline")
        .build()
}

/// Appends to `<cache dir>/confline.log`.
pub fn init_file_logger(ctx: &dyn AppContext) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    WriteLogger::init(level_from_env(), log_config(), file)?;
    log::info!("confline {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// For headless commands whose stdout carries data.
pub fn init_stderr_logger() -> Result<()> {
    WriteLogger::init(level_from_env(), log_config(), std::io::stderr())?;
    Ok(())
}
