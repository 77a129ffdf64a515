// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_SHEET_ID: &str = "18Qt_tHtdUPTXQMDyoiHjDi8ELiOBF7mUv-BAF-lltbg";

fn default_feed_url() -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv",
        DEFAULT_SHEET_ID
    )
}
fn default_range_months() -> u32 {
    18
}
fn default_row_height() -> u32 {
    45
}
fn default_min_height() -> u32 {
    400
}
fn default_track_height() -> u32 {
    40
}
fn default_label_color() -> String {
    "#7E69AB".to_string()
}
fn default_arrow_color() -> String {
    "#E53E3E".to_string()
}
fn default_background_color() -> String {
    "#ffffff".to_string()
}

/// Display options handed to chart renderers.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChartConfig {
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_min_height")]
    pub min_height: u32,
    #[serde(default = "default_track_height")]
    pub track_height: u32,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default = "default_arrow_color")]
    pub arrow_color: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            min_height: default_min_height(),
            track_height: default_track_height(),
            label_color: default_label_color(),
            arrow_color: default_arrow_color(),
            background_color: default_background_color(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// CSV export of the deadline sheet.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default)]
    pub allow_insecure_certs: bool,
    /// Length of the default date window, starting at the current month.
    #[serde(default = "default_range_months")]
    pub default_range_months: u32,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            allow_insecure_certs: false,
            default_range_months: default_range_months(),
            chart: ChartConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Loads the config, writing the defaults to disk on first run.
    ///
    /// Syntax and permission errors are returned, never replaced by defaults.
    pub fn load_or_init(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                let cfg = Self::default();
                match cfg.save(ctx) {
                    Ok(()) => log::info!(
                        "Wrote default configuration to {}",
                        Self::get_path_string(ctx).unwrap_or_default()
                    ),
                    Err(e) => log::warn!("Could not save default config: {}", e),
                }
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    /// Detects whether an error means the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Writes through a temporary file so a crash never leaves half a config.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, toml_str)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
