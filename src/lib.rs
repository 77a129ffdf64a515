// Crate root library declaration and module exports.
pub mod chart;
pub mod cli;
pub mod client;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod model;
pub mod resubmission;
pub mod timeline;

#[cfg(feature = "tui")]
pub mod tui;
