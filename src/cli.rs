// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing, help and the
//! headless `export` command.
use crate::chart::{ChartOptions, ChartRenderer, JsonChart};
use crate::client::FeedClient;
use crate::config::Config;
use crate::filter::{DateRange, FilterOptions};
use crate::loader;
use crate::model::parse_date;
use crate::timeline::build_view;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    Export(ExportArgs),
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportArgs {
    /// `None` means the configured default window.
    pub range: Option<DateRange>,
    pub tags: Vec<String>,
    /// Overrides the configured feed URL.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn date_arg(flag: &str, value: Option<&String>) -> Result<NaiveDate, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    parse_date(value).ok_or_else(|| format!("{}: '{}' is not a DD/MM/YYYY date", flag, value))
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut root = None;
    let mut command = Command::Tui;
    let mut export = ExportArgs::default();
    let mut from = None;
    let mut to = None;
    let mut all = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => {
                return Ok(CliArgs {
                    root,
                    command: Command::Help,
                });
            }
            "--root" | "-r" => {
                let value = args.get(i + 1).ok_or("--root needs a path")?;
                root = Some(PathBuf::from(value));
                i += 1;
            }
            "export" if command == Command::Tui => {
                command = Command::Export(ExportArgs::default());
            }
            "--from" => {
                from = Some(date_arg("--from", args.get(i + 1))?);
                i += 1;
            }
            "--to" => {
                to = Some(date_arg("--to", args.get(i + 1))?);
                i += 1;
            }
            "--tag" | "-t" => {
                let value = args.get(i + 1).ok_or("--tag needs a value")?;
                export.tags.push(value.trim().to_string());
                i += 1;
            }
            "--url" => {
                let value = args.get(i + 1).ok_or("--url needs a value")?;
                export.url = Some(value.clone());
                i += 1;
            }
            "--all" => all = true,
            other => return Err(format!("Unknown argument '{}'", other)),
        }
        i += 1;
    }

    if let (Some(f), Some(t)) = (from, to)
        && f > t
    {
        return Err("--from is after --to".to_string());
    }

    if let Command::Export(_) = command {
        export.range = if all {
            Some(DateRange::unbounded())
        } else if from.is_some() || to.is_some() {
            Some(DateRange::new(from, to))
        } else {
            None
        };
        command = Command::Export(export);
    } else if all
        || from.is_some()
        || to.is_some()
        || !export.tags.is_empty()
        || export.url.is_some()
    {
        return Err("Filter options only apply to 'export'".to_string());
    }

    Ok(CliArgs { root, command })
}

/// Fetches the feed and writes one chart document as JSON to `out`.
pub async fn run_export<W: Write>(
    cfg: &Config,
    args: &ExportArgs,
    today: NaiveDate,
    out: W,
) -> Result<()> {
    let client = FeedClient::new(cfg.allow_insecure_certs)?;
    let url = args.url.as_deref().unwrap_or(&cfg.feed_url);
    let bootstrap = async move { Ok::<_, anyhow::Error>(JsonChart::new(out)) };
    let loaded = loader::initialize(bootstrap, &client, url).await?;

    let range = args
        .range
        .unwrap_or_else(|| DateRange::default_window(today, cfg.default_range_months));
    let selected_tags: HashSet<String> = args.tags.iter().cloned().collect();
    let options = FilterOptions {
        range,
        selected_tags: &selected_tags,
    };
    let view = build_view(&loaded.records, &options, today);
    log::info!("Exporting {} row(s) for {}", view.rows.len(), range);

    let mut chart = loaded.renderer;
    chart.set_edges(view.edges);
    chart.draw(&view.rows, &ChartOptions::for_rows(view.rows.len(), &cfg.chart))?;
    chart.into_inner().flush()?;
    Ok(())
}

pub async fn run_export_now(cfg: &Config, args: &ExportArgs) -> Result<()> {
    let stdout = std::io::stdout();
    run_export(cfg, args, Local::now().date_naive(), stdout.lock()).await
}

pub fn print_help(binary_name: &str) {
    println!(
        "Confline v{} - Conference deadline timeline (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!(
        "    {} export [--from DD/MM/YYYY] [--to DD/MM/YYYY] [--all] [--tag <tag>]... [--url <csv url>]",
        binary_name
    );
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and logs.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXPORT COMMAND:");
    println!("    --from <date>         Hide conferences registering before this date.");
    println!("    --to <date>           Hide conferences notifying after this date.");
    println!("    --all                 No date window (default: this month + 18 months).");
    println!("    -t, --tag <tag>       Keep conferences with this tag. Repeatable.");
    println!("    --url <csv url>       Read another CSV feed instead of the configured one.");
    println!();
    println!(
        "    {} export --tag NLP > nlp.json        Chart rows for NLP venues",
        binary_name
    );
    println!(
        "    {} export --all | jq '.rows[].id'    List every row id",
        binary_name
    );
    println!();
    println!("KEYBINDINGS:");
    println!("    Press '?' inside the app for full interactive help");
    println!();
    println!("ENVIRONMENT:");
    println!("    CONFLINE_LOG          Log level (error, warn, info, debug, trace).");
}
