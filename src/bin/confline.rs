// Binary entry point: interactive timeline, or `export` for JSON on stdout.
use anyhow::Result;
use confline::cli::{self, Command};
use confline::config::Config;
use confline::context::{SharedContext, StandardContext};
use confline::logging;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let parsed = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'confline --help' for usage.");
            std::process::exit(2);
        }
    };

    let ctx: SharedContext = Arc::new(StandardContext::new(parsed.root));

    match parsed.command {
        Command::Help => {
            cli::print_help("confline");
            Ok(())
        }
        Command::Export(export) => {
            logging::init_stderr_logger()?;
            let cfg = Config::load_or_init(ctx.as_ref())?;
            cli::run_export_now(&cfg, &export).await
        }
        Command::Tui => {
            if let Err(e) = logging::init_file_logger(ctx.as_ref()) {
                eprintln!("Warning: file logging disabled: {}", e);
            }
            let cfg = match Config::load_or_init(ctx.as_ref()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Error loading configuration:\n{}", e);
                    std::process::exit(1);
                }
            };
            confline::tui::run(ctx, cfg).await
        }
    }
}
