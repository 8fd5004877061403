//! Stitch - terminal tutorial-writing assistant

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use stitch_core::config::load_dotenv;
use stitch_core::llm::error_display;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "stitch=info,stitch_core=info";
const VERBOSE_LOG_FILTER: &str = "stitch=debug,stitch_core=debug";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    load_dotenv()?;

    let workspace = match &args.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current dir")?,
    };

    let result = match &args.command {
        Commands::Init { force } => cli::handle_init_command(&workspace, *force),
        Commands::Config => {
            let manager = cli::load_config(&args, &workspace)?;
            cli::handle_config_command(&manager)
        }
        Commands::Write { request } => {
            let config = cli::load_config(&args, &workspace)?.into_config();
            cli::handle_write_command(&config, &workspace, &request.join(" ")).await
        }
        Commands::Outline { request } => {
            let config = cli::load_config(&args, &workspace)?.into_config();
            cli::handle_outline_command(&config, &request.join(" ")).await
        }
    };

    if let Err(err) = result {
        eprintln!("{}", error_display::style_llm_error(&format!("Error: {err:#}")));
        std::process::exit(1);
    }
    Ok(())
}
