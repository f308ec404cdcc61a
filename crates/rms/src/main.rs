use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use env_logger::{Env, Target};
use rms_search::SearchType;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

mod actions;
mod config;
mod display;
mod query;
mod tui;

use config::Config;

#[derive(Parser)]
#[command(name = "rms")]
#[command(about = "Terminal console for the restaurant management server", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Config file (defaults to ~/.rms/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Server base URL, overriding config and RMS_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search with live results
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Run a single search and print the results
    #[command(alias = "q")]
    Query(query::QueryArgs),

    /// Change an order's status
    OrderStatus(actions::OrderStatusArgs),

    /// Toggle a menu item's availability
    ToggleItem(actions::ToggleItemArgs),

    /// Show order count and spend for a customer
    CustomerStats(actions::CustomerStatsArgs),

    /// Show the line items of an order
    OrderSummary(actions::OrderSummaryArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct SearchArgs {
    /// Tab to open first: customers, menu or orders
    #[arg(long = "type", short = 't', default_value = "customers")]
    search_type: SearchType,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    init_logger(cli.debug, matches!(cli.command, Commands::Search(_)))?;

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    config.validate()?;
    log::debug!("using server {}", config.base_url);

    match cli.command {
        Commands::Search(args) => {
            if let Some(selection) = tui::run(&config, args.search_type)? {
                println!("{}", serde_json::to_string_pretty(&selection)?);
            }
            Ok(())
        }
        Commands::Query(args) => query::execute(args, &config),
        Commands::OrderStatus(args) => actions::order_status(args, &config),
        Commands::ToggleItem(args) => actions::toggle_item(args, &config),
        Commands::CustomerStats(args) => actions::customer_stats(args, &config),
        Commands::OrderSummary(args) => actions::order_summary(args, &config),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_logger(debug: bool, to_file: bool) -> anyhow::Result<()> {
    // Default level depends on --debug (overridden by RUST_LOG)
    let env = if debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    let mut builder = env_logger::Builder::from_env(env);

    if to_file {
        let dir = config::rms_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("rms.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
