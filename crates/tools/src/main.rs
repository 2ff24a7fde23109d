use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sell_tickets_tools::{inventory_rows, observability, parse_selection, price_selection, Config};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "sell-tickets")]
#[command(about = "Tools for the sell-concert-tickets contract")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration
    Config {
        /// Fail unless the configuration validates
        #[arg(short, long)]
        validate: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the inventory an instance starts with, as JSON
    Inventory {
        /// Last-row price; defaults to the configured base unit
        #[arg(short, long)]
        base_unit: Option<i128>,
    },
    /// Price a selection such as `frontRow=1 middleRow=2`
    Price {
        #[arg(short, long)]
        base_unit: Option<i128>,
        #[arg(required = true)]
        selection: Vec<String>,
    },
}

fn base_unit_or_configured(base_unit: Option<i128>) -> Result<i128> {
    match base_unit {
        Some(unit) => Ok(unit),
        None => Ok(Config::load().context("loading configuration")?.base_unit),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.debug);

    match cli.command {
        Commands::Config { validate, json } => {
            let config = Config::load();
            let config = match (config, validate) {
                (Ok(config), _) => config,
                (Err(err), true) => return Err(err).context("configuration is invalid"),
                (Err(err), false) => {
                    info!("configuration incomplete: {}", err);
                    return Ok(());
                }
            };
            if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            if validate {
                info!(network = %config.network, "configuration valid");
            }
            Ok(())
        }
        Commands::Inventory { base_unit } => {
            let base_unit = base_unit_or_configured(base_unit)?;
            let rows = inventory_rows(base_unit)?;
            debug!(base_unit, tiers = rows.len(), "built inventory");
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
        Commands::Price { base_unit, selection } => {
            let base_unit = base_unit_or_configured(base_unit)?;
            let selection = parse_selection(&selection)?;
            let total = price_selection(&selection, base_unit)?;
            debug!(base_unit, tiers = selection.len(), total, "priced selection");
            println!("{}", total);
            Ok(())
        }
    }
}
