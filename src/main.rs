use anyhow::Result;
use clap::{Parser, Subcommand};

/// meal-planner - Family meal planning backend
#[derive(Parser)]
#[command(name = "meal-planner")]
#[command(about = "Collects family meal wishes and turns them into meal plans", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = meal_planner::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    meal_planner::observability::init_observability(
        "meal-planner",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => meal_planner::cli::serve(config, host, port).await,
        Commands::Migrate => meal_planner::migrate::migrate(&config).await,
        Commands::Reset => meal_planner::migrate::reset(&config).await,
    }
}
