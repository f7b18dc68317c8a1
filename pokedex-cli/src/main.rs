//! pokedex CLI - seed and serve the pokemon REST API

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "pokedex",
    author,
    version,
    about = "REST API over a pokemon collection seeded from the pokedex dataset"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reset and seed the collection, then run the HTTP API
    Serve(commands::serve::ServeArgs),
    /// Reset and seed the collection, then exit
    Seed(commands::serve::SeedArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so env-backed flags see .env values
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    for path in &env_files {
        debug!("Loaded configuration from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Seed(args) => commands::serve::run_seed(args).await,
        Commands::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "pokedex", &mut io::stdout());
            Ok(())
        }
    }
}
