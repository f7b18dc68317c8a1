//! `serve` and `seed` commands
//!
//! Both run the startup sequence: open the store, drop the collection, load
//! the type schema, populate. `serve` then listens; `seed` exits.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing::{info, warn};

use pokedex_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use pokedex_server::db::{create_pool_with_options, MemoryStore, PgPokemonStore, PokemonStore};
use pokedex_server::models::TypeSchema;
use pokedex_server::seed::{
    fetch_pokedex, fetch_type_schema, populate, SeedReport, DEFAULT_POKEDEX_URL,
    DEFAULT_TYPES_URL,
};
use pokedex_server::{run_server, AppState, ServerConfig};

/// Timeout for each seed download
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Storage options shared by `serve` and `seed`
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum database connections
    #[arg(long, env = "POKEDEX_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Keep records from a previous run instead of dropping the collection
    #[arg(long)]
    pub keep_data: bool,

    /// Use an in-process store instead of Postgres (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Seed data sources
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// URL of the pokemon type list
    #[arg(long, env = "POKEDEX_TYPES_URL", default_value = DEFAULT_TYPES_URL)]
    pub types_url: String,

    /// URL of the pokedex dataset
    #[arg(long, env = "POKEDEX_DATA_URL", default_value = DEFAULT_POKEDEX_URL)]
    pub pokedex_url: String,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "POKEDEX_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long, env = "POKEDEX_TIMEOUT_SECS", default_value = "30")]
    pub timeout: u64,

    /// Skip populating the collection (the type schema is still loaded)
    #[arg(long)]
    pub no_seed: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub sources: SourceArgs,
}

async fn open_store(args: &StoreArgs) -> Result<Arc<dyn PokemonStore>> {
    if args.in_memory {
        warn!("Using in-memory store; records are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.pokedex/.env")?;

    let pool = create_pool_with_options(database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;
    info!("Connected to database");

    Ok(Arc::new(PgPokemonStore::new(pool)))
}

/// Open the store, reset it unless asked not to, and load the type schema.
async fn prepare(
    args: &StoreArgs,
    sources: &SourceArgs,
) -> Result<(Arc<dyn PokemonStore>, TypeSchema, reqwest::Client)> {
    let store = open_store(args).await?;

    if args.keep_data {
        info!("Keeping existing pokemon records");
    } else {
        store
            .reset()
            .await
            .context("Failed to reset pokemon collection")?;
        info!("Dropped pokemon collection");
    }

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let schema = fetch_type_schema(&client, &sources.types_url)
        .await
        .context("Failed to load type schema")?;

    Ok((store, schema, client))
}

async fn seed(
    store: &dyn PokemonStore,
    schema: &TypeSchema,
    client: &reqwest::Client,
    sources: &SourceArgs,
) -> Result<SeedReport> {
    let raw = fetch_pokedex(client, &sources.pokedex_url)
        .await
        .context("Failed to download pokedex")?;

    populate(store, schema, raw)
        .await
        .context("Failed to populate pokemon collection")
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let (store, schema, client) = prepare(&args.store, &args.sources).await?;

    if args.no_seed {
        info!("Skipping pokedex population");
    } else {
        seed(store.as_ref(), &schema, &client, &args.sources).await?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout),
    };

    // Blocks until shutdown
    run_server(AppState::new(store, schema), config)
        .await
        .context("Server error")?;

    Ok(())
}

/// Reset and populate the collection, then exit
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let (store, schema, client) = prepare(&args.store, &args.sources).await?;
    let report = seed(store.as_ref(), &schema, &client, &args.sources).await?;

    println!(
        "Seeded {} pokemon ({} fetched, {} rejected, {} duplicate ids)",
        report.inserted, report.fetched, report.rejected, report.duplicates
    );
    Ok(())
}
