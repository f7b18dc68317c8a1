//! Database layer - connection pool and pokemon stores
//!
//! Handlers talk to a [`PokemonStore`]; the Postgres store keeps each record
//! as a JSONB document keyed by its pokedex id.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgPokemonStore;
pub use store::{PokemonStore, StoreError};
