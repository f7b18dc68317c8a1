//! Domain models with validation at construction
//!
//! Request bodies are decoded into these types and checked against the
//! [`TypeSchema`] before they reach the store.

pub mod listing;
pub mod pokemon;
pub mod schema;
pub mod validation;

pub use listing::{InvalidListQuery, ListParams, ListQuery, DEFAULT_COUNT};
pub use pokemon::{BaseStats, Pokemon, PokemonId, PokemonName};
pub use schema::{TypeSchema, MAX_ENGLISH_NAME_LEN};
pub use validation::ValidationError;
