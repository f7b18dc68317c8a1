//! Startup seeding: type schema loading and collection population
//!
//! Runs once before the server starts listening:
//! 1. fetch the type list and build the [`TypeSchema`](crate::models::TypeSchema)
//! 2. fetch the pokedex and bulk-insert every record that passes the schema

pub mod populate;
pub mod types;

pub use populate::{fetch_pokedex, populate, SeedReport, DEFAULT_POKEDEX_URL};
pub use types::{build_schema, fetch_type_schema, TypeRecord, DEFAULT_TYPES_URL};

use crate::db::StoreError;

/// Where the seed data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSources {
    pub types_url: String,
    pub pokedex_url: String,
}

impl Default for SeedSources {
    fn default() -> Self {
        Self {
            types_url: DEFAULT_TYPES_URL.to_string(),
            pokedex_url: DEFAULT_POKEDEX_URL.to_string(),
        }
    }
}

/// Seeding error type
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("type source {url} returned no types")]
    EmptySchema { url: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SeedError {
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.to_owned(),
            source,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_point_at_dataset() {
        let sources = SeedSources::default();
        assert!(sources.types_url.ends_with("types.json"));
        assert!(sources.pokedex_url.ends_with("pokedex.json"));
    }

    #[test]
    fn empty_schema_display() {
        let err = SeedError::EmptySchema {
            url: "http://localhost/types.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "type source http://localhost/types.json returned no types"
        );
    }
}
