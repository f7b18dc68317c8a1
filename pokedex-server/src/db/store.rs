//! Storage seam between HTTP handlers and the database

use async_trait::async_trait;

use crate::models::{ListParams, Pokemon, PokemonId};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("pokemon {id} already exists")]
    Duplicate { id: PokemonId },
}

/// A collection of pokemon documents keyed by id
#[async_trait]
pub trait PokemonStore: Send + Sync {
    /// Drop every record and recreate the empty collection.
    async fn reset(&self) -> Result<(), StoreError>;

    /// Number of stored records.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Records sorted by id ascending, after skip/limit.
    async fn list(&self, params: ListParams) -> Result<Vec<Pokemon>, StoreError>;

    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, StoreError>;

    /// Insert a new record; an existing id is [`StoreError::Duplicate`].
    async fn insert(&self, pokemon: &Pokemon) -> Result<(), StoreError>;

    /// Bulk insert, skipping ids that already exist. Returns the number inserted.
    async fn insert_many(&self, pokemons: &[Pokemon]) -> Result<u64, StoreError>;

    /// Overwrite the document stored under `id`.
    ///
    /// The replacement may carry a different id, which becomes its new key.
    /// Returns `None` when nothing is stored under `id`.
    async fn replace(&self, id: PokemonId, pokemon: &Pokemon)
        -> Result<Option<Pokemon>, StoreError>;

    /// Delete and return the record stored under `id`.
    async fn remove(&self, id: PokemonId) -> Result<Option<Pokemon>, StoreError>;
}
