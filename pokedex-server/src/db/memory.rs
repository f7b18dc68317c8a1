//! In-process pokemon store
//!
//! Backs `--in-memory` serve mode and the router tests. A `BTreeMap` keeps
//! records in id order, which gives list ordering for free.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{PokemonStore, StoreError};
use crate::models::{ListParams, Pokemon, PokemonId};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<PokemonId, Pokemon>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with `pokemons`; later duplicates win.
    pub fn with_records(pokemons: impl IntoIterator<Item = Pokemon>) -> Self {
        let records = pokemons.into_iter().map(|p| (p.id, p)).collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl PokemonStore for MemoryStore {
    async fn reset(&self) -> Result<(), StoreError> {
        self.records.write().await.clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Pokemon>, StoreError> {
        let records = self.records.read().await;
        let limit = params.count.map(to_usize).unwrap_or(usize::MAX);

        Ok(records
            .values()
            .skip(to_usize(params.after))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn insert(&self, pokemon: &Pokemon) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&pokemon.id) {
            return Err(StoreError::Duplicate { id: pokemon.id });
        }
        records.insert(pokemon.id, pokemon.clone());
        Ok(())
    }

    async fn insert_many(&self, pokemons: &[Pokemon]) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let mut inserted = 0;
        for p in pokemons {
            if !records.contains_key(&p.id) {
                records.insert(p.id, p.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn replace(
        &self,
        id: PokemonId,
        pokemon: &Pokemon,
    ) -> Result<Option<Pokemon>, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Ok(None);
        }
        if pokemon.id != id && records.contains_key(&pokemon.id) {
            return Err(StoreError::Duplicate { id: pokemon.id });
        }

        records.remove(&id);
        records.insert(pokemon.id, pokemon.clone());
        Ok(Some(pokemon.clone()))
    }

    async fn remove(&self, id: PokemonId) -> Result<Option<Pokemon>, StoreError> {
        Ok(self.records.write().await.remove(&id))
    }
}
