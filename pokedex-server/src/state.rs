//! Application state shared across handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::db::PokemonStore;
use crate::models::TypeSchema;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn PokemonStore>,
    schema: TypeSchema,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn PokemonStore>, schema: TypeSchema) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                schema,
                started_at: Utc::now(),
            }),
        }
    }

    pub fn store(&self) -> &dyn PokemonStore {
        self.inner.store.as_ref()
    }

    /// Validators applied to every written document
    pub fn schema(&self) -> &TypeSchema {
        &self.inner.schema
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }
}
