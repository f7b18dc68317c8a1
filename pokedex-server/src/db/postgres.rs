//! Postgres-backed pokemon store
//!
//! One table, `pokemons(id BIGINT PRIMARY KEY, doc JSONB NOT NULL)`. The
//! primary key enforces id uniqueness; conflicts surface as
//! [`StoreError::Duplicate`].

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::store::{PokemonStore, StoreError};
use crate::models::{ListParams, Pokemon, PokemonId};

/// Rows per bulk INSERT statement (two bind parameters each)
const INSERT_CHUNK: usize = 1000;

/// Pokemon store over a Postgres pool
#[derive(Debug, Clone)]
pub struct PgPokemonStore {
    pool: PgPool,
}

impl PgPokemonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map unique violations on `id` to [`StoreError::Duplicate`].
fn conflict_on(id: PokemonId) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate { id },
        _ => StoreError::Sqlx(e),
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl PokemonStore for PgPokemonStore {
    async fn reset(&self) -> Result<(), StoreError> {
        tracing::warn!("Dropping pokemon collection");

        sqlx::query("DROP TABLE IF EXISTS pokemons")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE pokemons (
                id BIGINT PRIMARY KEY,
                doc JSONB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pokemons")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Pokemon>, StoreError> {
        // LIMIT NULL is LIMIT ALL
        let rows: Vec<(Json<Pokemon>,)> = sqlx::query_as(
            r#"
            SELECT doc FROM pokemons
            ORDER BY id ASC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(to_i64(params.after))
        .bind(params.count.map(to_i64))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(Json(p),)| p).collect())
    }

    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, StoreError> {
        let row: Option<(Json<Pokemon>,)> = sqlx::query_as("SELECT doc FROM pokemons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(Json(p),)| p))
    }

    async fn insert(&self, pokemon: &Pokemon) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO pokemons (id, doc) VALUES ($1, $2)")
            .bind(pokemon.id)
            .bind(Json(pokemon))
            .execute(&self.pool)
            .await
            .map_err(conflict_on(pokemon.id))?;

        Ok(())
    }

    async fn insert_many(&self, pokemons: &[Pokemon]) -> Result<u64, StoreError> {
        let mut inserted = 0;

        for chunk in pokemons.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO pokemons (id, doc) ");
            builder.push_values(chunk, |mut row, p| {
                row.push_bind(p.id).push_bind(Json(p.clone()));
            });
            builder.push(" ON CONFLICT (id) DO NOTHING");

            let result = builder.build().execute(&self.pool).await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    async fn replace(
        &self,
        id: PokemonId,
        pokemon: &Pokemon,
    ) -> Result<Option<Pokemon>, StoreError> {
        let row: Option<(Json<Pokemon>,)> = sqlx::query_as(
            r#"
            UPDATE pokemons SET id = $2, doc = $3
            WHERE id = $1
            RETURNING doc
            "#,
        )
        .bind(id)
        .bind(pokemon.id)
        .bind(Json(pokemon))
        .fetch_optional(&self.pool)
        .await
        .map_err(conflict_on(pokemon.id))?;

        Ok(row.map(|(Json(p),)| p))
    }

    async fn remove(&self, id: PokemonId) -> Result<Option<Pokemon>, StoreError> {
        let row: Option<(Json<Pokemon>,)> =
            sqlx::query_as("DELETE FROM pokemons WHERE id = $1 RETURNING doc")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(Json(p),)| p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    // Run with: DATABASE_URL=postgres://... cargo test -p pokedex-server -- --ignored

    fn pokemon(id: PokemonId) -> Pokemon {
        Pokemon {
            id,
            name: None,
            types: vec!["Fire".into()],
            base: None,
        }
    }

    async fn store() -> PgPokemonStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        let store = PgPokemonStore::new(pool);
        store.reset().await.expect("reset failed");
        store
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn crud_round_trip() {
        let store = store().await;

        store.insert(&pokemon(4)).await.unwrap();
        assert_eq!(store.get(4).await.unwrap(), Some(pokemon(4)));

        let err = store.insert(&pokemon(4)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { id: 4 }));

        let replaced = store.replace(4, &pokemon(5)).await.unwrap();
        assert_eq!(replaced, Some(pokemon(5)));
        assert_eq!(store.get(4).await.unwrap(), None);

        assert_eq!(store.remove(5).await.unwrap(), Some(pokemon(5)));
        assert_eq!(store.remove(5).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_sorts_and_pages() {
        let store = store().await;
        let inserted = store
            .insert_many(&[pokemon(3), pokemon(1), pokemon(2), pokemon(1)])
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let page = store
            .list(ListParams { after: 1, count: Some(1) })
            .await
            .unwrap();
        assert_eq!(page, vec![pokemon(2)]);

        let all = store.list(ListParams { after: 0, count: None }).await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
