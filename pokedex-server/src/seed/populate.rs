//! Collection population from the pokedex dataset

use serde_json::Value;

use super::SeedError;
use crate::db::PokemonStore;
use crate::models::{Pokemon, TypeSchema};

pub const DEFAULT_POKEDEX_URL: &str =
    "https://raw.githubusercontent.com/fanzeyi/pokemon.json/master/pokedex.json";

/// Outcome of a population run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Raw records received
    pub fetched: usize,
    /// Records written to the store
    pub inserted: u64,
    /// Records that failed decoding or schema validation
    pub rejected: usize,
    /// Valid records skipped because their id was already stored
    pub duplicates: u64,
}

/// Download the raw pokedex as a JSON array.
pub async fn fetch_pokedex(client: &reqwest::Client, url: &str) -> Result<Vec<Value>, SeedError> {
    tracing::info!(url, "Fetching pokedex");

    client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SeedError::fetch(url, e))?
        .json()
        .await
        .map_err(|e| SeedError::fetch(url, e))
}

/// Validate raw records against `schema` and bulk-insert the valid ones.
///
/// Invalid records are logged and skipped; they never abort the run.
pub async fn populate(
    store: &dyn PokemonStore,
    schema: &TypeSchema,
    raw: Vec<Value>,
) -> Result<SeedReport, SeedError> {
    let fetched = raw.len();
    let mut valid = Vec::with_capacity(fetched);
    let mut rejected = 0;

    for (index, doc) in raw.into_iter().enumerate() {
        match Pokemon::from_document(doc).and_then(|p| schema.check(p)) {
            Ok(p) => valid.push(p),
            Err(e) => {
                rejected += 1;
                tracing::warn!(index, error = %e, "Skipping invalid pokedex record");
            }
        }
    }

    let inserted = store.insert_many(&valid).await?;
    let report = SeedReport {
        fetched,
        inserted,
        rejected,
        duplicates: valid.len() as u64 - inserted,
    };

    tracing::info!(
        fetched = report.fetched,
        inserted = report.inserted,
        rejected = report.rejected,
        duplicates = report.duplicates,
        "Pokedex populated"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::ListParams;
    use crate::seed::fixture_server;
    use axum::http::StatusCode;
    use serde_json::json;

    fn schema() -> TypeSchema {
        TypeSchema::new(["Grass", "Poison", "Fire"])
    }

    #[tokio::test]
    async fn inserts_valid_records() {
        let store = MemoryStore::new();
        let raw = vec![
            json!({"id": 4, "name": {"english": "Charmander"}, "type": ["Fire"]}),
            json!({"id": 1, "name": {"english": "Bulbasaur"}, "type": ["Grass", "Poison"]}),
        ];

        let report = populate(&store, &schema(), raw).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                fetched: 2,
                inserted: 2,
                rejected: 0,
                duplicates: 0
            }
        );

        let all = store.list(ListParams { after: 0, count: None }).await.unwrap();
        assert_eq!(all[0].english_name(), Some("Bulbasaur"));
        assert_eq!(all[1].english_name(), Some("Charmander"));
    }

    #[tokio::test]
    async fn skips_invalid_and_duplicate_records() {
        let store = MemoryStore::new();
        let raw = vec![
            json!({"id": 1, "type": ["Grass"]}),
            json!({"id": 2, "type": ["Shadow"]}),
            json!({"type": ["Fire"]}),
            json!("not an object"),
            json!({"id": 1, "type": ["Poison"]}),
        ];

        let report = populate(&store, &schema(), raw).await.unwrap();
        assert_eq!(report.fetched, 5);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.rejected, 3);
        assert_eq!(report.duplicates, 1);

        // first occurrence wins
        let first = store.get(1).await.unwrap().unwrap();
        assert_eq!(first.types, vec!["Grass"]);
    }

    #[tokio::test]
    async fn empty_dataset_is_fine() {
        let store = MemoryStore::new();
        let report = populate(&store, &schema(), Vec::new()).await.unwrap();
        assert_eq!(report, SeedReport::default());
    }

    #[tokio::test]
    async fn fetches_pokedex_over_http() {
        let body = r#"[{"id": 1, "type": ["Grass"]}, {"id": 4, "type": ["Fire"]}]"#;
        let url = fixture_server::serve(StatusCode::OK, body).await;

        let raw = fetch_pokedex(&reqwest::Client::new(), &url).await.unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1]["id"], 4);
    }

    #[tokio::test]
    async fn pokedex_server_error_is_fetch_error() {
        let url = fixture_server::serve(StatusCode::INTERNAL_SERVER_ERROR, "down").await;
        let err = fetch_pokedex(&reqwest::Client::new(), &url).await.unwrap_err();

        assert!(matches!(err, SeedError::Fetch { .. }));
    }

    #[tokio::test]
    async fn pokedex_non_array_is_fetch_error() {
        let url = fixture_server::serve(StatusCode::OK, r#"{"id": 1}"#).await;
        let err = fetch_pokedex(&reqwest::Client::new(), &url).await.unwrap_err();

        assert!(matches!(err, SeedError::Fetch { .. }));
    }
}
