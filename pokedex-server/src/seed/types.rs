//! Type schema loader

use serde::Deserialize;

use super::SeedError;
use crate::models::TypeSchema;

pub const DEFAULT_TYPES_URL: &str =
    "https://raw.githubusercontent.com/fanzeyi/pokemon.json/master/types.json";

/// One entry of the type reference list
#[derive(Debug, Clone, Deserialize)]
pub struct TypeRecord {
    pub english: String,
    #[serde(default)]
    pub chinese: Option<String>,
    #[serde(default)]
    pub japanese: Option<String>,
}

/// Build the schema from type records, keyed by English name.
pub fn build_schema(records: &[TypeRecord], source: &str) -> Result<TypeSchema, SeedError> {
    let schema = TypeSchema::new(
        records
            .iter()
            .map(|r| r.english.trim())
            .filter(|name| !name.is_empty()),
    );

    if schema.is_empty() {
        return Err(SeedError::EmptySchema {
            url: source.to_owned(),
        });
    }
    Ok(schema)
}

/// Download the type list from `url` and build the record schema.
pub async fn fetch_type_schema(
    client: &reqwest::Client,
    url: &str,
) -> Result<TypeSchema, SeedError> {
    tracing::info!(url, "Fetching pokemon types");

    let records: Vec<TypeRecord> = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SeedError::fetch(url, e))?
        .json()
        .await
        .map_err(|e| SeedError::fetch(url, e))?;

    let schema = build_schema(&records, url)?;
    tracing::info!(types = schema.len(), "Type schema loaded");
    Ok(schema)
}
