//! Pokemon endpoints
//!
//! Each handler is a single store call plus schema validation on writes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ListQueryParams, PokemonPath};
use crate::models::Pokemon;
use crate::state::AppState;

/// Write acknowledgement, optionally carrying the stored record
#[derive(Debug, Serialize)]
pub struct PokemonResponse {
    pub msg: &'static str,
    #[serde(rename = "pokeInfo", skip_serializing_if = "Option::is_none")]
    pub poke_info: Option<Pokemon>,
}

impl PokemonResponse {
    fn with_record(msg: &'static str, pokemon: Pokemon) -> Self {
        Self {
            msg,
            poke_info: Some(pokemon),
        }
    }

    fn message(msg: &'static str) -> Self {
        Self {
            msg,
            poke_info: None,
        }
    }
}

/// GET /api/v1/pokemons?count=&after=
async fn list_pokemons(
    State(state): State<AppState>,
    ListQueryParams(params): ListQueryParams,
) -> Result<Json<Vec<Pokemon>>, ApiError> {
    tracing::debug!(after = params.after, count = ?params.count, "Listing pokemons");
    let pokemons = state.store().list(params).await?;
    Ok(Json(pokemons))
}

/// GET /api/v1/pokemon/{id}
///
/// Responds with a one-element array.
async fn get_pokemon(
    State(state): State<AppState>,
    PokemonPath(id): PokemonPath,
) -> Result<Json<Vec<Pokemon>>, ApiError> {
    let pokemon = state
        .store()
        .get(id)
        .await?
        .ok_or(ApiError::NotFound { id })?;

    Ok(Json(vec![pokemon]))
}

/// POST /api/v1/pokemon/
async fn create_pokemon(
    State(state): State<AppState>,
    JsonBody(doc): JsonBody,
) -> Result<(StatusCode, Json<PokemonResponse>), ApiError> {
    let pokemon = state.schema().check(Pokemon::from_document(doc)?)?;
    state.store().insert(&pokemon).await?;

    tracing::info!(id = pokemon.id, "Pokemon added");
    Ok((
        StatusCode::CREATED,
        Json(PokemonResponse::with_record("Added Successfully", pokemon)),
    ))
}

/// PUT /api/v1/pokemon/{id} - replace the whole document
async fn replace_pokemon(
    State(state): State<AppState>,
    PokemonPath(id): PokemonPath,
    JsonBody(doc): JsonBody,
) -> Result<Json<PokemonResponse>, ApiError> {
    let pokemon = state.schema().check(Pokemon::replacement(doc, id)?)?;
    let stored = state
        .store()
        .replace(id, &pokemon)
        .await?
        .ok_or(ApiError::NotFound { id })?;

    tracing::info!(id, new_id = stored.id, "Pokemon replaced");
    Ok(Json(PokemonResponse::with_record("Updated Successfully", stored)))
}

/// PATCH /api/v1/pokemon/{id} - overwrite the given top-level fields
async fn patch_pokemon(
    State(state): State<AppState>,
    PokemonPath(id): PokemonPath,
    JsonBody(patch): JsonBody,
) -> Result<Json<PokemonResponse>, ApiError> {
    let current = state
        .store()
        .get(id)
        .await?
        .ok_or(ApiError::NotFound { id })?;

    let pokemon = state.schema().check(current.patched(patch)?)?;
    // Not atomic: a concurrent delete between get and replace reads as 404
    let stored = state
        .store()
        .replace(id, &pokemon)
        .await?
        .ok_or(ApiError::NotFound { id })?;

    tracing::info!(id, "Pokemon patched");
    Ok(Json(PokemonResponse::with_record("Updated Successfully", stored)))
}

/// DELETE /api/v1/pokemon/{id}
async fn delete_pokemon(
    State(state): State<AppState>,
    PokemonPath(id): PokemonPath,
) -> Result<Json<PokemonResponse>, ApiError> {
    state
        .store()
        .remove(id)
        .await?
        .ok_or(ApiError::NotFound { id })?;

    tracing::info!(id, "Pokemon deleted");
    Ok(Json(PokemonResponse::message("Deleted Successfully")))
}

/// Pokemon routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/pokemons", get(list_pokemons))
        .route("/api/v1/pokemon", post(create_pokemon))
        .route("/api/v1/pokemon/", post(create_pokemon))
        .route(
            "/api/v1/pokemon/{id}",
            get(get_pokemon)
                .put(replace_pokemon)
                .patch(patch_pokemon)
                .delete(delete_pokemon),
        )
}
