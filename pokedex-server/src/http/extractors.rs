//! Custom Axum extractors
//!
//! Each one turns its rejection into an [`ApiError`] so malformed input gets
//! the same JSON error shape as handler failures.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{ListParams, ListQuery, PokemonId};

/// Extract and parse a pokemon id from path
pub struct PokemonPath(pub PokemonId);

impl<S> FromRequestParts<S> for PokemonPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId { raw: String::new() })?;

        let id = raw
            .trim()
            .parse::<PokemonId>()
            .map_err(|_| ApiError::InvalidId { raw })?;

        Ok(Self(id))
    }
}

/// Extract `count`/`after` list parameters
pub struct ListQueryParams(pub ListParams);

impl<S> FromRequestParts<S> for ListQueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query): Query<ListQuery> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidListQuery)?;

        Ok(Self(ListParams::parse(&query)?))
    }
}

/// JSON request body, left as a raw document for the model to decode
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
