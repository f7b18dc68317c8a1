//! pokedex-server: REST API over a seeded pokemon collection
//!
//! Startup drops and reseeds the collection from the pokedex dataset, then
//! serves list/get/create/replace/patch/delete under `/api/v1`.

pub mod db;
pub mod http;
pub mod models;
pub mod seed;
pub mod state;

pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
