//! Retrieval endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use seedbed_core::{retrieve, DbConfig, Record, RetrieveError};

use crate::error::ApiError;
use crate::AppState;

/// GET /result - all sixty records, ascending by id.
async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let config = DbConfig::from_env().map_err(RetrieveError::from)?;
    let records = retrieve(&config, state.retrieve_timeout).await?;

    Ok(Json(records))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/result", get(list_records))
}
