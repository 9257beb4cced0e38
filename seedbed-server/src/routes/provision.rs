//! Provisioning endpoint.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use seedbed_core::{provision, DbConfig, ProvisionError};

use crate::error::ApiError;
use crate::AppState;

/// GET / - drop, recreate and seed the three data tables.
fn provision_tables() -> Pin<Box<dyn Future<Output = Result<Html<&'static str>, ApiError>> + Send>>
{
    Box::pin(async move {
        // Configuration is read per operation, not cached at startup.
        let config = DbConfig::from_env().map_err(ProvisionError::from)?;
        provision(&config).await?;

        Ok(Html("<p>Tables are created and populated!</p>"))
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(provision_tables))
}
