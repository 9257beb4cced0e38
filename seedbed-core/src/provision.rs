//! Provisioning path: acquire, reset schema, seed, release.

use std::future::Future;
use std::pin::Pin;

use crate::config::DbConfig;
use crate::connect::{close, connect};
use crate::error::ProvisionError;
use crate::populate::populate_all;
use crate::schema::reset_schema;

/// Run the full provisioning cycle on one short-lived connection.
///
/// The connection is released on both outcomes before this returns; a
/// cancellation mid-cycle releases it by drop.
pub fn provision(
    config: &DbConfig,
) -> Pin<Box<dyn Future<Output = Result<(), ProvisionError>> + Send + '_>> {
    Box::pin(async move {
        let mut conn = connect(config).await?;

        let outcome = match Box::pin(reset_schema(&mut conn)).await {
            Ok(()) => Box::pin(populate_all(&mut conn)).await,
            Err(err) => Err(err),
        };

        close(conn).await;

        if outcome.is_ok() {
            tracing::info!("tables created and populated");
        }
        outcome
    })
}
