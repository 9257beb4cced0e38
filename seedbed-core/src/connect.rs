//! Resource acquirer: one short-lived connection per logical operation.
//!
//! No pool. Each top-level operation opens a single `PgConnection` and is
//! responsible for releasing it on every exit path: `close()` where the
//! code path completes, drop (which closes the socket) where it is
//! cancelled or unwinds early.

use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgConnection};

use crate::config::{DbConfig, DB_NAME, DB_USER};
use crate::error::AcquireError;

/// Open a single connection to the configured database.
///
/// A single attempt, no retries; whether to retry is the caller's call.
/// Any driver failure (network, auth, protocol) is wrapped as a
/// `connection` error with the original cause preserved.
pub async fn connect(config: &DbConfig) -> Result<PgConnection, AcquireError> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(DB_USER)
        .password(&config.password)
        .database(DB_NAME);

    Box::pin(options.connect())
        .await
        .map_err(|source| AcquireError::Connect {
            host: config.host.clone(),
            port: config.port,
            source,
        })
}

/// Close a connection, downgrading a failed close to a warning.
///
/// Used on paths where the operation itself already has an outcome; a
/// close failure must not overwrite it.
pub async fn close(conn: PgConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!("failed to close database connection: {err}");
    }
}
