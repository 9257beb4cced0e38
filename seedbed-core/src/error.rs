//! Structured error types for seedbed-core.
//!
//! Uses `thiserror` for structured, composable errors. Every variant carries
//! a stable category tag so the HTTP boundary can classify a failure without
//! parsing its message, plus the underlying driver error as `source` where
//! one exists. The taxonomy is closed: `ProvisionError` covers the
//! drop/create/seed path, `RetrieveError` covers the read path, and
//! `AcquireError` is shared by both since both paths open connections.

use std::time::Duration;

use thiserror::Error;

use crate::dataset::TableId;

/// Failure to produce a usable database connection.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// A required connection parameter is missing or malformed.
    /// Raised before any network I/O is attempted.
    #[error("database configuration error: {reason}")]
    Config { reason: String },

    /// The single connection attempt failed (network, auth, protocol).
    #[error("cannot connect to the database at {host}:{port}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },
}

impl AcquireError {
    pub fn category(&self) -> &'static str {
        match self {
            AcquireError::Config { .. } => "configuration",
            AcquireError::Connect { .. } => "connection",
        }
    }
}

/// Failure along the provisioning path (drop, create, seed).
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    /// The drop batch failed; schema state is undefined afterwards.
    #[error("cannot delete the data tables")]
    DropTables {
        #[source]
        source: sqlx::Error,
    },

    /// The create batch failed; schema state is undefined afterwards.
    #[error("cannot create the data tables")]
    CreateTables {
        #[source]
        source: sqlx::Error,
    },

    /// A single insert failed; remaining inserts for that table were skipped.
    #[error("cannot insert row {id} into table {table}")]
    Insert {
        table: TableId,
        id: i32,
        #[source]
        source: sqlx::Error,
    },
}

impl ProvisionError {
    pub fn category(&self) -> &'static str {
        match self {
            ProvisionError::Acquire(e) => e.category(),
            ProvisionError::DropTables { .. } => "schema_drop",
            ProvisionError::CreateTables { .. } => "schema_create",
            ProvisionError::Insert { .. } => "population",
        }
    }
}

/// Failure along the read path.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    /// The overall deadline elapsed before all fetches completed.
    /// Partial results are discarded, never returned.
    #[error("retrieval timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    /// One table fetch failed before the deadline.
    #[error("cannot fetch rows from table {table}")]
    Fetch {
        table: TableId,
        #[source]
        source: sqlx::Error,
    },
}

impl RetrieveError {
    pub fn category(&self) -> &'static str {
        match self {
            RetrieveError::Acquire(e) => e.category(),
            RetrieveError::Timeout { .. } => "timeout",
            RetrieveError::Fetch { .. } => "retrieval",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn io_error() -> sqlx::Error {
        sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
    }

    #[test]
    fn categories_are_stable_tags() {
        let config = AcquireError::Config {
            reason: "POSTGRES_HOST is not set".into(),
        };
        assert_eq!(config.category(), "configuration");

        let connect = AcquireError::Connect {
            host: "localhost".into(),
            port: 5432,
            source: io_error(),
        };
        assert_eq!(connect.category(), "connection");

        assert_eq!(
            ProvisionError::DropTables { source: io_error() }.category(),
            "schema_drop"
        );
        assert_eq!(
            ProvisionError::CreateTables { source: io_error() }.category(),
            "schema_create"
        );
        assert_eq!(
            ProvisionError::Insert {
                table: TableId::Two,
                id: 41,
                source: io_error()
            }
            .category(),
            "population"
        );
        assert_eq!(
            RetrieveError::Timeout {
                timeout: Duration::from_millis(2000)
            }
            .category(),
            "timeout"
        );
        assert_eq!(
            RetrieveError::Fetch {
                table: TableId::One,
                source: io_error()
            }
            .category(),
            "retrieval"
        );
    }

    #[test]
    fn wrapped_errors_delegate_their_category() {
        let provision = ProvisionError::from(AcquireError::Config {
            reason: "POSTGRES_PORT is not set".into(),
        });
        assert_eq!(provision.category(), "configuration");

        let retrieve = RetrieveError::from(AcquireError::Connect {
            host: "db".into(),
            port: 5440,
            source: io_error(),
        });
        assert_eq!(retrieve.category(), "connection");
    }

    #[test]
    fn causes_are_preserved_not_swallowed() {
        let err = ProvisionError::Insert {
            table: TableId::Three,
            id: 51,
            source: io_error(),
        };
        assert_eq!(err.to_string(), "cannot insert row 51 into table data_3");
        assert!(err.source().is_some());
    }

    #[test]
    fn timeout_message_names_the_deadline() {
        let err = RetrieveError::Timeout {
            timeout: Duration::from_millis(2000),
        };
        assert_eq!(err.to_string(), "retrieval timed out after 2000ms");
    }
}
