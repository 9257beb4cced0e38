//! Connection configuration from environment variables.
//!
//! Three values are required: `POSTGRES_PASSWORD`, `POSTGRES_HOST` and
//! `POSTGRES_PORT`. Database name and user are fixed to `postgres`. The
//! values are read once per operation and passed explicitly into the
//! acquirer; there is no process-wide config singleton.

use std::env;

use crate::error::AcquireError;

/// Environment variable holding the database password.
pub const ENV_PASSWORD: &str = "POSTGRES_PASSWORD";
/// Environment variable holding the database host.
pub const ENV_HOST: &str = "POSTGRES_HOST";
/// Environment variable holding the database port.
pub const ENV_PORT: &str = "POSTGRES_PORT";

/// Fixed database user.
pub const DB_USER: &str = "postgres";
/// Fixed database name.
pub const DB_NAME: &str = "postgres";

/// Validated connection parameters.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    /// Read and validate the three required values from the environment.
    ///
    /// Fails with a `configuration` error before any network I/O if one
    /// is absent, empty, or (for the port) not a valid port number.
    pub fn from_env() -> Result<Self, AcquireError> {
        Self::from_values(
            env::var(ENV_PASSWORD).ok(),
            env::var(ENV_HOST).ok(),
            env::var(ENV_PORT).ok(),
        )
    }

    /// Validate explicit values. `from_env` is a thin wrapper around this.
    pub fn from_values(
        password: Option<String>,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<Self, AcquireError> {
        let password = require(ENV_PASSWORD, password)?;
        let host = require(ENV_HOST, host)?;
        let port = require(ENV_PORT, port)?;
        let port: u16 = port.parse().map_err(|_| AcquireError::Config {
            reason: format!("{ENV_PORT} is not a valid port number: {port:?}"),
        })?;

        Ok(Self {
            password,
            host,
            port,
        })
    }
}

fn require(name: &str, value: Option<String>) -> Result<String, AcquireError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AcquireError::Config {
            reason: format!("{name} is not set"),
        }),
    }
}
