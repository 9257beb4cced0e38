//! seedbed-core: provisions a fixed three-table dataset in PostgreSQL and
//! reads it back as one ordered sequence.
//!
//! Two paths, each on its own short-lived connection:
//! - provisioning: acquire, drop/recreate the tables, seed them
//! - retrieval: fetch all three tables concurrently under one deadline,
//!   merge ascending by id
//!
//! Every failure is classified into a closed taxonomy (`error` module) so
//! callers can branch on a stable category tag instead of message text.

pub mod config;
pub mod connect;
pub mod dataset;
pub mod error;
pub mod populate;
pub mod provision;
pub mod retrieve;
pub mod schema;

pub use config::DbConfig;
pub use dataset::{seed_name, Record, TableId};
pub use error::{AcquireError, ProvisionError, RetrieveError};
pub use provision::provision;
pub use retrieve::{retrieve, retrieve_all, PgTableSource, TableSource, DEFAULT_TIMEOUT};
