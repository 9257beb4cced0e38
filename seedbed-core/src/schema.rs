//! Schema manager: idempotent drop-and-recreate of the three data tables.

use sqlx::PgConnection;

use crate::error::ProvisionError;

/// Drop batch, tolerant of the tables not existing yet.
const DROP_TABLES: &str = "DROP TABLE IF EXISTS data_1, data_2, data_3;";

/// Create batch, all three tables in one statement batch.
const CREATE_TABLES: &str = "\
    CREATE TABLE data_1 (
        id INT PRIMARY KEY,
        name VARCHAR(255)
    );
    CREATE TABLE data_2 (
        id INT PRIMARY KEY,
        name VARCHAR(255)
    );
    CREATE TABLE data_3 (
        id INT PRIMARY KEY,
        name VARCHAR(255)
    );";

/// Drop and recreate the three data tables.
///
/// Each call fully resets schema state, so repeated calls are safe. If
/// either batch fails the schema is left undefined and the error names
/// which batch failed; the caller should not trust the connection for
/// further schema assumptions.
pub async fn reset_schema(conn: &mut PgConnection) -> Result<(), ProvisionError> {
    Box::pin(sqlx::raw_sql(DROP_TABLES).execute(&mut *conn))
        .await
        .map_err(|source| ProvisionError::DropTables { source })?;

    Box::pin(sqlx::raw_sql(CREATE_TABLES).execute(&mut *conn))
        .await
        .map_err(|source| ProvisionError::CreateTables { source })?;

    tracing::debug!("data tables dropped and recreated");
    Ok(())
}
