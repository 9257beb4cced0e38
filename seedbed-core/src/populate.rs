//! Table populator: seeds each table from its two id ranges.
//!
//! Population is strictly sequential: table 1 fully before table 2 before
//! table 3, and within a table the first range fully before the second.
//! There is no transactional rollback; a failed insert aborts the rest of
//! that table's inserts and already-written rows stay.

use sqlx::PgConnection;

use crate::dataset::{seed_name, TableId};
use crate::error::ProvisionError;

/// Seed all three tables in order.
pub async fn populate_all(conn: &mut PgConnection) -> Result<(), ProvisionError> {
    for table in TableId::ALL {
        populate_table(conn, table).await?;
    }
    Ok(())
}

/// Seed one table with a row per id from its configured ranges.
///
/// On failure the error names the table and the offending id.
pub async fn populate_table(
    conn: &mut PgConnection,
    table: TableId,
) -> Result<(), ProvisionError> {
    let insert = format!(
        "INSERT INTO {} (id, name) VALUES ($1, $2)",
        table.table_name()
    );

    for id in table.seed_ids() {
        Box::pin(
            sqlx::query(&insert)
                .bind(id)
                .bind(seed_name(id))
                .execute(&mut *conn),
        )
        .await
        .map_err(|source| ProvisionError::Insert { table, id, source })?;
    }

    tracing::debug!(table = %table, "table populated");
    Ok(())
}
