//! Concurrent retriever: three per-table fetches under one deadline.
//!
//! Fetching is abstracted behind the [`TableSource`] trait so the merge,
//! timeout and cancellation behavior is testable without a database. The
//! production source opens one connection per table fetch; connections are
//! never shared between concurrent fetches.
//!
//! The deadline applies to the whole batch, not per fetch. A timeout is
//! all-or-nothing: completed partial results are discarded. When the
//! deadline fires or a sibling fetch fails, the remaining fetch futures
//! are dropped, which closes any connection they hold; release does not
//! depend on the cancelled path running its own cleanup.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::config::DbConfig;
use crate::connect::{close, connect};
use crate::dataset::{Record, TableId};
use crate::error::RetrieveError;

/// Default overall deadline for one retrieval batch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// A source of rows for a single table.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError>;
}

/// Production source: one short-lived connection per table fetch.
pub struct PgTableSource<'a> {
    config: &'a DbConfig,
}

impl<'a> PgTableSource<'a> {
    pub fn new(config: &'a DbConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TableSource for PgTableSource<'_> {
    async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError> {
        let mut conn = connect(self.config).await?;

        let select = format!("SELECT id, name FROM {}", table.table_name());
        let fetched = sqlx::query_as::<_, Record>(&select)
            .fetch_all(&mut conn)
            .await;

        close(conn).await;
        fetched.map_err(|source| RetrieveError::Fetch { table, source })
    }
}

/// Fetch all three tables concurrently and merge into one ascending-by-id
/// sequence.
///
/// Fails with the `timeout` category if the deadline elapses first, or
/// with the originating fetch error if any fetch fails before it.
pub async fn retrieve_all(
    source: &dyn TableSource,
    timeout: Duration,
) -> Result<Vec<Record>, RetrieveError> {
    let fetches = try_join_all(TableId::ALL.into_iter().map(|table| source.fetch(table)));

    let per_table = match tokio::time::timeout(timeout, fetches).await {
        Ok(joined) => joined?,
        Err(_) => return Err(RetrieveError::Timeout { timeout }),
    };

    let mut records: Vec<Record> = per_table.into_iter().flatten().collect();
    // Stable sort: ids are unique by construction, but if that invariant
    // is ever violated, equal ids keep their per-table arrival order.
    records.sort_by_key(|record| record.id);

    tracing::debug!(count = records.len(), "retrieval batch merged");
    Ok(records)
}

/// Retrieve against the configured database.
pub async fn retrieve(config: &DbConfig, timeout: Duration) -> Result<Vec<Record>, RetrieveError> {
    retrieve_all(&PgTableSource::new(config), timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::seed_name;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Returns exactly the rows provisioning would have written.
    struct SeededSource;

    #[async_trait]
    impl TableSource for SeededSource {
        async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError> {
            Ok(table
                .seed_ids()
                .map(|id| Record {
                    id,
                    name: seed_name(id),
                })
                .collect())
        }
    }

    /// Flags when a fetch future is dropped, completed or not.
    struct ReleaseGuard(Arc<AtomicBool>);

    impl Drop for ReleaseGuard {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    fn io_error() -> sqlx::Error {
        sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
    }

    #[tokio::test]
    async fn merges_all_tables_ascending_by_id() {
        let records = retrieve_all(&SeededSource, DEFAULT_TIMEOUT).await.unwrap();

        assert_eq!(records.len(), 60);
        let ids: Vec<i32> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, (1..=60).collect::<Vec<i32>>());
        assert_eq!(records[24].name, "Test 25");
    }

    /// One table never answers; the others are instant.
    struct StalledTable {
        stalled: TableId,
        released: Arc<AtomicBool>,
    }

    #[async_trait]
    impl TableSource for StalledTable {
        async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError> {
            if table == self.stalled {
                let _guard = ReleaseGuard(self.released.clone());
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(table
                .seed_ids()
                .map(|id| Record {
                    id,
                    name: seed_name(id),
                })
                .collect())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_covers_the_whole_batch_and_discards_partials() {
        let released = Arc::new(AtomicBool::new(false));
        let source = StalledTable {
            stalled: TableId::Two,
            released: released.clone(),
        };

        let err = retrieve_all(&source, Duration::from_millis(2000))
            .await
            .unwrap_err();

        // Tables one and three completed, but a timeout returns nothing.
        assert_eq!(err.category(), "timeout");
        assert!(
            released.load(Ordering::SeqCst),
            "cancelled fetch must be dropped, not left in flight"
        );
    }

    /// One table fails immediately; the others hang.
    struct FailingTable {
        failing: TableId,
        released: Arc<AtomicBool>,
    }

    #[async_trait]
    impl TableSource for FailingTable {
        async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError> {
            if table == self.failing {
                return Err(RetrieveError::Fetch {
                    table,
                    source: io_error(),
                });
            }
            let _guard = ReleaseGuard(self.released.clone());
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failing_fetch_fails_the_batch_and_cancels_siblings() {
        let released = Arc::new(AtomicBool::new(false));
        let source = FailingTable {
            failing: TableId::Three,
            released: released.clone(),
        };

        let err = retrieve_all(&source, Duration::from_secs(60))
            .await
            .unwrap_err();

        assert_eq!(err.category(), "retrieval");
        assert!(
            released.load(Ordering::SeqCst),
            "sibling fetches must be cancelled on failure"
        );
    }

    /// Rows arrive unsorted within a table.
    struct UnsortedSource;

    #[async_trait]
    impl TableSource for UnsortedSource {
        async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError> {
            let mut rows: Vec<Record> = table
                .seed_ids()
                .map(|id| Record {
                    id,
                    name: seed_name(id),
                })
                .collect();
            rows.reverse();
            Ok(rows)
        }
    }

    #[tokio::test]
    async fn merge_sorts_rows_the_source_returned_unsorted() {
        let records = retrieve_all(&UnsortedSource, DEFAULT_TIMEOUT).await.unwrap();
        let ids: Vec<i32> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, (1..=60).collect::<Vec<i32>>());
    }

    /// Every table claims the same id, violating the disjointness invariant.
    struct DuplicateIdSource;

    #[async_trait]
    impl TableSource for DuplicateIdSource {
        async fn fetch(&self, table: TableId) -> Result<Vec<Record>, RetrieveError> {
            Ok(vec![Record {
                id: 7,
                name: table.table_name().to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn equal_ids_keep_a_stable_order() {
        let records = retrieve_all(&DuplicateIdSource, DEFAULT_TIMEOUT)
            .await
            .unwrap();

        let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(names, ["data_1", "data_2", "data_3"]);
    }
}
