//! Dataset layout: three tables with fixed, disjoint id ranges.
//!
//! Table 1 owns ids 1-10 and 31-40, table 2 owns 11-20 and 41-50,
//! table 3 owns 21-30 and 51-60. Together they cover 1-60 exactly once,
//! which is what lets the retriever merge without a tie-break policy.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// One of the three provisioned tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    One,
    Two,
    Three,
}

impl TableId {
    /// All tables in provisioning order.
    pub const ALL: [TableId; 3] = [TableId::One, TableId::Two, TableId::Three];

    /// 1-based table index.
    pub fn index(self) -> u8 {
        match self {
            TableId::One => 1,
            TableId::Two => 2,
            TableId::Three => 3,
        }
    }

    /// SQL name of the table.
    pub fn table_name(self) -> &'static str {
        match self {
            TableId::One => "data_1",
            TableId::Two => "data_2",
            TableId::Three => "data_3",
        }
    }

    /// The two id ranges seeded into this table.
    pub fn ranges(self) -> [RangeInclusive<i32>; 2] {
        match self {
            TableId::One => [1..=10, 31..=40],
            TableId::Two => [11..=20, 41..=50],
            TableId::Three => [21..=30, 51..=60],
        }
    }

    /// Ids seeded into this table, first range fully before the second,
    /// ascending within each range.
    pub fn seed_ids(self) -> impl Iterator<Item = i32> {
        self.ranges().into_iter().flatten()
    }

    /// The table that owns the given id, if any.
    pub fn owner_of(id: i32) -> Option<TableId> {
        TableId::ALL
            .into_iter()
            .find(|table| table.ranges().iter().any(|range| range.contains(&id)))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A single (id, name) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i32,
    pub name: String,
}

/// Seed name for an id, e.g. `Test 25` for id 25.
pub fn seed_name(id: i32) -> String {
    format!("Test {id}")
}
