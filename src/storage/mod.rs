//! Storage module for persisting crawl data
//!
//! This module handles every persistent record class of the crawler:
//! - Frontier queue entries
//! - Visited URLs
//! - Per-domain crawl health counters
//! - Movies and their metadata
//! - Reviews
//! - Outgoing link records
//!
//! Two backends implement the [`Storage`] trait: [`SqliteStorage`] for the
//! shared on-disk store and [`MemoryStorage`] for tests and single-process use.

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A URL waiting in the frontier queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,

    /// Priority value (lower is dequeued first)
    pub priority: i64,
}

/// Outgoing links recorded for one source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The source URL
    pub key: String,

    /// URLs linked from the source page, as recorded
    pub links: Vec<String>,
}

/// The record classes held by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    Movies,
    Reviews,
    Frontier,
    Visited,
    LinkRecords,
    DomainHealth,
}

impl RecordClass {
    /// Every record class, in reset order
    pub const ALL: [RecordClass; 6] = [
        Self::Movies,
        Self::Reviews,
        Self::Frontier,
        Self::Visited,
        Self::LinkRecords,
        Self::DomainHealth,
    ];

    /// Name of the table backing this class
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Reviews => "reviews",
            Self::Frontier => "frontier",
            Self::Visited => "visited",
            Self::LinkRecords => "link_records",
            Self::DomainHealth => "domain_health",
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Clears every record class
///
/// Classes are cleared one after another; a concurrent writer may observe
/// some classes already empty while others still hold data.
pub fn reset_all(storage: &dyn Storage) -> StorageResult<()> {
    for class in RecordClass::ALL {
        storage.clear(class)?;
        tracing::debug!("Cleared {}", class);
    }
    tracing::info!("Store reset: all record classes cleared");
    Ok(())
}
