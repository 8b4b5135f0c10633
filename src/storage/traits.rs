//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::catalog::Review;
use crate::state::DomainHealth;
use crate::storage::{FrontierEntry, LinkRecord, RecordClass};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// One backend instance is shared by every component of a worker, and
/// several workers may share the same underlying store. Implementations
/// must make `pop_frontier` and `increment_domain_health` atomic with
/// respect to every other caller of the store, not just this instance.
pub trait Storage: Send + Sync {
    // ===== Frontier Queue =====

    /// Appends a URL to the frontier and returns the new entry ID
    ///
    /// No uniqueness is enforced: the same URL may be queued several times.
    fn push_frontier(&self, url: &str, priority: i64) -> StorageResult<i64>;

    /// Removes and returns the entry with the lowest priority value
    ///
    /// Ties are broken by insertion order. Selection and removal are a
    /// single step, so two callers never receive the same entry.
    fn pop_frontier(&self) -> StorageResult<Option<FrontierEntry>>;

    // ===== Visited Set =====

    /// Inserts a visited record unconditionally and returns its ID
    fn insert_visited(&self, url: &str) -> StorageResult<i64>;

    /// Returns true if at least one visited record exists for `url`
    fn is_visited(&self, url: &str) -> StorageResult<bool>;

    /// Lists every visited URL, duplicates included
    fn list_visited(&self) -> StorageResult<Vec<String>>;

    // ===== Domain Health =====

    /// Creates the counters for `domain` or increments them in one step
    ///
    /// `total` always grows by one, `success` grows by one when `success`
    /// is true.
    fn increment_domain_health(&self, domain: &str, success: bool) -> StorageResult<()>;

    /// Gets the counters recorded for `domain`
    fn get_domain_health(&self, domain: &str) -> StorageResult<Option<DomainHealth>>;

    // ===== Movies =====

    /// Inserts a movie and returns its ID
    ///
    /// Title uniqueness is the caller's concern.
    fn insert_movie(&self, title: &str, info: &Value) -> StorageResult<i64>;

    /// Gets the metadata of the first movie stored under `title`
    fn find_movie(&self, title: &str) -> StorageResult<Option<Value>>;

    /// Lists the titles of every stored movie
    fn list_movie_titles(&self) -> StorageResult<Vec<String>>;

    // ===== Reviews =====

    /// Inserts a review document and returns its ID
    ///
    /// Returns `StorageError::ConstraintViolation` when the backend enforces
    /// unique (movie title, url) pairs and the pair already exists.
    fn insert_review(&self, review: &Review) -> StorageResult<i64>;

    /// Gets every review whose reviewed item name equals `movie_title`
    fn find_reviews(&self, movie_title: &str) -> StorageResult<Vec<Review>>;

    /// Sets `rank` on every review stored under `url`
    ///
    /// # Returns
    ///
    /// The number of reviews updated
    fn set_review_rank(&self, url: &str, rank: f64) -> StorageResult<u64>;

    // ===== Link Records =====

    /// Appends a link record and returns its ID
    fn insert_link_record(&self, key: &str, links: &[String]) -> StorageResult<i64>;

    /// Lists every link record in insertion order
    fn list_link_records(&self) -> StorageResult<Vec<LinkRecord>>;

    // ===== Maintenance =====

    /// Deletes every record of one class
    fn clear(&self, class: RecordClass) -> StorageResult<()>;

    /// Counts the records of one class
    fn count(&self, class: RecordClass) -> StorageResult<u64>;
}
