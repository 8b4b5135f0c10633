//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.
//! Several processes may open the same database file; the atomic operations
//! are single SQL statements so SQLite's write lock serializes them.

use crate::catalog::Review;
use crate::config::StoreConfig;
use crate::state::DomainHealth;
use crate::storage::schema::{initialize_schema, UNIQUE_REVIEWS_SQL};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{FrontierEntry, LinkRecord, RecordClass};
use crate::CineError;
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens or creates a database file with default settings
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(CineError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, CineError> {
        let conn = Connection::open(path)?;
        Self::configure(conn, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens the store described by the `[store]` configuration section
    pub fn open(config: &StoreConfig) -> Result<Self, CineError> {
        let conn = Connection::open(Path::new(&config.database_path))?;
        let storage = Self::configure(conn, Duration::from_millis(config.busy_timeout_ms))?;
        if config.unique_reviews {
            storage.enforce_unique_reviews()?;
        }
        Ok(storage)
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> Result<Self, CineError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn configure(conn: Connection, busy_timeout: Duration) -> Result<Self, CineError> {
        // Must precede the journal mode switch, which takes a lock
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Adds a unique index on (movie title, url) to the reviews table
    ///
    /// Once enabled, a second insert of the same pair fails with
    /// `StorageError::ConstraintViolation` instead of producing a duplicate.
    /// Fails if the table already holds duplicate pairs.
    pub fn enforce_unique_reviews(&self) -> StorageResult<()> {
        self.conn()?.execute_batch(UNIQUE_REVIEWS_SQL)?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

impl Storage for SqliteStorage {
    // ===== Frontier Queue =====

    fn push_frontier(&self, url: &str, priority: i64) -> StorageResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO frontier (url, priority, created_at) VALUES (?1, ?2, ?3)",
            params![url, priority, now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn pop_frontier(&self) -> StorageResult<Option<FrontierEntry>> {
        let conn = self.conn()?;
        let entry = conn
            .query_row(
                "DELETE FROM frontier
                 WHERE id = (SELECT id FROM frontier ORDER BY priority ASC, id ASC LIMIT 1)
                 RETURNING url, priority",
                [],
                |row| {
                    Ok(FrontierEntry {
                        url: row.get(0)?,
                        priority: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(entry)
    }

    // ===== Visited Set =====

    fn insert_visited(&self, url: &str) -> StorageResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO visited (url, created_at) VALUES (?1, ?2)",
            params![url, now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn is_visited(&self, url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn()?
            .query_row(
                "SELECT 1 FROM visited WHERE url = ?1 LIMIT 1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn list_visited(&self) -> StorageResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT url FROM visited ORDER BY id")?;
        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(urls)
    }

    // ===== Domain Health =====

    fn increment_domain_health(&self, domain: &str, success: bool) -> StorageResult<()> {
        self.conn()?.execute(
            "INSERT INTO domain_health (domain, total, success, updated_at) VALUES (?1, 1, ?2, ?3)
             ON CONFLICT(domain) DO UPDATE SET
                total = total + 1,
                success = success + excluded.success,
                updated_at = excluded.updated_at",
            params![domain, i64::from(success), now()],
        )?;
        Ok(())
    }

    fn get_domain_health(&self, domain: &str) -> StorageResult<Option<DomainHealth>> {
        let health = self
            .conn()?
            .query_row(
                "SELECT total, success FROM domain_health WHERE domain = ?1",
                params![domain],
                |row| {
                    Ok(DomainHealth {
                        total: row.get::<_, i64>(0)? as u64,
                        success: row.get::<_, i64>(1)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(health)
    }

    // ===== Movies =====

    fn insert_movie(&self, title: &str, info: &Value) -> StorageResult<i64> {
        let info_json = serde_json::to_string(info)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO movies (title, info, created_at) VALUES (?1, ?2, ?3)",
            params![title, info_json, now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_movie(&self, title: &str) -> StorageResult<Option<Value>> {
        let info_json: Option<String> = self
            .conn()?
            .query_row(
                "SELECT info FROM movies WHERE title = ?1 ORDER BY id LIMIT 1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;

        match info_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn list_movie_titles(&self) -> StorageResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT title FROM movies ORDER BY id")?;
        let titles = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(titles)
    }

    // ===== Reviews =====

    fn insert_review(&self, review: &Review) -> StorageResult<i64> {
        let document = serde_json::to_string(review)?;
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO reviews (movie_title, url, rank, document, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![review.movie_title(), review.url, review.rank, document, now()],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::ConstraintViolation(format!(
                    "review {} already stored for '{}'",
                    review.url,
                    review.movie_title()
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_reviews(&self, movie_title: &str) -> StorageResult<Vec<Review>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT document, rank FROM reviews WHERE movie_title = ?1 ORDER BY id",
        )?;

        let rows = stmt
            .query_map(params![movie_title], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut reviews = Vec::with_capacity(rows.len());
        for (document, rank) in rows {
            // The rank column is authoritative; the document keeps the insert-time value
            let mut review: Review = serde_json::from_str(&document)?;
            review.rank = rank;
            reviews.push(review);
        }

        Ok(reviews)
    }

    fn set_review_rank(&self, url: &str, rank: f64) -> StorageResult<u64> {
        let updated = self.conn()?.execute(
            "UPDATE reviews SET rank = ?1 WHERE url = ?2",
            params![rank, url],
        )?;
        Ok(updated as u64)
    }

    // ===== Link Records =====

    fn insert_link_record(&self, key: &str, links: &[String]) -> StorageResult<i64> {
        let links_json = serde_json::to_string(links)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO link_records (key, links, created_at) VALUES (?1, ?2, ?3)",
            params![key, links_json, now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn list_link_records(&self) -> StorageResult<Vec<LinkRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key, links FROM link_records ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for (key, links_json) in rows {
            records.push(LinkRecord {
                key,
                links: serde_json::from_str(&links_json)?,
            });
        }

        Ok(records)
    }

    // ===== Maintenance =====

    fn clear(&self, class: RecordClass) -> StorageResult<()> {
        self.conn()?
            .execute(&format!("DELETE FROM {}", class.table_name()), [])?;
        Ok(())
    }

    fn count(&self, class: RecordClass) -> StorageResult<u64> {
        let count: i64 = self.conn()?.query_row(
            &format!("SELECT COUNT(*) FROM {}", class.table_name()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
