//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the CineCrawl database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Movies keyed by title, metadata kept as JSON
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    info TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_movies_title ON movies(title);

-- Reviews: full JSON document plus the fields queried on
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_title TEXT NOT NULL,
    url TEXT NOT NULL,
    rank REAL NOT NULL DEFAULT 0,
    document TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reviews_movie_title ON reviews(movie_title);
CREATE INDEX IF NOT EXISTS idx_reviews_url ON reviews(url);

-- Crawl frontier queue
CREATE TABLE IF NOT EXISTS frontier (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    priority INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_frontier_priority ON frontier(priority, id);

-- Crawled URLs (duplicates allowed)
CREATE TABLE IF NOT EXISTS visited (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_visited_url ON visited(url);

-- Outgoing links, one row per recording call
CREATE TABLE IF NOT EXISTS link_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL,
    links TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Per-domain crawl health counters
CREATE TABLE IF NOT EXISTS domain_health (
    domain TEXT PRIMARY KEY,
    total INTEGER NOT NULL DEFAULT 0,
    success INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL,
    CHECK (success <= total)
);
"#;

/// Unique index closing the review duplicate-check race
pub const UNIQUE_REVIEWS_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_unique ON reviews(movie_title, url);";

/// Initializes the database schema
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
