//! CineCrawl: persistence and crawl coordination for a movie review crawler
//!
//! This crate stores the crawl frontier, the visited set, per-domain crawl
//! health, the movie catalog, harvested reviews and the outgoing link graph.
//! Every component receives its storage backend explicitly so that several
//! crawl workers can share one persistent store.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for CineCrawl operations
#[derive(Debug, Error)]
pub enum CineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Metadata provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failures reported by the external movie metadata provider
///
/// Both kinds are recoverable: callers treat them as an absence of data.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Response for '{title}' could not be parsed: {message}")]
    Unparseable { title: String, message: String },

    #[error("Request for '{title}' failed: {message}")]
    Network { title: String, message: String },
}

/// Result type alias for CineCrawl operations
pub type Result<T> = std::result::Result<T, CineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{MetadataProvider, MovieCatalog, OmdbProvider, Review, ReviewStore};
pub use config::Config;
pub use crawler::{Admission, CrawlCoordinator, DomainHealthTracker, Frontier, LinkGraph, VisitedSet};
pub use state::DomainHealth;
pub use storage::{MemoryStorage, RecordClass, SqliteStorage, Storage};
pub use url::{domain_of, extract_domain};
