//! Configuration module for CineCrawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use cinecrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cinecrawl.toml")).unwrap();
//! println!("Store lives at: {}", config.store.database_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AdmissionConfig, Config, FrontierConfig, ProviderConfig, StoreConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
