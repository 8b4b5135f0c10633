//! Movie catalog and review store
//!
//! This module contains:
//! - The review document type
//! - The external metadata provider abstraction and its OMDb client
//! - The movie catalog, deduplicated by title
//! - The review store, deduplicated by url per movie

mod movies;
mod provider;
mod review;
mod reviews;

pub use movies::MovieCatalog;
pub use provider::{MetadataProvider, OmdbProvider};
pub use review::{ItemReviewed, Review};
pub use reviews::ReviewStore;
