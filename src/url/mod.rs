//! URL handling module for CineCrawl
//!
//! Domains are the unit of crawl health tracking; this module derives them
//! from crawled URLs.

mod domain;

pub use domain::{domain_of, extract_domain};
