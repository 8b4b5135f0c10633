//! Per-domain crawl health
//!
//! This module provides the attempt/success counters kept for every crawled
//! domain and the circuit-breaker policy derived from them.

mod domain_health;

pub use domain_health::DomainHealth;
