//! Crawl coordination core
//!
//! This module contains the components that decide what gets crawled:
//! - The priority frontier queue
//! - The visited set
//! - Per-domain health tracking and admission
//! - The outgoing link graph and rank update hook
//! - The coordinator binding them together

mod coordinator;
mod frontier;
mod health;
mod links;
mod visited;

pub use coordinator::{Admission, CrawlCoordinator};
pub use frontier::{Frontier, DEFAULT_PRIORITY};
pub use health::DomainHealthTracker;
pub use links::LinkGraph;
pub use visited::VisitedSet;
