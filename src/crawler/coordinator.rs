//! Crawl coordinator - admission of discovered URLs into the frontier
//!
//! The coordinator binds the frontier, the visited set, the domain health
//! tracker and the link graph. It holds no state of its own: every decision
//! is taken against the shared store, so any number of workers can run a
//! coordinator over the same store.

use crate::config::Config;
use crate::crawler::{DomainHealthTracker, Frontier, LinkGraph, VisitedSet};
use crate::storage::{FrontierEntry, Storage};
use crate::url::domain_of;
use std::sync::Arc;

/// Outcome of offering a discovered URL to the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The URL was queued under this entry ID
    Enqueued(i64),

    /// The URL has already been crawled
    AlreadyVisited,

    /// The URL's domain has tripped the circuit breaker
    DomainExcluded(String),

    /// The URL could not be parsed or has no host
    InvalidUrl,

    /// The store failed while queueing
    StorageFailure,
}

impl Admission {
    pub fn is_enqueued(&self) -> bool {
        matches!(self, Self::Enqueued(_))
    }
}

/// Decides which discovered URLs enter the frontier and records crawl results
pub struct CrawlCoordinator {
    frontier: Frontier,
    visited: VisitedSet,
    health: DomainHealthTracker,
    links: LinkGraph,
}

impl CrawlCoordinator {
    /// Creates a coordinator over `storage` using the admission thresholds
    /// and default priority from `config`
    pub fn new(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self {
            frontier: Frontier::with_default_priority(
                storage.clone(),
                config.frontier.default_priority,
            ),
            visited: VisitedSet::new(storage.clone()),
            health: DomainHealthTracker::with_config(storage.clone(), config.admission.clone()),
            links: LinkGraph::new(storage),
        }
    }

    /// Assembles a coordinator from already configured components
    pub fn from_parts(
        frontier: Frontier,
        visited: VisitedSet,
        health: DomainHealthTracker,
        links: LinkGraph,
    ) -> Self {
        Self {
            frontier,
            visited,
            health,
            links,
        }
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn health(&self) -> &DomainHealthTracker {
        &self.health
    }

    pub fn links(&self) -> &LinkGraph {
        &self.links
    }

    /// Offers a discovered URL to the frontier at `priority`
    ///
    /// The URL is queued unless it is malformed, already visited, or on a
    /// domain the health tracker no longer admits. The visited check and the
    /// push are separate store calls, so two workers may queue the same URL.
    pub fn enqueue(&self, url: &str, priority: i64) -> Admission {
        let Some(domain) = domain_of(url) else {
            tracing::debug!("Rejecting unparseable URL: {}", url);
            return Admission::InvalidUrl;
        };

        if self.visited.contains(url) {
            tracing::trace!("Skipping visited URL: {}", url);
            return Admission::AlreadyVisited;
        }

        if !self.health.admit(&domain) {
            tracing::debug!("Skipping {}: domain {} excluded", url, domain);
            return Admission::DomainExcluded(domain);
        }

        match self.frontier.push(url, priority) {
            Some(id) => Admission::Enqueued(id),
            None => Admission::StorageFailure,
        }
    }

    /// Offers a discovered URL at the default priority
    pub fn enqueue_default(&self, url: &str) -> Admission {
        self.enqueue(url, self.frontier.default_priority())
    }

    /// Takes the next URL to crawl
    pub fn next(&self) -> Option<FrontierEntry> {
        self.frontier.pop()
    }

    /// Records the result of crawling `url`
    ///
    /// The URL is marked visited and the outcome is counted against its
    /// domain. A URL without a host is only marked visited.
    pub fn complete(&self, url: &str, success: bool) {
        self.visited.mark_visited(url);

        match domain_of(url) {
            Some(domain) => self.health.record_outcome(&domain, success),
            None => tracing::warn!("No domain in crawled URL {}, outcome not recorded", url),
        }
    }

    /// Stores the links found on `url` and offers each of them to the frontier
    ///
    /// # Returns
    ///
    /// The admission outcome of every link, in input order
    pub fn record_links(&self, url: &str, links: &[String], priority: i64) -> Vec<Admission> {
        self.links.add_outgoing_links(url, links);

        let outcomes: Vec<Admission> = links
            .iter()
            .map(|link| self.enqueue(link, priority))
            .collect();

        let queued = outcomes.iter().filter(|a| a.is_enqueued()).count();
        tracing::debug!("Queued {} of {} links from {}", queued, links.len(), url);

        outcomes
    }
}
