//! In-memory storage implementation
//!
//! Every record class lives behind one mutex, so each trait method is atomic
//! with respect to other callers sharing the same instance. Nothing is
//! persisted; the store is meant for tests and single-process runs.

use crate::catalog::Review;
use crate::state::DomainHealth;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{FrontierEntry, LinkRecord, RecordClass};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Collections {
    next_id: i64,
    movies: Vec<(i64, String, Value)>,
    reviews: Vec<(i64, Review)>,
    frontier: Vec<(i64, FrontierEntry)>,
    visited: Vec<(i64, String)>,
    link_records: Vec<(i64, LinkRecord)>,
    domain_health: HashMap<String, DomainHealth>,
}

impl Collections {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mutex-guarded in-memory storage backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<Collections>,
    unique_reviews: bool,
}

impl MemoryStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects a second review for the same
    /// (movie title, url) pair with `StorageError::ConstraintViolation`
    pub fn with_unique_reviews() -> Self {
        Self {
            inner: Mutex::new(Collections::default()),
            unique_reviews: true,
        }
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Collections>> {
        self.inner.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl Storage for MemoryStorage {
    fn push_frontier(&self, url: &str, priority: i64) -> StorageResult<i64> {
        let mut inner = self.lock()?;
        let id = inner.allocate_id();
        inner.frontier.push((
            id,
            FrontierEntry {
                url: url.to_string(),
                priority,
            },
        ));
        Ok(id)
    }

    fn pop_frontier(&self) -> StorageResult<Option<FrontierEntry>> {
        let mut inner = self.lock()?;
        let position = inner
            .frontier
            .iter()
            .enumerate()
            .min_by_key(|(_, (id, entry))| (entry.priority, *id))
            .map(|(position, _)| position);

        Ok(position.map(|p| inner.frontier.remove(p).1))
    }

    fn insert_visited(&self, url: &str) -> StorageResult<i64> {
        let mut inner = self.lock()?;
        let id = inner.allocate_id();
        inner.visited.push((id, url.to_string()));
        Ok(id)
    }

    fn is_visited(&self, url: &str) -> StorageResult<bool> {
        Ok(self.lock()?.visited.iter().any(|(_, u)| u == url))
    }

    fn list_visited(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .lock()?
            .visited
            .iter()
            .map(|(_, url)| url.clone())
            .collect())
    }

    fn increment_domain_health(&self, domain: &str, success: bool) -> StorageResult<()> {
        let mut inner = self.lock()?;
        inner
            .domain_health
            .entry(domain.to_string())
            .and_modify(|health| health.record(success))
            .or_insert_with(|| DomainHealth::first_observation(success));
        Ok(())
    }

    fn get_domain_health(&self, domain: &str) -> StorageResult<Option<DomainHealth>> {
        Ok(self.lock()?.domain_health.get(domain).copied())
    }

    fn insert_movie(&self, title: &str, info: &Value) -> StorageResult<i64> {
        let mut inner = self.lock()?;
        let id = inner.allocate_id();
        inner.movies.push((id, title.to_string(), info.clone()));
        Ok(id)
    }

    fn find_movie(&self, title: &str) -> StorageResult<Option<Value>> {
        Ok(self
            .lock()?
            .movies
            .iter()
            .find(|(_, t, _)| t == title)
            .map(|(_, _, info)| info.clone()))
    }

    fn list_movie_titles(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .lock()?
            .movies
            .iter()
            .map(|(_, title, _)| title.clone())
            .collect())
    }

    fn insert_review(&self, review: &Review) -> StorageResult<i64> {
        let mut inner = self.lock()?;
        if self.unique_reviews
            && inner.reviews.iter().any(|(_, r)| {
                r.movie_title() == review.movie_title() && r.url == review.url
            })
        {
            return Err(StorageError::ConstraintViolation(format!(
                "review {} already stored for '{}'",
                review.url,
                review.movie_title()
            )));
        }

        let id = inner.allocate_id();
        inner.reviews.push((id, review.clone()));
        Ok(id)
    }

    fn find_reviews(&self, movie_title: &str) -> StorageResult<Vec<Review>> {
        Ok(self
            .lock()?
            .reviews
            .iter()
            .filter(|(_, r)| r.movie_title() == movie_title)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn set_review_rank(&self, url: &str, rank: f64) -> StorageResult<u64> {
        let mut inner = self.lock()?;
        let mut updated = 0;
        for (_, review) in inner.reviews.iter_mut().filter(|(_, r)| r.url == url) {
            review.rank = rank;
            updated += 1;
        }
        Ok(updated)
    }

    fn insert_link_record(&self, key: &str, links: &[String]) -> StorageResult<i64> {
        let mut inner = self.lock()?;
        let id = inner.allocate_id();
        inner.link_records.push((
            id,
            LinkRecord {
                key: key.to_string(),
                links: links.to_vec(),
            },
        ));
        Ok(id)
    }

    fn list_link_records(&self) -> StorageResult<Vec<LinkRecord>> {
        Ok(self
            .lock()?
            .link_records
            .iter()
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn clear(&self, class: RecordClass) -> StorageResult<()> {
        let mut inner = self.lock()?;
        match class {
            RecordClass::Movies => inner.movies.clear(),
            RecordClass::Reviews => inner.reviews.clear(),
            RecordClass::Frontier => inner.frontier.clear(),
            RecordClass::Visited => inner.visited.clear(),
            RecordClass::LinkRecords => inner.link_records.clear(),
            RecordClass::DomainHealth => inner.domain_health.clear(),
        }
        Ok(())
    }

    fn count(&self, class: RecordClass) -> StorageResult<u64> {
        let inner = self.lock()?;
        let count = match class {
            RecordClass::Movies => inner.movies.len(),
            RecordClass::Reviews => inner.reviews.len(),
            RecordClass::Frontier => inner.frontier.len(),
            RecordClass::Visited => inner.visited.len(),
            RecordClass::LinkRecords => inner.link_records.len(),
            RecordClass::DomainHealth => inner.domain_health.len(),
        };
        Ok(count as u64)
    }
}
