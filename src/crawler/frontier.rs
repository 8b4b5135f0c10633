use crate::storage::{FrontierEntry, RecordClass, Storage};
use std::sync::Arc;

/// Default priority of URLs queued without an explicit one
pub const DEFAULT_PRIORITY: i64 = 1;

/// Priority-ordered queue of URLs awaiting a crawl
///
/// Lower priority values are dequeued first. The queue does not deduplicate:
/// callers decide whether a URL is worth queueing before pushing it.
pub struct Frontier {
    storage: Arc<dyn Storage>,
    default_priority: i64,
}

impl Frontier {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_default_priority(storage, DEFAULT_PRIORITY)
    }

    pub fn with_default_priority(storage: Arc<dyn Storage>, default_priority: i64) -> Self {
        Self {
            storage,
            default_priority,
        }
    }

    pub fn default_priority(&self) -> i64 {
        self.default_priority
    }

    /// Queues `url` at `priority`
    ///
    /// # Returns
    ///
    /// * `Some(id)` - The entry was queued
    /// * `None` - The store failed
    pub fn push(&self, url: &str, priority: i64) -> Option<i64> {
        match self.storage.push_frontier(url, priority) {
            Ok(id) => {
                tracing::trace!("Queued {} at priority {}", url, priority);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Unable to add URL {} into queue: {}", url, e);
                None
            }
        }
    }

    /// Queues `url` at the default priority
    pub fn push_default(&self, url: &str) -> Option<i64> {
        self.push(url, self.default_priority)
    }

    /// Removes and returns the entry with the lowest priority value
    ///
    /// Returns `None` when the queue is empty or the store failed. Safe to
    /// call from many workers at once: every entry is handed out once.
    pub fn pop(&self) -> Option<FrontierEntry> {
        match self.storage.pop_frontier() {
            Ok(Some(entry)) => {
                tracing::debug!("Dequeued {} (priority {})", entry.url, entry.priority);
                Some(entry)
            }
            Ok(None) => {
                tracing::info!("Frontier is empty");
                None
            }
            Err(e) => {
                tracing::error!("Unable to pop from queue: {}", e);
                None
            }
        }
    }

    /// Number of queued entries, 0 if the store cannot be read
    pub fn len(&self) -> u64 {
        self.storage
            .count(RecordClass::Frontier)
            .unwrap_or_else(|e| {
                tracing::error!("Unable to count queue: {}", e);
                0
            })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, SqliteStorage};

    fn backends() -> Vec<Arc<dyn Storage>> {
        vec![
            Arc::new(MemoryStorage::new()),
            Arc::new(SqliteStorage::new_in_memory().unwrap()),
        ]
    }

    #[test]
    fn test_pops_in_non_decreasing_priority_order() {
        let priorities = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 0, -2];

        for storage in backends() {
            let frontier = Frontier::new(storage);
            for (i, p) in priorities.iter().enumerate() {
                assert!(frontier.push(&format!("https://a.com/{}", i), *p).is_some());
            }

            let popped: Vec<i64> = std::iter::from_fn(|| frontier.pop())
                .map(|entry| entry.priority)
                .collect();

            assert_eq!(popped.len(), priorities.len());
            assert!(popped.windows(2).all(|w| w[0] <= w[1]));
            assert!(frontier.is_empty());
        }
    }

    #[test]
    fn test_pop_on_empty_queue() {
        for storage in backends() {
            let frontier = Frontier::new(storage);
            assert!(frontier.pop().is_none());
        }
    }

    #[test]
    fn test_push_does_not_deduplicate() {
        let frontier = Frontier::new(Arc::new(MemoryStorage::new()));
        frontier.push_default("https://a.com/");
        frontier.push_default("https://a.com/");

        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_push_default_uses_configured_priority() {
        let frontier = Frontier::with_default_priority(Arc::new(MemoryStorage::new()), 7);
        frontier.push_default("https://a.com/");

        let entry = frontier.pop().unwrap();
        assert_eq!(entry.url, "https://a.com/");
        assert_eq!(entry.priority, 7);
    }

    #[test]
    fn test_default_priority_is_one() {
        let frontier = Frontier::new(Arc::new(MemoryStorage::new()));
        assert_eq!(frontier.default_priority(), 1);
    }
}
