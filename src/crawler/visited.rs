use crate::storage::Storage;
use std::sync::Arc;

/// Record of URLs already crawled
///
/// Marking is unconditional: a URL marked twice is listed twice.
pub struct VisitedSet {
    storage: Arc<dyn Storage>,
}

impl VisitedSet {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Records `url` as visited
    ///
    /// # Returns
    ///
    /// * `Some(id)` - The record was inserted
    /// * `None` - The store failed
    pub fn mark_visited(&self, url: &str) -> Option<i64> {
        match self.storage.insert_visited(url) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!("Unable to add URL {} into visited: {}", url, e);
                None
            }
        }
    }

    /// Returns true if `url` has been marked at least once
    ///
    /// A store failure counts as not visited.
    pub fn contains(&self, url: &str) -> bool {
        self.storage.is_visited(url).unwrap_or_else(|e| {
            tracing::warn!("Unable to check visited set for {}: {}", url, e);
            false
        })
    }

    /// Lists every visited URL, duplicates included
    pub fn list_visited(&self) -> Vec<String> {
        self.storage.list_visited().unwrap_or_else(|e| {
            tracing::error!("Unable to list visited URLs: {}", e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_mark_and_list() {
        let visited = VisitedSet::new(Arc::new(MemoryStorage::new()));
        assert!(visited.list_visited().is_empty());

        visited.mark_visited("https://a.com/1");
        visited.mark_visited("https://a.com/2");

        let mut urls = visited.list_visited();
        urls.sort();
        assert_eq!(urls, vec!["https://a.com/1", "https://a.com/2"]);
    }

    #[test]
    fn test_marking_twice_keeps_both_records() {
        let visited = VisitedSet::new(Arc::new(MemoryStorage::new()));

        assert!(visited.mark_visited("https://a.com/").is_some());
        assert!(visited.mark_visited("https://a.com/").is_some());

        assert_eq!(visited.list_visited().len(), 2);
    }

    #[test]
    fn test_contains() {
        let visited = VisitedSet::new(Arc::new(MemoryStorage::new()));
        assert!(!visited.contains("https://a.com/"));

        visited.mark_visited("https://a.com/");

        assert!(visited.contains("https://a.com/"));
        assert!(!visited.contains("https://a.com/other"));
    }
}
