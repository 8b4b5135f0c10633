//! Statistics over the crawl store
//!
//! This module provides functionality for counting the records held in
//! each class and displaying them.

use crate::storage::{RecordClass, Storage};
use crate::CineError;
use std::collections::HashMap;

/// Record counts per class
#[derive(Debug, Clone, Default)]
pub struct StoreStatistics {
    pub counts: HashMap<RecordClass, u64>,
}

impl StoreStatistics {
    /// Count for one class, 0 when absent
    pub fn count(&self, class: RecordClass) -> u64 {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    /// Total number of records across every class
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Loads statistics from storage
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(CineError)` - Failed to count a record class
pub fn load_statistics(storage: &dyn Storage) -> Result<StoreStatistics, CineError> {
    let mut counts = HashMap::new();
    for class in RecordClass::ALL {
        counts.insert(class, storage.count(class)?);
    }
    Ok(StoreStatistics { counts })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Store Statistics ===\n");

    for class in RecordClass::ALL {
        println!("  {:<14} {}", class.table_name(), stats.count(class));
    }
    println!();

    println!("Total records: {}", stats.total());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_load_statistics_counts_every_class() {
        let storage = MemoryStorage::new();
        storage.push_frontier("https://a.com/1", 1).unwrap();
        storage.push_frontier("https://a.com/2", 1).unwrap();
        storage.insert_visited("https://a.com/0").unwrap();
        storage.increment_domain_health("a.com", true).unwrap();
        storage.increment_domain_health("a.com", false).unwrap();

        let stats = load_statistics(&storage).unwrap();

        assert_eq!(stats.counts.len(), RecordClass::ALL.len());
        assert_eq!(stats.count(RecordClass::Frontier), 2);
        assert_eq!(stats.count(RecordClass::Visited), 1);
        assert_eq!(stats.count(RecordClass::DomainHealth), 1);
        assert_eq!(stats.count(RecordClass::Movies), 0);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = StoreStatistics::default();
        assert_eq!(stats.count(RecordClass::Reviews), 0);
        assert_eq!(stats.total(), 0);
    }
}
