use crate::storage::{LinkRecord, Storage};
use std::sync::Arc;

/// Outgoing link records and the hook through which computed ranks are persisted
///
/// Records are append-only: recording links for the same source twice keeps
/// two records. Rank computation itself happens outside this crate; its
/// results come back through [`LinkGraph::apply_ranks`].
pub struct LinkGraph {
    storage: Arc<dyn Storage>,
}

impl LinkGraph {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Appends a record of the links found on `url`
    pub fn add_outgoing_links(&self, url: &str, links: &[String]) -> Option<i64> {
        match self.storage.insert_link_record(url, links) {
            Ok(id) => {
                tracing::debug!("Recorded {} outgoing links from {}", links.len(), url);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Unable to record links from {}: {}", url, e);
                None
            }
        }
    }

    /// Lists every stored link record
    pub fn list_link_records(&self) -> Vec<LinkRecord> {
        self.storage.list_link_records().unwrap_or_else(|e| {
            tracing::error!("Unable to list link records: {}", e);
            Vec::new()
        })
    }

    /// Persists computed ranks onto the reviews harvested from each url
    ///
    /// Urls without a stored review are skipped.
    ///
    /// # Returns
    ///
    /// The number of reviews updated
    pub fn apply_ranks<I>(&self, ranks: I) -> u64
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut updated = 0;
        for (url, rank) in ranks {
            match self.storage.set_review_rank(&url, rank) {
                Ok(n) => updated += n,
                Err(e) => tracing::error!("Unable to update rank for {}: {}", url, e),
            }
        }
        tracing::info!("Applied ranks to {} review(s)", updated);
        updated
    }
}
