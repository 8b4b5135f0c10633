use crate::config::AdmissionConfig;
use crate::state::DomainHealth;
use crate::storage::Storage;
use std::sync::Arc;

/// Per-domain crawl outcome counters and the admission decision built on them
///
/// Once a domain is judged unproductive it stays excluded: the counters are
/// never reset except by clearing the store.
pub struct DomainHealthTracker {
    storage: Arc<dyn Storage>,
    config: AdmissionConfig,
}

impl DomainHealthTracker {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_config(storage, AdmissionConfig::default())
    }

    pub fn with_config(storage: Arc<dyn Storage>, config: AdmissionConfig) -> Self {
        Self { storage, config }
    }

    /// Records the outcome of one crawl attempt on `domain`
    ///
    /// The counters are created on first use and incremented in a single
    /// store operation, so concurrent workers never lose an update.
    pub fn record_outcome(&self, domain: &str, success: bool) {
        if let Err(e) = self.storage.increment_domain_health(domain, success) {
            tracing::error!("Unable to record outcome for domain {}: {}", domain, e);
        }
    }

    /// Gets the counters recorded for `domain`
    pub fn health(&self, domain: &str) -> Option<DomainHealth> {
        match self.storage.get_domain_health(domain) {
            Ok(health) => health,
            Err(e) => {
                tracing::error!("Unable to read health of domain {}: {}", domain, e);
                None
            }
        }
    }

    /// Decides whether `domain` should still be crawled
    ///
    /// Unseen domains are always admitted. If the counters cannot be read
    /// the domain is admitted as well.
    pub fn admit(&self, domain: &str) -> bool {
        match self.storage.get_domain_health(domain) {
            Ok(Some(health)) => {
                let admitted = health.admits(&self.config);
                if !admitted {
                    tracing::debug!(
                        "Domain {} excluded ({} successes in {} attempts)",
                        domain,
                        health.success,
                        health.total
                    );
                }
                admitted
            }
            Ok(None) => true,
            Err(e) => {
                tracing::warn!("Unable to read health of domain {}, admitting: {}", domain, e);
                true
            }
        }
    }
}
