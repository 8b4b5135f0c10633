use crate::config::AdmissionConfig;
use serde::{Deserialize, Serialize};

/// Attempt and success counters for one domain
///
/// `success` never exceeds `total`. Both counters only ever grow; the only
/// way to bring a domain back after it has been excluded is a full reset of
/// the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainHealth {
    /// Number of crawl attempts recorded for this domain
    pub total: u64,

    /// Number of those attempts that succeeded
    pub success: u64,
}

impl DomainHealth {
    /// Counters for a domain observed for the first time
    pub fn first_observation(success: bool) -> Self {
        Self {
            total: 1,
            success: u64::from(success),
        }
    }

    /// Records one more attempt
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        self.success += u64::from(success);
    }

    /// Fraction of attempts that succeeded, `None` before any attempt
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.success as f64 / self.total as f64)
        }
    }

    /// Decides whether this domain is still worth crawling
    ///
    /// A domain is excluded when it never succeeded over more than
    /// `max_attempts_without_success` attempts, or when its success rate is
    /// below `min_success_rate`. The rate check applies from the first
    /// attempt, so a domain whose only attempts failed is excluded as well.
    ///
    /// # Returns
    ///
    /// * `true` - The domain may be crawled
    /// * `false` - The circuit breaker has tripped for this domain
    pub fn admits(&self, config: &AdmissionConfig) -> bool {
        let Some(rate) = self.success_rate() else {
            return true;
        };

        if self.success == 0 && self.total > config.max_attempts_without_success {
            return false;
        }

        rate >= config.min_success_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(total: u64, success: u64) -> DomainHealth {
        DomainHealth { total, success }
    }

    #[test]
    fn test_first_observation() {
        assert_eq!(DomainHealth::first_observation(true), health(1, 1));
        assert_eq!(DomainHealth::first_observation(false), health(1, 0));
    }

    #[test]
    fn test_record_keeps_success_within_total() {
        let mut state = DomainHealth::first_observation(false);
        state.record(true);
        state.record(false);
        state.record(true);

        assert_eq!(state, health(4, 2));
        assert!(state.success <= state.total);
    }

    #[test]
    fn test_success_rate() {
        assert_eq!(DomainHealth::default().success_rate(), None);
        assert_eq!(health(4, 1).success_rate(), Some(0.25));
    }

    #[test]
    fn test_empty_counters_are_admitted() {
        assert!(DomainHealth::default().admits(&AdmissionConfig::default()));
    }

    #[test]
    fn test_never_successful_domain_is_excluded() {
        let config = AdmissionConfig::default();
        assert!(!health(501, 0).admits(&config));
        assert!(!health(10_000, 0).admits(&config));
    }

    #[test]
    fn test_single_failure_trips_rate_check() {
        assert!(!health(1, 0).admits(&AdmissionConfig::default()));
    }

    #[test]
    fn test_low_success_rate_is_excluded() {
        // 1 / 200_001 is below 0.00001
        assert!(!health(200_001, 1).admits(&AdmissionConfig::default()));
    }

    #[test]
    fn test_rate_above_threshold_is_admitted() {
        let config = AdmissionConfig::default();
        // 1 / 50_001 is above 0.00001
        assert!(health(50_001, 1).admits(&config));
        assert!(health(1, 1).admits(&config));
        assert!(health(100, 99).admits(&config));
    }

    #[test]
    fn test_custom_thresholds() {
        let config = AdmissionConfig {
            max_attempts_without_success: 10,
            min_success_rate: 0.0,
        };

        assert!(health(10, 0).admits(&config));
        assert!(!health(11, 0).admits(&config));
    }
}
