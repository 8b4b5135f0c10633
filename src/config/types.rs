use serde::Deserialize;

/// Main configuration structure for CineCrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub frontier: FrontierConfig,
}

/// Persistent store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file shared by all workers
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// How long a writer waits on a locked database (milliseconds)
    #[serde(rename = "busy-timeout-ms", default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Enforce at most one review per (movie title, url) at the storage level
    #[serde(rename = "unique-reviews", default)]
    pub unique_reviews: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Movie metadata provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OMDb-compatible lookup service
    pub endpoint: String,

    /// API key appended as `apikey` when present
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Thresholds of the per-domain circuit breaker
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionConfig {
    /// A domain that never succeeded is excluded once it has more attempts than this
    #[serde(rename = "max-attempts-without-success", default = "default_max_attempts")]
    pub max_attempts_without_success: u64,

    /// A domain whose success ratio falls below this is excluded
    #[serde(rename = "min-success-rate", default = "default_min_success_rate")]
    pub min_success_rate: f64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_attempts_without_success: default_max_attempts(),
            min_success_rate: default_min_success_rate(),
        }
    }
}

/// Frontier queue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FrontierConfig {
    /// Priority given to URLs enqueued without an explicit one
    #[serde(rename = "default-priority", default = "default_priority")]
    pub default_priority: i64,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
        }
    }
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u64 {
    500
}

fn default_min_success_rate() -> f64 {
    0.00001
}

fn default_priority() -> i64 {
    1
}
