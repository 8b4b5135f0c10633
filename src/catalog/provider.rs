//! External movie metadata provider
//!
//! This module handles the lookup of movie metadata by title:
//! - The `MetadataProvider` abstraction used by the catalog
//! - An OMDb-compatible HTTP implementation
//! - Classification of failures into unparseable responses and network errors

use crate::config::{ProviderConfig, UserAgentConfig};
use crate::{CineError, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A read-only lookup of movie metadata by free-text title
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Looks up `title` and returns the parsed metadata document
    async fn lookup(&self, title: &str) -> Result<Value, ProviderError>;
}

/// OMDb-compatible metadata provider
///
/// Sends `GET <endpoint>?t=<title>&plot=short&r=json`. The title is form
/// encoded, so spaces travel as `+`. Any body that parses as JSON is
/// returned as the record, including the provider's own "not found"
/// payloads.
pub struct OmdbProvider {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl OmdbProvider {
    /// Builds a provider from configuration
    ///
    /// The user agent follows the same `Name/Version (+URL; email)` format
    /// as the crawler itself.
    pub fn new(config: &ProviderConfig, user_agent: &UserAgentConfig) -> Result<Self, CineError> {
        let endpoint = Url::parse(&config.endpoint)?;

        let user_agent = format!(
            "{}/{} (+{}; {})",
            user_agent.crawler_name,
            user_agent.crawler_version,
            user_agent.contact_url,
            user_agent.contact_email
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Builds the lookup URL for `title`
    pub fn lookup_url(&self, title: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("t", title)
                .append_pair("plot", "short")
                .append_pair("r", "json");
            if let Some(key) = &self.api_key {
                query.append_pair("apikey", key);
            }
        }
        url
    }
}

#[async_trait]
impl MetadataProvider for OmdbProvider {
    async fn lookup(&self, title: &str) -> Result<Value, ProviderError> {
        let url = self.lookup_url(title);
        tracing::debug!("Looking up movie info: {}", url);

        let network_error = |e: reqwest::Error| ProviderError::Network {
            title: title.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(network_error)?;
        let body = response.text().await.map_err(network_error)?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Unparseable {
            title: title.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>) -> OmdbProvider {
        let config = ProviderConfig {
            endpoint: "http://www.omdbapi.com/".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
        };
        let user_agent = UserAgentConfig {
            crawler_name: "CineCrawl".to_string(),
            crawler_version: "0.1".to_string(),
            contact_url: "https://example.com/bot".to_string(),
            contact_email: "bot@example.com".to_string(),
        };
        OmdbProvider::new(&config, &user_agent).unwrap()
    }

    #[test]
    fn test_lookup_url_encodes_spaces_as_plus() {
        let url = provider(None).lookup_url("The Big Lebowski");
        assert_eq!(
            url.as_str(),
            "http://www.omdbapi.com/?t=The+Big+Lebowski&plot=short&r=json"
        );
    }

    #[test]
    fn test_lookup_url_escapes_reserved_characters() {
        let url = provider(None).lookup_url("Fast & Furious");
        assert_eq!(url.query(), Some("t=Fast+%26+Furious&plot=short&r=json"));
    }

    #[test]
    fn test_lookup_url_appends_api_key() {
        let url = provider(Some("abc123")).lookup_url("Heat");
        assert_eq!(url.query(), Some("t=Heat&plot=short&r=json&apikey=abc123"));
    }
}
