use crate::catalog::MetadataProvider;
use crate::storage::Storage;
use serde_json::Value;
use std::sync::Arc;

/// Movie titles and their metadata, one entry per distinct title
///
/// The existence check and the insert in [`MovieCatalog::add_movie`] are two
/// separate store calls. Two workers adding the same new title at once can
/// both insert it; lookups then return the first stored entry.
pub struct MovieCatalog {
    storage: Arc<dyn Storage>,
    provider: Arc<dyn MetadataProvider>,
}

impl MovieCatalog {
    pub fn new(storage: Arc<dyn Storage>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { storage, provider }
    }

    /// Adds a movie unless its title is already catalogued
    ///
    /// # Returns
    ///
    /// * `Some(id)` - The movie was inserted
    /// * `None` - The title already exists, or the store failed
    pub fn add_movie(&self, title: &str, info: Value) -> Option<i64> {
        match self.storage.find_movie(title) {
            Ok(Some(_)) => {
                tracing::info!("Movie '{}' already in catalog", title);
                return None;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Unable to check catalog for '{}': {}", title, e);
                return None;
            }
        }

        match self.storage.insert_movie(title, &info) {
            Ok(id) => {
                tracing::debug!("Added movie '{}' as {}", title, id);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Unable to add movie '{}': {}", title, e);
                None
            }
        }
    }

    /// Lists every catalogued title
    pub fn list_movies(&self) -> Vec<String> {
        self.storage.list_movie_titles().unwrap_or_else(|e| {
            tracing::error!("Unable to list movies: {}", e);
            Vec::new()
        })
    }

    /// Gets the metadata stored for `title`
    pub fn get_movie_info(&self, title: &str) -> Option<Value> {
        match self.storage.find_movie(title) {
            Ok(Some(info)) => Some(info),
            Ok(None) => {
                tracing::info!("No info found for {}", title);
                None
            }
            Err(e) => {
                tracing::error!("Unable to read info for {}: {}", title, e);
                None
            }
        }
    }

    /// Returns true if `title` is catalogued
    ///
    /// A store failure counts as absent.
    pub fn contains(&self, title: &str) -> bool {
        match self.storage.find_movie(title) {
            Ok(found) => found.is_some(),
            Err(e) => {
                tracing::error!("Unable to check catalog for '{}': {}", title, e);
                false
            }
        }
    }

    /// Fetches metadata for `title` from the external provider
    ///
    /// Provider failures are logged and reported as `None`.
    pub async fn fetch_external_movie_info(&self, title: &str) -> Option<Value> {
        match self.provider.lookup(title).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::info!("{} info cannot be retrieved: {}", title, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::StaticProvider;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn catalog_with(provider: StaticProvider) -> MovieCatalog {
        MovieCatalog::new(Arc::new(MemoryStorage::new()), Arc::new(provider))
    }

    #[test]
    fn test_add_movie_twice_keeps_original_info() {
        let catalog = catalog_with(StaticProvider::unreachable());

        let first = catalog.add_movie("X", json!({"Plot": "original"}));
        let second = catalog.add_movie("X", json!({"Plot": "other"}));

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(catalog.get_movie_info("X"), Some(json!({"Plot": "original"})));
        assert_eq!(catalog.list_movies(), vec!["X"]);
    }

    #[test]
    fn test_get_movie_info_for_unknown_title() {
        let catalog = catalog_with(StaticProvider::unreachable());
        assert_eq!(catalog.get_movie_info("Nope"), None);
        assert!(!catalog.contains("Nope"));
    }

    #[test]
    fn test_titles_match_exactly() {
        let catalog = catalog_with(StaticProvider::unreachable());
        catalog.add_movie("Heat", json!({}));

        assert!(catalog.contains("Heat"));
        assert!(!catalog.contains("heat"));
        assert!(!catalog.contains("Heat "));
    }

    #[tokio::test]
    async fn test_fetch_external_movie_info_success() {
        let catalog = catalog_with(StaticProvider::found(json!({"Title": "Heat"})));
        assert_eq!(
            catalog.fetch_external_movie_info("Heat").await,
            Some(json!({"Title": "Heat"}))
        );
    }

    #[tokio::test]
    async fn test_fetch_external_movie_info_failures_are_absent() {
        let catalog = catalog_with(StaticProvider::unreachable());
        assert_eq!(catalog.fetch_external_movie_info("Heat").await, None);

        let catalog = catalog_with(StaticProvider::garbled());
        assert_eq!(catalog.fetch_external_movie_info("Heat").await, None);
    }
}
