use crate::catalog::{MovieCatalog, Review};
use crate::storage::{Storage, StorageError};
use std::sync::Arc;

/// Reviews keyed by (movie title, url)
///
/// Duplicate detection reads the existing reviews and then inserts, in two
/// separate store calls. Two workers adding the same new review at once can
/// both pass the check unless the store enforces unique (title, url) pairs,
/// in which case the loser is reported as a duplicate.
pub struct ReviewStore {
    storage: Arc<dyn Storage>,
    catalog: Arc<MovieCatalog>,
}

impl ReviewStore {
    pub fn new(storage: Arc<dyn Storage>, catalog: Arc<MovieCatalog>) -> Self {
        Self { storage, catalog }
    }

    /// Stores a review, cataloguing its movie first when needed
    ///
    /// When the reviewed movie is not catalogued, its metadata is fetched
    /// from the provider and added. A failed fetch does not stop the review
    /// from being stored, so a review may reference an uncatalogued movie.
    /// The stored review always starts with a rank of 0.
    ///
    /// # Returns
    ///
    /// * `Some(id)` - The review was inserted
    /// * `None` - A review with the same url exists for this movie, or the store failed
    pub async fn add_review(&self, mut review: Review) -> Option<i64> {
        let title = review.movie_title().to_string();

        if !self.catalog.contains(&title) {
            if let Some(info) = self.catalog.fetch_external_movie_info(&title).await {
                self.catalog.add_movie(&title, info);
            }
        }

        if self
            .list_reviews(&title)
            .iter()
            .any(|existing| existing.url == review.url)
        {
            tracing::info!("Review {} already added into database", review.url);
            return None;
        }

        review.rank = 0.0;
        match self.storage.insert_review(&review) {
            Ok(id) => {
                tracing::debug!("Added review {} for '{}'", review.url, title);
                Some(id)
            }
            Err(StorageError::ConstraintViolation(_)) => {
                tracing::info!("Review {} already added into database", review.url);
                None
            }
            Err(e) => {
                tracing::error!("Unable to add review {}: {}", review.url, e);
                None
            }
        }
    }

    /// Lists every review of `title`
    ///
    /// Returns an empty list when there are none.
    pub fn list_reviews(&self, title: &str) -> Vec<Review> {
        match self.storage.find_reviews(title) {
            Ok(reviews) => {
                if reviews.is_empty() {
                    tracing::info!("No reviews found for {}", title);
                }
                reviews
            }
            Err(e) => {
                tracing::error!("Unable to read reviews for {}: {}", title, e);
                Vec::new()
            }
        }
    }

    /// Sets the rank of every review harvested from `url`
    ///
    /// Unknown urls are ignored.
    pub fn update_rank(&self, url: &str, rank: f64) {
        match self.storage.set_review_rank(url, rank) {
            Ok(0) => tracing::debug!("No review stored for {}, rank not updated", url),
            Ok(n) => tracing::debug!("Updated rank of {} review(s) at {} to {}", n, url, rank),
            Err(e) => tracing::error!("Unable to update rank for {}: {}", url, e),
        }
    }
}
