use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A harvested review document
///
/// Only the reviewed item's name, the review URL and the rank are
/// interpreted; every other field of the scraped document is carried
/// through unchanged in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "itemReviewed")]
    pub item_reviewed: ItemReviewed,

    /// Page the review was harvested from
    pub url: String,

    /// Link-analysis score, 0 until updated
    #[serde(default)]
    pub rank: f64,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The item a review is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReviewed {
    /// Movie title, matched exactly against the catalog
    pub name: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Review {
    /// Creates a review of `title` found at `url`
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            item_reviewed: ItemReviewed {
                name: title.into(),
                fields: Map::new(),
            },
            url: url.into(),
            rank: 0.0,
            fields: Map::new(),
        }
    }

    /// Adds an extra document field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Title of the reviewed movie
    pub fn movie_title(&self) -> &str {
        &self.item_reviewed.name
    }
}
