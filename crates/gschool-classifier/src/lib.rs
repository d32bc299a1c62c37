//! URL/HTML content classifiers.
//!
//! A [`Classifier`] maps a page (its URL and, optionally, its HTML) to a
//! category label.  The server only ever talks to the trait, so the concrete
//! classifier can be swapped without touching any handler code:
//!
//! - [`KeywordClassifier`] – in-process host and keyword rules (default).
//! - [`RemoteClassifier`] – forwards the page to an HTTP classification
//!   service.

pub mod category;
pub mod error;
pub mod keyword;
pub mod remote;

pub use category::Category;
pub use error::ClassifierError;
pub use keyword::KeywordClassifier;
pub use remote::RemoteClassifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of classifying one page.
///
/// Fields a remote classifier returns beyond `category` and `confidence` are
/// preserved in `extra` so callers can pass them through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Classification {
    pub fn new(category: impl Into<String>, confidence: Option<f32>) -> Self {
        Self {
            category: category.into(),
            confidence,
            extra: Map::new(),
        }
    }
}

/// A page classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier reported by the health endpoint, e.g. `"keyword"`.
    fn name(&self) -> &'static str;

    /// Category labels this classifier can produce.  Used to seed the
    /// category policy table on first start.
    fn categories(&self) -> Vec<String>;

    /// Classify a page by URL and optional HTML body.
    async fn classify(
        &self,
        url: &str,
        html: Option<&str>,
    ) -> Result<Classification, ClassifierError>;
}
