//! HTTP-backed classifier.
//!
//! POSTs `{"url": ..., "html": ...}` to a classification service and expects
//! a JSON object with at least a `category` field back.  Any additional fields
//! are kept in [`Classification::extra`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Category, Classification, Classifier, ClassifierError};

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    url: &'a str,
    html: Option<&'a str>,
}

/// [`Classifier`] that delegates to a remote HTTP service.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    categories: Vec<String>,
}

impl RemoteClassifier {
    /// Build a client for `endpoint` with a per-request `timeout`.
    ///
    /// The category list defaults to the built-in [`Category`] labels; use
    /// [`RemoteClassifier::with_categories`] when the service has its own.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            categories: Category::names(),
        })
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    async fn classify(
        &self,
        url: &str,
        html: Option<&str>,
    ) -> Result<Classification, ClassifierError> {
        debug!(endpoint = %self.endpoint, %url, has_html = html.is_some(), "remote classify");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { url, html })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "classifier service returned an error");
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: Classification = response.json().await?;
        if result.category.trim().is_empty() {
            return Err(ClassifierError::InvalidResponse(
                "empty category label".into(),
            ));
        }
        Ok(result)
    }
}
