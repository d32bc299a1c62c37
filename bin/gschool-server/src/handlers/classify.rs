//! Classification adapter: classifier output merged with stored block policy.

use gschool_classifier::{Classification, Classifier};
use serde_json::Value;
use tracing::debug;

use crate::entities::{CategoryStore, SettingStore};
use crate::error::ServerError;

/// Settings key holding the global redirect for blocked pages.
pub const BLOCKED_REDIRECT_KEY: &str = "blocked_redirect";

/// Classifier result plus the policy decision for its category.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDecision {
    pub classification: Classification,
    pub blocked: bool,
    pub block_url: String,
}

/// Classify a page and look up whether its category is blocked.
///
/// The redirect URL resolves in order: the category's own `block_url`, the
/// `blocked_redirect` setting, then `default_redirect`.  Empty strings count
/// as unset at every step.  Unknown categories are never blocked.
pub async fn classify_and_check<S>(
    store: &S,
    classifier: &dyn Classifier,
    default_redirect: &str,
    url: &str,
    html: Option<&str>,
) -> Result<PolicyDecision, ServerError>
where
    S: CategoryStore + SettingStore,
{
    let classification = classifier.classify(url, html).await?;
    let policy = store.get_category(&classification.category).await?;

    let blocked = policy.as_ref().is_some_and(|c| c.blocked);
    let category_url = policy
        .and_then(|c| c.block_url)
        .filter(|u| !u.is_empty());

    let block_url = match category_url {
        Some(url) => url,
        None => match store.get_setting(BLOCKED_REDIRECT_KEY).await? {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => default_redirect.to_owned(),
        },
    };

    debug!(category = %classification.category, blocked, %block_url, "policy resolved");
    Ok(PolicyDecision {
        classification,
        blocked,
        block_url,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::SqliteStore;
    use async_trait::async_trait;
    use gschool_classifier::ClassifierError;
    use serde_json::json;

    /// Always answers with a fixed category.
    struct Fixed(&'static str);

    #[async_trait]
    impl Classifier for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn categories(&self) -> Vec<String> {
            vec![self.0.to_owned()]
        }

        async fn classify(
            &self,
            _url: &str,
            _html: Option<&str>,
        ) -> Result<Classification, ClassifierError> {
            Ok(Classification::new(self.0, None))
        }
    }

    struct Broken;

    #[async_trait]
    impl Classifier for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn categories(&self) -> Vec<String> {
            Vec::new()
        }

        async fn classify(
            &self,
            _url: &str,
            _html: Option<&str>,
        ) -> Result<Classification, ClassifierError> {
            Err(ClassifierError::InvalidResponse("offline".into()))
        }
    }

    const DEFAULT: &str = "https://default.test/blocked";

    #[tokio::test]
    async fn category_url_wins() {
        let store = SqliteStore::in_memory().await;
        store
            .upsert_category("games", true, Some("https://games.test/blocked"))
            .await
            .unwrap();
        store
            .set_setting(BLOCKED_REDIRECT_KEY, &json!("https://global.test"))
            .await
            .unwrap();

        let d = classify_and_check(&store, &Fixed("games"), DEFAULT, "u", None)
            .await
            .unwrap();
        assert!(d.blocked);
        assert_eq!(d.block_url, "https://games.test/blocked");
        assert_eq!(d.classification.category, "games");
    }

    #[tokio::test]
    async fn setting_is_used_when_category_has_no_url() {
        let store = SqliteStore::in_memory().await;
        store.upsert_category("games", true, Some("")).await.unwrap();
        store
            .set_setting(BLOCKED_REDIRECT_KEY, &json!("https://global.test"))
            .await
            .unwrap();

        let d = classify_and_check(&store, &Fixed("games"), DEFAULT, "u", None)
            .await
            .unwrap();
        assert_eq!(d.block_url, "https://global.test");
    }

    #[tokio::test]
    async fn default_is_used_last() {
        let store = SqliteStore::in_memory().await;
        store
            .set_setting(BLOCKED_REDIRECT_KEY, &json!(42))
            .await
            .unwrap();

        let d = classify_and_check(&store, &Fixed("unseen"), DEFAULT, "u", None)
            .await
            .unwrap();
        assert!(!d.blocked);
        assert_eq!(d.block_url, DEFAULT);
    }

    #[tokio::test]
    async fn classifier_failure_propagates() {
        let store = SqliteStore::in_memory().await;
        let err = classify_and_check(&store, &Broken, DEFAULT, "u", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Classifier(_)));
    }
}
