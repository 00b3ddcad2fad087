//! Custom Classifier Client
//!
//! Invokes the custom garment classifier model endpoint.
//!
//! # Behavior
//! - No endpoint configured → `Ok(None)` (classifier absent, not an error)
//! - Response body is a classifier result object, or `null` when the model
//!   declines to classify
//! - Transport, status and parse failures are returned as errors; the
//!   orchestrator degrades them to "no classifier result"

use super::http::{endpoint, post_image, read_json};
use crate::types::{ClassifierResult, CollaboratorError, CustomClassifier};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

pub struct HttpClassifier {
    http_client: Client,
    endpoint: Option<String>,
}

impl HttpClassifier {
    pub fn new(http_client: Client, endpoint_url: Option<&str>) -> Self {
        Self {
            http_client,
            endpoint: endpoint(endpoint_url),
        }
    }

    /// Whether a classifier endpoint is configured
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

#[async_trait]
impl CustomClassifier for HttpClassifier {
    fn name(&self) -> &'static str {
        "CustomClassifier"
    }

    async fn invoke_classifier(
        &self,
        image: &[u8],
    ) -> Result<Option<ClassifierResult>, CollaboratorError> {
        let Some(url) = self.endpoint.as_deref() else {
            debug!("No classifier endpoint configured, skipping classifier");
            return Ok(None);
        };

        let response = post_image(&self.http_client, url, image).await?;
        let result: Option<ClassifierResult> = read_json(response).await?;

        debug!(
            has_result = result.is_some(),
            confidence = result.as_ref().map(|r| r.confidence),
            "Classifier responded"
        );
        Ok(result)
    }
}
