//! Label Detector Client
//!
//! Sends the original photograph to the object/label detection service.
//!
//! # Wire format
//! - Request: `POST {label_detector_url}`, body = raw image bytes
//! - Response: `{"labels": [{"name": "Sneaker", "confidence": 89.2}, ...]}`
//!
//! A response without labels is an empty list, not an error. Label order is
//! kept exactly as returned.

use super::http::{endpoint, post_image, read_json};
use crate::types::{CollaboratorError, LabelDetector, RawLabel};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LabelResponse {
    #[serde(default)]
    labels: Vec<RawLabel>,
}

pub struct HttpLabelDetector {
    http_client: Client,
    endpoint: Option<String>,
}

impl HttpLabelDetector {
    pub fn new(http_client: Client, endpoint_url: Option<&str>) -> Self {
        Self {
            http_client,
            endpoint: endpoint(endpoint_url),
        }
    }
}

#[async_trait]
impl LabelDetector for HttpLabelDetector {
    fn name(&self) -> &'static str {
        "LabelDetector"
    }

    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<RawLabel>, CollaboratorError> {
        let url = self
            .endpoint
            .as_deref()
            .ok_or_else(|| CollaboratorError::NotConfigured("label detector URL".to_string()))?;

        let response = post_image(&self.http_client, url, image).await?;
        let parsed: LabelResponse = read_json(response).await?;

        debug!(count = parsed.labels.len(), "Labels detected");
        Ok(parsed.labels)
    }
}
