//! Background Remover Client
//!
//! `POST {background_remover_url}` with the original image; the response body
//! is the processed image. An empty body counts as a failure.

use super::http::{endpoint, post_image};
use crate::types::{BackgroundRemover, CollaboratorError};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

pub struct HttpBackgroundRemover {
    http_client: Client,
    endpoint: Option<String>,
}

impl HttpBackgroundRemover {
    pub fn new(http_client: Client, endpoint_url: Option<&str>) -> Self {
        Self {
            http_client,
            endpoint: endpoint(endpoint_url),
        }
    }
}

#[async_trait]
impl BackgroundRemover for HttpBackgroundRemover {
    fn name(&self) -> &'static str {
        "BackgroundRemover"
    }

    async fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>, CollaboratorError> {
        let url = self.endpoint.as_deref().ok_or_else(|| {
            CollaboratorError::NotConfigured("background remover URL".to_string())
        })?;

        let response = post_image(&self.http_client, url, image).await?;
        let processed = response.bytes().await?;

        if processed.is_empty() {
            return Err(CollaboratorError::Parse(
                "background remover returned an empty image".to_string(),
            ));
        }

        debug!(
            original_bytes = image.len(),
            processed_bytes = processed.len(),
            "Background removed"
        );
        Ok(processed.to_vec())
    }
}
