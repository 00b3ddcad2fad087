//! Object Storage Uploader
//!
//! Stores processed images with `PUT {upload_base_url}/{key}` and reports
//! their public URL as `{public_base_url}/{key}`. The public base defaults to
//! the upload base.

use super::http::{check_status, endpoint};
use crate::types::{CollaboratorError, ImageUploader};
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

pub struct HttpImageUploader {
    http_client: Client,
    upload_base_url: Option<String>,
    public_base_url: Option<String>,
}

impl HttpImageUploader {
    pub fn new(
        http_client: Client,
        upload_base_url: Option<&str>,
        public_base_url: Option<&str>,
    ) -> Self {
        let upload_base_url = endpoint(upload_base_url);
        let public_base_url = endpoint(public_base_url).or_else(|| upload_base_url.clone());
        Self {
            http_client,
            upload_base_url,
            public_base_url,
        }
    }
}

fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    fn name(&self) -> &'static str {
        "ImageUploader"
    }

    async fn upload_image(
        &self,
        image: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, CollaboratorError> {
        let (Some(upload_base), Some(public_base)) =
            (self.upload_base_url.as_deref(), self.public_base_url.as_deref())
        else {
            return Err(CollaboratorError::NotConfigured("upload base URL".to_string()));
        };

        let bytes = image.len();
        let response = self
            .http_client
            .put(join_url(upload_base, key))
            .header(header::CONTENT_TYPE, content_type)
            .body(image)
            .send()
            .await?;
        check_status(response).await?;

        let url = join_url(public_base, key);
        debug!(key, bytes, url = %url, "Image uploaded");
        Ok(url)
    }
}
