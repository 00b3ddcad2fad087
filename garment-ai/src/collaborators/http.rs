//! Shared HTTP plumbing for collaborator adapters

use crate::types::CollaboratorError;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// User-Agent header sent to every collaborator
const USER_AGENT: &str = concat!("garment-ai/", env!("CARGO_PKG_VERSION"));

/// Content type of raw image request bodies
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Maximum number of error-body characters kept in `CollaboratorError::Api`
const ERROR_BODY_LIMIT: usize = 200;

/// Build the HTTP client shared by all adapters
pub fn build_client() -> Result<Client, CollaboratorError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(USER_AGENT),
    );

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| CollaboratorError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Fail with `CollaboratorError::Api` on a non-success status
pub async fn check_status(response: Response) -> Result<Response, CollaboratorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    Err(CollaboratorError::Api {
        status: status.as_u16(),
        message,
    })
}

/// `POST` raw image bytes
pub async fn post_image(
    client: &Client,
    url: &str,
    image: &[u8],
) -> Result<Response, CollaboratorError> {
    debug!(url, bytes = image.len(), "POST image to collaborator");

    let response = client
        .post(url)
        .header(header::CONTENT_TYPE, OCTET_STREAM)
        .body(image.to_vec())
        .send()
        .await?;

    check_status(response).await
}

/// Parse a JSON body, mapping failures to `CollaboratorError::Parse`
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CollaboratorError> {
    let bytes = response.bytes().await?;
    parse_json(&bytes)
}

pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CollaboratorError> {
    serde_json::from_slice(bytes).map_err(|e| CollaboratorError::Parse(e.to_string()))
}

/// Trimmed, non-empty endpoint
pub fn endpoint(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}
