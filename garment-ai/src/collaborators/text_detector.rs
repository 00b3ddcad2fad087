//! Text (OCR) Detector Client
//!
//! - Request: `POST {text_detector_url}`, body = raw image bytes
//! - Response: `{"textDetections": [{"type": "LINE", "detectedText": "NIKE", "confidence": 97.1}]}`

use super::http::{endpoint, post_image, read_json};
use crate::types::{CollaboratorError, RawTextDetection, TextDetector, TextKind};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextResponse {
    #[serde(default)]
    text_detections: Vec<WireTextDetection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTextDetection {
    #[serde(rename = "type")]
    kind: TextKind,
    detected_text: String,
    #[serde(default)]
    confidence: f64,
}

impl From<WireTextDetection> for RawTextDetection {
    fn from(wire: WireTextDetection) -> Self {
        RawTextDetection {
            kind: wire.kind,
            text: wire.detected_text,
            confidence: wire.confidence,
        }
    }
}

pub struct HttpTextDetector {
    http_client: Client,
    endpoint: Option<String>,
}

impl HttpTextDetector {
    pub fn new(http_client: Client, endpoint_url: Option<&str>) -> Self {
        Self {
            http_client,
            endpoint: endpoint(endpoint_url),
        }
    }
}

#[async_trait]
impl TextDetector for HttpTextDetector {
    fn name(&self) -> &'static str {
        "TextDetector"
    }

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<RawTextDetection>, CollaboratorError> {
        let url = self
            .endpoint
            .as_deref()
            .ok_or_else(|| CollaboratorError::NotConfigured("text detector URL".to_string()))?;

        let response = post_image(&self.http_client, url, image).await?;
        let parsed: TextResponse = read_json(response).await?;

        debug!(count = parsed.text_detections.len(), "Text detected");
        Ok(parsed.text_detections.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::http::parse_json;

    #[test]
    fn test_parse_text_detections() {
        let parsed: TextResponse = parse_json(
            br#"{"textDetections":[
                {"type":"LINE","detectedText":"JUST DO IT","confidence":97.0},
                {"type":"WORD","detectedText":"JUST","confidence":96.5}
            ]}"#,
        )
        .unwrap();

        let detections: Vec<RawTextDetection> =
            parsed.text_detections.into_iter().map(Into::into).collect();
        assert_eq!(detections[0], RawTextDetection::line("JUST DO IT", 97.0));
        assert_eq!(detections[1].kind, TextKind::Word);
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let result: Result<TextResponse, _> = parse_json(
            br#"{"textDetections":[{"type":"PARAGRAPH","detectedText":"x"}]}"#,
        );
        assert!(matches!(result, Err(CollaboratorError::Parse(_))));
    }
}
