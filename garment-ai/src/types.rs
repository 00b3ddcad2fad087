//! Core Types and Trait Definitions for garment-ai
//!
//! Defines the data model of the attribute-inference engine and the
//! collaborator traits it consumes:
//! - **Collaborators:** BackgroundRemover, ImageUploader, LabelDetector,
//!   TextDetector, CustomClassifier
//! - **Inputs to fusion:** RawLabel, RawTextDetection, ClassifierResult
//! - **Output:** ItemAttributeAnalysis
//!
//! # Architecture
//! Single pass per uploaded photograph:
//! - Collaborator calls (concurrent, individually fallible)
//! - Fusion (domain classifier, attribute resolvers, confidence calculator)
//! - Record assembly

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Collaborator Outputs
// ============================================================================

/// Label returned by the label detector
///
/// Sequence order is significant (relevance order) and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    /// Label name (e.g. "Clothing", "Sneaker", "Blue")
    pub name: String,
    /// Detector confidence (0-100)
    pub confidence: f64,
}

impl RawLabel {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Granularity of a text detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextKind {
    Line,
    Word,
}

/// Text (OCR) detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextDetection {
    pub kind: TextKind,
    pub text: String,
    pub confidence: f64,
}

impl RawTextDetection {
    pub fn line(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind: TextKind::Line,
            text: text.into(),
            confidence,
        }
    }

    pub fn word(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind: TextKind::Word,
            text: text.into(),
            confidence,
        }
    }
}

/// Coarse item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Domain {
    Apparel,
    Footwear,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Apparel => write!(f, "APPAREL"),
            Domain::Footwear => write!(f, "FOOTWEAR"),
        }
    }
}

/// Custom classifier output
///
/// Any field may be absent independently of the others. An empty string
/// carries no signal and is treated like an absent field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierResult {
    #[serde(default)]
    pub domain: Option<Domain>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub piece_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    /// Overall classifier confidence (0.0-1.0)
    pub confidence: f64,
    /// Per-attribute confidences (0-100, not rescaled)
    #[serde(default)]
    pub brand_confidence: Option<f64>,
    #[serde(default)]
    pub piece_type_confidence: Option<f64>,
    #[serde(default)]
    pub color_confidence: Option<f64>,
    #[serde(default)]
    pub material_confidence: Option<f64>,
}

impl ClassifierResult {
    /// Result carrying only an overall confidence
    pub fn with_confidence(confidence: f64) -> Self {
        Self {
            confidence,
            ..Default::default()
        }
    }
}

// ============================================================================
// Engine Output
// ============================================================================

/// Overall and per-attribute confidence scores (0-100 each)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeConfidence {
    pub overall: u8,
    pub brand: u8,
    pub piece_type: u8,
    pub color: u8,
    pub material: u8,
}

/// Structured, confidence-scored description of one garment photograph
///
/// Created once per upload, never mutated; persistence is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttributeAnalysis {
    pub domain: Domain,
    pub detected_brand: Option<String>,
    pub detected_piece_type: Option<String>,
    pub detected_color: Option<String>,
    pub detected_material: Option<String>,
    pub confidence: AttributeConfidence,
    pub raw_labels: Vec<RawLabel>,
    /// Deduplicated literal text values, first-occurrence order
    pub detected_text: Vec<String>,
    pub background_removed: bool,
    /// Present only when background removal and upload both succeeded
    pub processed_image_url: Option<String>,
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Removes the background from a garment photograph
#[async_trait::async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Collaborator name for provenance tracking
    fn name(&self) -> &'static str;

    async fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>, CollaboratorError>;
}

/// Uploads a processed image to object storage
#[async_trait::async_trait]
pub trait ImageUploader: Send + Sync {
    fn name(&self) -> &'static str;

    /// Upload `image` under `key`, returning its public URL
    async fn upload_image(
        &self,
        image: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, CollaboratorError>;
}

/// Object/label detector
///
/// The only required collaborator: its failure aborts the inference.
#[async_trait::async_trait]
pub trait LabelDetector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `[]` (not an error) when the provider reports no labels
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<RawLabel>, CollaboratorError>;
}

/// Text (OCR) detector
#[async_trait::async_trait]
pub trait TextDetector: Send + Sync {
    fn name(&self) -> &'static str;

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<RawTextDetection>, CollaboratorError>;
}

/// Custom garment classifier model
#[async_trait::async_trait]
pub trait CustomClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `Ok(None)` when no classifier endpoint is configured
    async fn invoke_classifier(
        &self,
        image: &[u8],
    ) -> Result<Option<ClassifierResult>, CollaboratorError>;
}

/// Collaborator error
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Collaborator answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Collaborator endpoint not configured
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Call exceeded its time budget
    #[error("{collaborator} timed out after {after:?}")]
    Timeout {
        collaborator: String,
        after: Duration,
    },

    /// Internal processing error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CollaboratorError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            CollaboratorError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            CollaboratorError::Network(err.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
