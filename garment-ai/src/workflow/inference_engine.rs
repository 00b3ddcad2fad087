//! Inference Engine (Orchestrator)
//!
//! Runs one garment photograph through the collaborators and the fusion layer.
//!
//! # Phases
//! - **Fan-out**: background removal → upload (side path), label detection,
//!   text detection and classifier, all concurrent against the original buffer
//! - **Fan-in**: wait for every call to settle
//! - **Fusion**: domain, attributes, confidence
//! - **Assembly**: `ItemAttributeAnalysis`
//!
//! # Error Handling
//! - Label detection failure (or timeout) is fatal and returned unchanged
//! - Every other failure degrades to a safe default and is logged
//! - One failing call never cancels its siblings

use super::{processed_image_key, unique_text, PROCESSED_CONTENT_TYPE};
use crate::collaborators::{
    http::build_client, HttpBackgroundRemover, HttpClassifier, HttpImageUploader,
    HttpLabelDetector, HttpTextDetector,
};
use crate::config::{CollaboratorTimeouts, EngineConfig};
use crate::error::{InferenceError, InferenceResult};
use crate::fusion::{fuse_signals, Vocabulary};
use crate::types::{
    BackgroundRemover, ClassifierResult, CollaboratorError, CustomClassifier, ImageUploader,
    ItemAttributeAnalysis, LabelDetector, RawLabel, RawTextDetection, TextDetector,
};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// The five collaborators the engine depends on
#[derive(Clone)]
pub struct Collaborators {
    pub background_remover: Arc<dyn BackgroundRemover>,
    pub uploader: Arc<dyn ImageUploader>,
    pub label_detector: Arc<dyn LabelDetector>,
    pub text_detector: Arc<dyn TextDetector>,
    pub classifier: Arc<dyn CustomClassifier>,
}

/// Attribute-inference orchestrator
///
/// Stateless between calls; cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct InferenceEngine {
    collaborators: Collaborators,
    vocabulary: Arc<Vocabulary>,
    timeouts: CollaboratorTimeouts,
}

/// Await a collaborator call within its time budget
///
/// Elapsed budgets surface as `CollaboratorError::Timeout` so callers treat them
/// like any other failure of that collaborator.
async fn bounded<T, F>(collaborator: &str, after: Duration, call: F) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(CollaboratorError::Timeout {
            collaborator: collaborator.to_string(),
            after,
        }),
    }
}

impl InferenceEngine {
    pub fn new(
        collaborators: Collaborators,
        vocabulary: Vocabulary,
        timeouts: CollaboratorTimeouts,
    ) -> Self {
        Self {
            collaborators,
            vocabulary: Arc::new(vocabulary),
            timeouts,
        }
    }

    /// Build an engine backed by the HTTP collaborator adapters
    ///
    /// # Errors
    /// `Error::Config` when the label detector URL is missing or a timeout is invalid
    pub fn from_config(config: &EngineConfig) -> garment_common::Result<Self> {
        let endpoints = &config.collaborators;
        let label_detector_url = endpoints.require_label_detector()?;
        let timeouts = config.timeouts.to_timeouts()?;
        let client = build_client().map_err(|e| garment_common::Error::Config(e.to_string()))?;

        let classifier = HttpClassifier::new(client.clone(), endpoints.classifier_url.as_deref());
        if !classifier.is_configured() {
            info!("No classifier endpoint configured; inferring from labels and text only");
        }

        let collaborators = Collaborators {
            background_remover: Arc::new(HttpBackgroundRemover::new(
                client.clone(),
                endpoints.background_remover_url.as_deref(),
            )),
            uploader: Arc::new(HttpImageUploader::new(
                client.clone(),
                endpoints.upload_base_url.as_deref(),
                endpoints.public_base_url.as_deref(),
            )),
            label_detector: Arc::new(HttpLabelDetector::new(
                client.clone(),
                Some(label_detector_url),
            )),
            text_detector: Arc::new(HttpTextDetector::new(
                client,
                endpoints.text_detector_url.as_deref(),
            )),
            classifier: Arc::new(classifier),
        };

        Ok(Self::new(
            collaborators,
            config.vocabulary.to_vocabulary(),
            timeouts,
        ))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Infer the attributes of one garment photograph
    ///
    /// # Arguments
    /// * `image` - Original uploaded image bytes
    /// * `filename` - Original filename (used for the processed-image key only)
    ///
    /// # Errors
    /// Only `InferenceError::LabelDetection`; all other failures degrade.
    pub async fn infer(&self, image: &[u8], filename: &str) -> InferenceResult<ItemAttributeAnalysis> {
        let analysis_id = Uuid::new_v4();
        let span = info_span!("inference", %analysis_id, filename, bytes = image.len());
        self.run(image, filename).instrument(span).await
    }

    async fn run(&self, image: &[u8], filename: &str) -> InferenceResult<ItemAttributeAnalysis> {
        let (processed_image_url, labels, text, classifier) = tokio::join!(
            self.process_background(image, filename),
            self.detect_labels(image),
            self.detect_text(image),
            self.invoke_classifier(image),
        );

        // Fatal only after every sibling has settled
        let labels = labels.map_err(InferenceError::LabelDetection)?;

        let fused = fuse_signals(&labels, &text, classifier.as_ref(), &self.vocabulary);
        let attributes = fused.attributes;

        let analysis = ItemAttributeAnalysis {
            domain: fused.domain,
            detected_brand: attributes.brand.map(|a| a.value),
            detected_piece_type: attributes.piece_type.map(|a| a.value),
            detected_color: attributes.color.map(|a| a.value),
            detected_material: attributes.material.map(|a| a.value),
            confidence: fused.confidence,
            raw_labels: labels,
            detected_text: unique_text(&text),
            background_removed: processed_image_url.is_some(),
            processed_image_url,
        };

        info!(
            domain = %analysis.domain,
            overall = analysis.confidence.overall,
            brand = ?analysis.detected_brand,
            piece_type = ?analysis.detected_piece_type,
            background_removed = analysis.background_removed,
            "Inference complete"
        );

        Ok(analysis)
    }

    /// Best-effort side path: remove background, then upload
    ///
    /// Returns the public URL only when both steps succeed.
    async fn process_background(&self, image: &[u8], filename: &str) -> Option<String> {
        let remover = &self.collaborators.background_remover;
        let processed = match bounded(
            remover.name(),
            self.timeouts.background_removal,
            remover.remove_background(image),
        )
        .await
        {
            Ok(processed) => processed,
            Err(e) => {
                warn!(collaborator = remover.name(), error = %e, "Background removal failed, continuing without processed image");
                return None;
            }
        };

        let key = processed_image_key(filename, Utc::now());
        let uploader = &self.collaborators.uploader;
        match bounded(
            uploader.name(),
            self.timeouts.upload,
            uploader.upload_image(processed, &key, PROCESSED_CONTENT_TYPE),
        )
        .await
        {
            Ok(url) => {
                debug!(key = %key, url = %url, "Processed image stored");
                Some(url)
            }
            Err(e) => {
                warn!(collaborator = uploader.name(), key = %key, error = %e, "Processed image upload failed, continuing without URL");
                None
            }
        }
    }

    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<RawLabel>, CollaboratorError> {
        let detector = &self.collaborators.label_detector;
        let result = bounded(
            detector.name(),
            self.timeouts.label_detection,
            detector.detect_labels(image),
        )
        .await;

        match &result {
            Ok(labels) => debug!(collaborator = detector.name(), count = labels.len(), "Labels received"),
            Err(e) => warn!(collaborator = detector.name(), error = %e, "Label detection failed, aborting inference"),
        }
        result
    }

    async fn detect_text(&self, image: &[u8]) -> Vec<RawTextDetection> {
        let detector = &self.collaborators.text_detector;
        match bounded(
            detector.name(),
            self.timeouts.text_detection,
            detector.detect_text(image),
        )
        .await
        {
            Ok(text) => {
                debug!(collaborator = detector.name(), count = text.len(), "Text received");
                text
            }
            Err(e) => {
                warn!(collaborator = detector.name(), error = %e, "Text detection failed, continuing without text");
                Vec::new()
            }
        }
    }

    async fn invoke_classifier(&self, image: &[u8]) -> Option<ClassifierResult> {
        let classifier = &self.collaborators.classifier;
        match bounded(
            classifier.name(),
            self.timeouts.classifier,
            classifier.invoke_classifier(image),
        )
        .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(collaborator = classifier.name(), error = %e, "Classifier failed, continuing without classifier result");
                None
            }
        }
    }
}
