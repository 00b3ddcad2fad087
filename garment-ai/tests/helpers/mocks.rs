//! Mock collaborators for engine tests
//!
//! Each mock replies with a scripted outcome and records what it received so
//! tests can assert which buffer reached which collaborator.

use async_trait::async_trait;
use garment_ai::config::CollaboratorTimeouts;
use garment_ai::fusion::Vocabulary;
use garment_ai::types::{
    BackgroundRemover, ClassifierResult, CollaboratorError, CustomClassifier, ImageUploader,
    LabelDetector, RawLabel, RawTextDetection, TextDetector,
};
use garment_ai::{Collaborators, InferenceEngine};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted collaborator outcome
#[derive(Debug, Clone)]
pub enum Reply<T> {
    /// Succeed with this value
    Ok(T),
    /// Fail with `CollaboratorError::Api { status: 503, .. }`
    Fail,
    /// Never answer (exercises timeouts)
    Hang,
}

async fn play<T: Clone>(reply: &Reply<T>, name: &str) -> Result<T, CollaboratorError> {
    match reply {
        Reply::Ok(value) => Ok(value.clone()),
        Reply::Fail => Err(CollaboratorError::Api {
            status: 503,
            message: format!("{} unavailable", name),
        }),
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(CollaboratorError::Internal("hang elapsed".to_string()))
        }
    }
}

/// Buffers received by a mock, in call order
pub type Received = Arc<Mutex<Vec<Vec<u8>>>>;

pub struct MockBackgroundRemover {
    pub reply: Reply<Vec<u8>>,
    pub received: Received,
}

#[async_trait]
impl BackgroundRemover for MockBackgroundRemover {
    fn name(&self) -> &'static str {
        "MockBackgroundRemover"
    }

    async fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>, CollaboratorError> {
        self.received.lock().unwrap().push(image.to_vec());
        play(&self.reply, self.name()).await
    }
}

/// One recorded upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCall {
    pub image: Vec<u8>,
    pub key: String,
    pub content_type: String,
}

/// Replies with `{base}/{key}` on success
pub struct MockUploader {
    pub reply: Reply<String>,
    pub received: Arc<Mutex<Vec<UploadCall>>>,
}

#[async_trait]
impl ImageUploader for MockUploader {
    fn name(&self) -> &'static str {
        "MockUploader"
    }

    async fn upload_image(
        &self,
        image: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, CollaboratorError> {
        self.received.lock().unwrap().push(UploadCall {
            image,
            key: key.to_string(),
            content_type: content_type.to_string(),
        });
        let base = play(&self.reply, self.name()).await?;
        Ok(format!("{}/{}", base, key))
    }
}

pub struct MockLabelDetector {
    pub reply: Reply<Vec<RawLabel>>,
    pub received: Received,
}

#[async_trait]
impl LabelDetector for MockLabelDetector {
    fn name(&self) -> &'static str {
        "MockLabelDetector"
    }

    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<RawLabel>, CollaboratorError> {
        self.received.lock().unwrap().push(image.to_vec());
        play(&self.reply, self.name()).await
    }
}

pub struct MockTextDetector {
    pub reply: Reply<Vec<RawTextDetection>>,
    pub received: Received,
}

#[async_trait]
impl TextDetector for MockTextDetector {
    fn name(&self) -> &'static str {
        "MockTextDetector"
    }

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<RawTextDetection>, CollaboratorError> {
        self.received.lock().unwrap().push(image.to_vec());
        play(&self.reply, self.name()).await
    }
}

pub struct MockClassifier {
    pub reply: Reply<Option<ClassifierResult>>,
    pub received: Received,
}

#[async_trait]
impl CustomClassifier for MockClassifier {
    fn name(&self) -> &'static str {
        "MockClassifier"
    }

    async fn invoke_classifier(
        &self,
        image: &[u8],
    ) -> Result<Option<ClassifierResult>, CollaboratorError> {
        self.received.lock().unwrap().push(image.to_vec());
        play(&self.reply, self.name()).await
    }
}

/// Bytes every successful mock background removal returns
pub const PROCESSED_BYTES: &[u8] = b"processed-image";

/// Base URL every successful mock upload is reported under
pub const CDN_BASE: &str = "https://cdn.test/bucket";

/// Engine test rig: scripted replies plus recorders
///
/// Defaults: background removal and upload succeed, no labels, no text,
/// classifier absent, 30 s timeouts.
pub struct TestRig {
    pub background: Reply<Vec<u8>>,
    pub upload: Reply<String>,
    pub labels: Reply<Vec<RawLabel>>,
    pub text: Reply<Vec<RawTextDetection>>,
    pub classifier: Reply<Option<ClassifierResult>>,
    pub timeouts: CollaboratorTimeouts,
    pub vocabulary: Vocabulary,

    pub background_received: Received,
    pub upload_received: Arc<Mutex<Vec<UploadCall>>>,
    pub labels_received: Received,
    pub text_received: Received,
    pub classifier_received: Received,
}

impl Default for TestRig {
    fn default() -> Self {
        Self {
            background: Reply::Ok(PROCESSED_BYTES.to_vec()),
            upload: Reply::Ok(CDN_BASE.to_string()),
            labels: Reply::Ok(vec![]),
            text: Reply::Ok(vec![]),
            classifier: Reply::Ok(None),
            timeouts: CollaboratorTimeouts::uniform(Duration::from_secs(30)),
            vocabulary: Vocabulary::default(),
            background_received: Received::default(),
            upload_received: Arc::default(),
            labels_received: Received::default(),
            text_received: Received::default(),
            classifier_received: Received::default(),
        }
    }
}

impl TestRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(mut self, labels: &[(&str, f64)]) -> Self {
        self.labels = Reply::Ok(
            labels
                .iter()
                .map(|(name, confidence)| RawLabel::new(*name, *confidence))
                .collect(),
        );
        self
    }

    pub fn text_lines(mut self, lines: &[&str]) -> Self {
        self.text = Reply::Ok(
            lines
                .iter()
                .map(|line| RawTextDetection::line(*line, 95.0))
                .collect(),
        );
        self
    }

    pub fn classifier(mut self, result: ClassifierResult) -> Self {
        self.classifier = Reply::Ok(Some(result));
        self
    }

    /// Short budgets so `Reply::Hang` resolves quickly
    pub fn fast_timeouts(mut self) -> Self {
        self.timeouts = CollaboratorTimeouts::uniform(Duration::from_millis(50));
        self
    }

    pub fn engine(&self) -> InferenceEngine {
        let collaborators = Collaborators {
            background_remover: Arc::new(MockBackgroundRemover {
                reply: self.background.clone(),
                received: Arc::clone(&self.background_received),
            }),
            uploader: Arc::new(MockUploader {
                reply: self.upload.clone(),
                received: Arc::clone(&self.upload_received),
            }),
            label_detector: Arc::new(MockLabelDetector {
                reply: self.labels.clone(),
                received: Arc::clone(&self.labels_received),
            }),
            text_detector: Arc::new(MockTextDetector {
                reply: self.text.clone(),
                received: Arc::clone(&self.text_received),
            }),
            classifier: Arc::new(MockClassifier {
                reply: self.classifier.clone(),
                received: Arc::clone(&self.classifier_received),
            }),
        };

        InferenceEngine::new(collaborators, self.vocabulary.clone(), self.timeouts)
    }
}
