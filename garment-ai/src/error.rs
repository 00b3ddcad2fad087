//! Error types for garment-ai
//!
//! Only label detection is fatal to an inference. Every other collaborator
//! failure is absorbed by the orchestrator and never surfaces here.

use crate::types::CollaboratorError;
use thiserror::Error;

/// Inference error
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Label detection failed or timed out; carries the collaborator error unchanged
    #[error("Label detection failed: {0}")]
    LabelDetection(#[source] CollaboratorError),
}

impl InferenceError {
    /// Underlying collaborator error
    pub fn collaborator_error(&self) -> &CollaboratorError {
        match self {
            InferenceError::LabelDetection(err) => err,
        }
    }
}

/// Result type for inference calls
pub type InferenceResult<T> = Result<T, InferenceError>;
