//! garment-ai library interface
//!
//! Attribute-inference engine for uploaded garment photographs: orchestrates
//! the detection collaborators and fuses their outputs into one
//! confidence-scored `ItemAttributeAnalysis`.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod fusion;
pub mod types;
pub mod workflow;

pub use crate::config::EngineConfig;
pub use crate::error::{InferenceError, InferenceResult};
pub use crate::types::{
    AttributeConfidence, ClassifierResult, Domain, ItemAttributeAnalysis, RawLabel,
    RawTextDetection, TextKind,
};
pub use crate::workflow::{Collaborators, InferenceEngine};
