//! Confidence Calculator
//!
//! Computes the overall score and the four per-attribute scores (0-100).
//!
//! # Scoring
//! - **Overall:** `round(classifier.confidence * 100)`, or [`BASE_OVERALL_CONFIDENCE`]
//!   without a classifier result
//! - **Per attribute:** 0 when the attribute is unresolved; otherwise the
//!   classifier's explicit per-attribute confidence, or the attribute default
//!
//! Attribute defaults differ per attribute because their fallback detections
//! differ in reliability. They are independent of the overall score.

use super::attribute_resolver::{ResolvedAttribute, ResolvedAttributes};
use crate::types::{AttributeConfidence, ClassifierResult};

/// Overall confidence when no classifier result is available
pub const BASE_OVERALL_CONFIDENCE: u8 = 50;

/// Default brand confidence when no explicit score is supplied
pub const DEFAULT_BRAND_CONFIDENCE: u8 = 70;
/// Default piece-type confidence when no explicit score is supplied
pub const DEFAULT_PIECE_TYPE_CONFIDENCE: u8 = 80;
/// Default color confidence when no explicit score is supplied
pub const DEFAULT_COLOR_CONFIDENCE: u8 = 85;
/// Default material confidence when no explicit score is supplied
pub const DEFAULT_MATERIAL_CONFIDENCE: u8 = 60;

/// Round and clamp a score into `min..=100`; non-finite input yields `None`
fn to_score(value: f64, min: u8) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(min as f64, 100.0) as u8)
}

fn overall_confidence(classifier: Option<&ClassifierResult>) -> u8 {
    classifier
        .and_then(|c| to_score(c.confidence * 100.0, 0))
        .unwrap_or(BASE_OVERALL_CONFIDENCE)
}

/// Score one attribute
///
/// A resolved attribute never scores 0, so an explicit score is clamped to at
/// least 1 to keep value presence and non-zero confidence coupled.
fn attribute_confidence(
    resolved: Option<&ResolvedAttribute>,
    explicit: Option<f64>,
    default: u8,
) -> u8 {
    if resolved.is_none() {
        return 0;
    }
    explicit.and_then(|v| to_score(v, 1)).unwrap_or(default)
}

/// Compute overall and per-attribute confidence
pub fn compute_confidence(
    classifier: Option<&ClassifierResult>,
    resolved: &ResolvedAttributes,
) -> AttributeConfidence {
    AttributeConfidence {
        overall: overall_confidence(classifier),
        brand: attribute_confidence(
            resolved.brand.as_ref(),
            classifier.and_then(|c| c.brand_confidence),
            DEFAULT_BRAND_CONFIDENCE,
        ),
        piece_type: attribute_confidence(
            resolved.piece_type.as_ref(),
            classifier.and_then(|c| c.piece_type_confidence),
            DEFAULT_PIECE_TYPE_CONFIDENCE,
        ),
        color: attribute_confidence(
            resolved.color.as_ref(),
            classifier.and_then(|c| c.color_confidence),
            DEFAULT_COLOR_CONFIDENCE,
        ),
        material: attribute_confidence(
            resolved.material.as_ref(),
            classifier.and_then(|c| c.material_confidence),
            DEFAULT_MATERIAL_CONFIDENCE,
        ),
    }
}
