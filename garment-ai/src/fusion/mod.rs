//! Fusion Layer
//!
//! Combines label, text and classifier signals into one attribute record:
//! - **domain_classifier** - APPAREL vs FOOTWEAR
//! - **attribute_resolver** - brand, piece type, color, material via source priority
//! - **confidence_calculator** - overall and per-attribute scores
//! - **vocabulary** - keyword sets and mapping tables (configuration data)

pub mod attribute_resolver;
pub mod confidence_calculator;
pub mod domain_classifier;
pub mod vocabulary;

pub use attribute_resolver::{AttributeSource, ResolvedAttribute, ResolvedAttributes};
pub use confidence_calculator::compute_confidence;
pub use domain_classifier::classify_domain;
pub use vocabulary::{BrandEntry, PieceTypeMapping, Vocabulary};

use crate::types::{AttributeConfidence, ClassifierResult, Domain, RawLabel, RawTextDetection};
use tracing::debug;

/// Fused attributes of one item, before record assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusedAttributes {
    pub domain: Domain,
    pub attributes: ResolvedAttributes,
    pub confidence: AttributeConfidence,
}

/// Run domain classification, the four resolvers and the confidence calculator
pub fn fuse_signals(
    labels: &[RawLabel],
    text: &[RawTextDetection],
    classifier: Option<&ClassifierResult>,
    vocabulary: &Vocabulary,
) -> FusedAttributes {
    debug!(
        labels = labels.len(),
        text_detections = text.len(),
        classifier = classifier.is_some(),
        "Starting fusion"
    );

    let domain = classify_domain(labels, classifier, vocabulary);
    let attributes =
        attribute_resolver::resolve_attributes(classifier, labels, text, domain, vocabulary);
    let confidence = compute_confidence(classifier, &attributes);

    debug!(
        %domain,
        resolved = attributes.resolved_count(),
        overall = confidence.overall,
        "Fusion complete"
    );

    FusedAttributes {
        domain,
        attributes,
        confidence,
    }
}
