//! Domain Classifier
//!
//! Infers the coarse category (APPAREL vs FOOTWEAR) of the photographed item.
//!
//! Priority:
//! 1. Classifier `domain`, verbatim
//! 2. First label (detector order) found in a domain keyword set
//! 3. Configured default domain

use super::vocabulary::Vocabulary;
use crate::types::{ClassifierResult, Domain, RawLabel};
use tracing::debug;

/// Classify the item domain
pub fn classify_domain(
    labels: &[RawLabel],
    classifier: Option<&ClassifierResult>,
    vocabulary: &Vocabulary,
) -> Domain {
    if let Some(domain) = classifier.and_then(|c| c.domain) {
        debug!(%domain, "Domain taken from classifier");
        return domain;
    }

    for label in labels {
        if let Some(domain) = vocabulary.domain_for_label(&label.name) {
            debug!(%domain, label = %label.name, "Domain inferred from label");
            return domain;
        }
    }

    debug!(
        domain = %vocabulary.default_domain,
        label_count = labels.len(),
        "No domain keyword in labels, using default domain"
    );
    vocabulary.default_domain
}
