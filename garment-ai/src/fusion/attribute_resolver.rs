//! Attribute Resolvers - Source-Priority Chain
//!
//! Each attribute is resolved through the same chain, stopping at the first
//! tier with a non-empty value:
//! 1. Classifier field (verbatim)
//! 2. Fallback source (text for brand, labels for everything else)
//! 3. Absent
//!
//! Brand never consults labels; piece type, color and material never consult text.

use super::vocabulary::Vocabulary;
use crate::types::{ClassifierResult, Domain, RawLabel, RawTextDetection};
use tracing::{debug, warn};

/// Where a resolved attribute value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSource {
    Classifier,
    Text,
    Labels,
}

impl AttributeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeSource::Classifier => "classifier",
            AttributeSource::Text => "text",
            AttributeSource::Labels => "labels",
        }
    }
}

/// Attribute value with provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    pub value: String,
    pub source: AttributeSource,
}

impl ResolvedAttribute {
    fn new(value: impl Into<String>, source: AttributeSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

/// The four resolved attributes of one item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAttributes {
    pub brand: Option<ResolvedAttribute>,
    pub piece_type: Option<ResolvedAttribute>,
    pub color: Option<ResolvedAttribute>,
    pub material: Option<ResolvedAttribute>,
}

impl ResolvedAttributes {
    /// Number of attributes with a value
    pub fn resolved_count(&self) -> usize {
        [&self.brand, &self.piece_type, &self.color, &self.material]
            .iter()
            .filter(|a| a.is_some())
            .count()
    }
}

/// Treat absent and blank strings alike
fn signal(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// First-non-empty-wins priority chain
///
/// `classifier` is tier 1, `fallback` tier 2. When both are present and
/// disagree the classifier value still wins and the conflict is logged.
pub fn resolve(
    field: &str,
    classifier: Option<&str>,
    fallback: Option<ResolvedAttribute>,
) -> Option<ResolvedAttribute> {
    match (classifier, fallback) {
        (Some(value), Some(other)) => {
            if !value.trim().eq_ignore_ascii_case(other.value.trim()) {
                let similarity = strsim::normalized_levenshtein(
                    &value.to_lowercase(),
                    &other.value.to_lowercase(),
                );
                warn!(
                    field,
                    classifier_value = value,
                    fallback_value = %other.value,
                    fallback_source = other.source.as_str(),
                    similarity,
                    "Conflict between classifier and fallback source, keeping classifier value"
                );
            }
            Some(ResolvedAttribute::new(value, AttributeSource::Classifier))
        }
        (Some(value), None) => Some(ResolvedAttribute::new(value, AttributeSource::Classifier)),
        (None, Some(other)) => {
            debug!(field, value = %other.value, source = other.source.as_str(), "Resolved from fallback source");
            Some(other)
        }
        (None, None) => None,
    }
}

/// Brand: classifier → registered brand found in detected text
pub fn resolve_brand(
    classifier: Option<&ClassifierResult>,
    text: &[RawTextDetection],
    vocabulary: &Vocabulary,
) -> Option<ResolvedAttribute> {
    let fallback = vocabulary
        .brand_in_text(text)
        .map(|brand| ResolvedAttribute::new(brand.display.clone(), AttributeSource::Text));
    resolve("brand", signal(classifier.and_then(|c| c.brand.as_ref())), fallback)
}

/// Piece type: classifier → first label mapped in the domain's table
pub fn resolve_piece_type(
    classifier: Option<&ClassifierResult>,
    labels: &[RawLabel],
    domain: Domain,
    vocabulary: &Vocabulary,
) -> Option<ResolvedAttribute> {
    let fallback = labels
        .iter()
        .find_map(|label| vocabulary.piece_type_for_label(domain, &label.name))
        .map(|canonical| ResolvedAttribute::new(canonical, AttributeSource::Labels));
    resolve(
        "piece_type",
        signal(classifier.and_then(|c| c.piece_type.as_ref())),
        fallback,
    )
}

/// Color: classifier → first label in the color vocabulary
pub fn resolve_color(
    classifier: Option<&ClassifierResult>,
    labels: &[RawLabel],
    vocabulary: &Vocabulary,
) -> Option<ResolvedAttribute> {
    let fallback = labels
        .iter()
        .find_map(|label| vocabulary.color_for_label(&label.name))
        .map(|color| ResolvedAttribute::new(color, AttributeSource::Labels));
    resolve("color", signal(classifier.and_then(|c| c.color.as_ref())), fallback)
}

/// Material: classifier → first label in the material vocabulary
pub fn resolve_material(
    classifier: Option<&ClassifierResult>,
    labels: &[RawLabel],
    vocabulary: &Vocabulary,
) -> Option<ResolvedAttribute> {
    let fallback = labels
        .iter()
        .find_map(|label| vocabulary.material_for_label(&label.name))
        .map(|material| ResolvedAttribute::new(material, AttributeSource::Labels));
    resolve(
        "material",
        signal(classifier.and_then(|c| c.material.as_ref())),
        fallback,
    )
}

/// Run all four resolvers
pub fn resolve_attributes(
    classifier: Option<&ClassifierResult>,
    labels: &[RawLabel],
    text: &[RawTextDetection],
    domain: Domain,
    vocabulary: &Vocabulary,
) -> ResolvedAttributes {
    ResolvedAttributes {
        brand: resolve_brand(classifier, text, vocabulary),
        piece_type: resolve_piece_type(classifier, labels, domain, vocabulary),
        color: resolve_color(classifier, labels, vocabulary),
        material: resolve_material(classifier, labels, vocabulary),
    }
}
