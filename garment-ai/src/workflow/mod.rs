//! Per-upload inference workflow
//!
//! [`InferenceEngine`] orchestrates collaborators and fusion for one
//! photograph. This module also holds the small pure helpers the engine uses
//! to assemble its output.

pub mod inference_engine;

pub use inference_engine::{Collaborators, InferenceEngine};

use crate::types::RawTextDetection;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Content type of uploaded processed images
pub const PROCESSED_CONTENT_TYPE: &str = "image/jpeg";

/// Storage key prefix of processed images
pub const PROCESSED_KEY_PREFIX: &str = "processed";

/// Reduce an uploaded filename to a storage-safe name
///
/// Directory components are dropped and every character outside
/// `[A-Za-z0-9._-]` becomes `_`. An empty result becomes `image`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}

/// `processed/<unix-ms>-<sanitized filename>`
pub fn processed_image_key(filename: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}/{}-{}",
        PROCESSED_KEY_PREFIX,
        now.timestamp_millis(),
        sanitize_filename(filename)
    )
}

/// Literal text values, each once, in first-occurrence order
///
/// A WORD detection repeating a LINE's text is dropped; blank detections are skipped.
pub fn unique_text(detections: &[RawTextDetection]) -> Vec<String> {
    let mut seen = HashSet::new();
    detections
        .iter()
        .map(|d| d.text.trim())
        .filter(|text| !text.is_empty())
        .filter(|text| seen.insert(*text))
        .map(str::to_string)
        .collect()
}
