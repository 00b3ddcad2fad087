//! Configuration for garment-ai
//!
//! Loaded from `garment-ai.toml` (see `garment_common::config` for file
//! resolution). Every section is optional:
//! - `[logging]` log level
//! - `[collaborators]` endpoint URLs, each overridable by `GARMENT_AI_<NAME>`
//! - `[timeouts]` per-collaborator time budgets in seconds
//! - `[vocabulary]` keyword sets and mapping tables; omitted lists keep the
//!   compiled vocabulary

use crate::fusion::vocabulary::{BrandEntry, PieceTypeMapping, Vocabulary};
use crate::types::Domain;
use garment_common::config::{env_override, load_toml_config, ConfigFileResolver, LoggingConfig};
use garment_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Module name used for config file resolution (`GARMENT_AI_CONFIG`, `garment-ai.toml`)
pub const MODULE_NAME: &str = "ai";

/// Complete garment-ai configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub logging: LoggingConfig,
    pub collaborators: CollaboratorEndpoints,
    pub timeouts: TimeoutConfig,
    pub vocabulary: VocabularyConfig,
}

/// Collaborator endpoint URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorEndpoints {
    pub background_remover_url: Option<String>,
    /// Required: label detection is the only fatal collaborator
    pub label_detector_url: Option<String>,
    pub text_detector_url: Option<String>,
    /// Unset means "no classifier", which is not an error
    pub classifier_url: Option<String>,
    /// Object storage base URL that processed images are PUT under
    pub upload_base_url: Option<String>,
    /// Public base URL of uploaded images (defaults to `upload_base_url`)
    pub public_base_url: Option<String>,
}

/// Per-collaborator time budgets, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub background_removal_secs: f64,
    pub upload_secs: f64,
    pub label_detection_secs: f64,
    pub text_detection_secs: f64,
    pub classifier_secs: f64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            background_removal_secs: 30.0,
            upload_secs: 30.0,
            label_detection_secs: 15.0,
            text_detection_secs: 15.0,
            classifier_secs: 20.0,
        }
    }
}

/// Resolved collaborator timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollaboratorTimeouts {
    pub background_removal: Duration,
    pub upload: Duration,
    pub label_detection: Duration,
    pub text_detection: Duration,
    pub classifier: Duration,
}

impl Default for CollaboratorTimeouts {
    fn default() -> Self {
        // Defaults are finite and positive, so conversion cannot fail
        TimeoutConfig::default()
            .to_timeouts()
            .unwrap_or(Self::uniform(Duration::from_secs(30)))
    }
}

impl CollaboratorTimeouts {
    /// Same budget for every collaborator
    pub fn uniform(after: Duration) -> Self {
        Self {
            background_removal: after,
            upload: after,
            label_detection: after,
            text_detection: after,
            classifier: after,
        }
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Config(format!(
            "timeouts.{} must be a positive number of seconds, got {}",
            name, value
        )));
    }
    Duration::try_from_secs_f64(value).map_err(|e| {
        Error::Config(format!("timeouts.{} = {} is out of range: {}", name, value, e))
    })
}

impl TimeoutConfig {
    /// Validate and convert to durations
    pub fn to_timeouts(&self) -> Result<CollaboratorTimeouts> {
        Ok(CollaboratorTimeouts {
            background_removal: seconds("background_removal_secs", self.background_removal_secs)?,
            upload: seconds("upload_secs", self.upload_secs)?,
            label_detection: seconds("label_detection_secs", self.label_detection_secs)?,
            text_detection: seconds("text_detection_secs", self.text_detection_secs)?,
            classifier: seconds("classifier_secs", self.classifier_secs)?,
        })
    }
}

/// `[vocabulary.piece_types]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceTypeConfig {
    pub apparel: Option<Vec<PieceTypeMapping>>,
    pub footwear: Option<Vec<PieceTypeMapping>>,
}

/// `[vocabulary]` overrides; each list present replaces the compiled one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Domain when neither classifier nor labels decide
    pub default_domain: Option<Domain>,
    pub apparel_keywords: Option<Vec<String>>,
    pub footwear_keywords: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub materials: Option<Vec<String>>,
    pub brands: Option<Vec<BrandEntry>>,
    pub piece_types: PieceTypeConfig,
}

impl VocabularyConfig {
    /// Merge over the compiled vocabulary
    pub fn to_vocabulary(&self) -> Vocabulary {
        let mut vocabulary = Vocabulary::default();

        if let Some(domain) = self.default_domain {
            vocabulary.default_domain = domain;
        }
        if let Some(list) = &self.apparel_keywords {
            vocabulary.apparel_keywords = list.clone();
        }
        if let Some(list) = &self.footwear_keywords {
            vocabulary.footwear_keywords = list.clone();
        }
        if let Some(list) = &self.colors {
            vocabulary.colors = list.clone();
        }
        if let Some(list) = &self.materials {
            vocabulary.materials = list.clone();
        }
        if let Some(list) = &self.brands {
            vocabulary.brands = list.clone();
        }
        if let Some(list) = &self.piece_types.apparel {
            vocabulary.apparel_piece_types = list.clone();
        }
        if let Some(list) = &self.piece_types.footwear {
            vocabulary.footwear_piece_types = list.clone();
        }

        vocabulary
    }
}

impl EngineConfig {
    /// Resolve, load and apply environment overrides
    ///
    /// **Priority:** command line → `GARMENT_AI_CONFIG` → platform config dir → defaults
    pub fn load(cli_path: Option<PathBuf>) -> Result<Self> {
        let resolver = ConfigFileResolver::new(MODULE_NAME).with_cli_arg(cli_path);
        let resolved = resolver.resolve();
        if let Some((path, source)) = &resolved {
            info!("Config file {} (from {:?})", path.display(), source);
        }

        let mut config: EngineConfig = load_toml_config(resolved.as_ref().map(|(p, _)| p.as_path()))?;
        config.collaborators.apply_env_overrides();
        Ok(config)
    }
}

impl CollaboratorEndpoints {
    /// Environment variables win over TOML values
    pub fn apply_env_overrides(&mut self) {
        let fields: [(&str, &mut Option<String>); 6] = [
            ("GARMENT_AI_BACKGROUND_REMOVER_URL", &mut self.background_remover_url),
            ("GARMENT_AI_LABEL_DETECTOR_URL", &mut self.label_detector_url),
            ("GARMENT_AI_TEXT_DETECTOR_URL", &mut self.text_detector_url),
            ("GARMENT_AI_CLASSIFIER_URL", &mut self.classifier_url),
            ("GARMENT_AI_UPLOAD_BASE_URL", &mut self.upload_base_url),
            ("GARMENT_AI_PUBLIC_BASE_URL", &mut self.public_base_url),
        ];

        for (name, field) in fields {
            if let Some(value) = env_override(name) {
                info!("{} loaded from environment variable", name);
                *field = Some(value);
            }
        }
    }

    /// Label detector URL, or a configuration error explaining how to set it
    pub fn require_label_detector(&self) -> Result<&str> {
        self.label_detector_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "Label detector endpoint not configured. Please configure using one of:\n\
                     1. Environment: GARMENT_AI_LABEL_DETECTOR_URL=https://...\n\
                     2. TOML config: [collaborators] label_detector_url = \"https://...\""
                        .to_string(),
                )
            })
    }
}
