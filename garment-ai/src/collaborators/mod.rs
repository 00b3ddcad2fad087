//! HTTP Collaborator Adapters
//!
//! `reqwest`-based implementations of the collaborator traits in `types`.
//! The underlying models and storage are external services; these adapters
//! only speak their wire formats.
//!
//! # Adapters
//! 1. **background_remover** - `POST` image, receive processed image bytes
//! 2. **image_uploader** - `PUT` image to object storage, return public URL
//! 3. **label_detector** - `POST` image, receive `{"labels": [...]}`
//! 4. **text_detector** - `POST` image, receive `{"textDetections": [...]}`
//! 5. **classifier** - `POST` image, receive a classifier result (or nothing
//!    when no endpoint is configured)
//!
//! Time budgets are enforced by the orchestrator, not by these adapters.

pub mod background_remover;
pub mod classifier;
pub mod http;
pub mod image_uploader;
pub mod label_detector;
pub mod text_detector;

pub use background_remover::HttpBackgroundRemover;
pub use classifier::HttpClassifier;
pub use image_uploader::HttpImageUploader;
pub use label_detector::HttpLabelDetector;
pub use text_detector::HttpTextDetector;
