//! # Garment Common Library
//!
//! Shared code for the garment services including:
//! - Error and result types
//! - Configuration file resolution and TOML loading
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
