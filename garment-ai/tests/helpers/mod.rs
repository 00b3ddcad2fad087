//! Test Helper Utilities
//!
//! Shared utilities for testing garment-ai

#![allow(dead_code)]

pub mod log_capture;
pub mod mocks;
pub mod stub_server;

// Re-export commonly used items
pub use log_capture::{capture_logs, LogCapture};
pub use mocks::{Reply, TestRig, UploadCall, CDN_BASE, PROCESSED_BYTES};
pub use stub_server::{StubRequest, StubResponse, StubServer};
