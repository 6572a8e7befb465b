//! Arnia Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! filename helpers shared across all Arnia uploader components.

pub mod config;
pub mod error;
pub mod filename;
pub mod gate;
pub mod models;

// Re-export commonly used types
pub use config::UploaderConfig;
pub use error::AppError;
pub use gate::{UploadGate, UploadGuard};
pub use models::{
    FailureReason, MeasurementType, Notification, PhotoCapture, UploadContext, UploadOutcome,
};
