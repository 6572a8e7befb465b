//! Data models for the uploader
//!
//! Each sub-module covers one step of the photo-to-upload pipeline: the
//! acquired photo, the metadata that accompanies it, and the terminal outcome
//! reported back to the caller.

mod capture;
mod context;
mod outcome;

pub use capture::*;
pub use context::*;
pub use outcome::*;
