//! Source-resolver abstraction
//!
//! This module defines the platform seam for turning an indirect photo
//! reference (a content-provider style URI) into something readable. The
//! pipeline depends only on this trait, never on concrete platform APIs.

use async_trait::async_trait;
use std::path::PathBuf;

/// Platform capability for resolving indirect photo references.
///
/// **Contract:** best-effort resolve or copy, never error past this
/// boundary. Implementations log failures and return `None`; the caller
/// falls through to the next step of the chain.
#[async_trait]
pub trait SourceResolver: Send + Sync {
    /// Resolve an indirect reference to its underlying direct path via
    /// platform metadata, if the platform can.
    async fn resolve_direct_path(&self, reference: &str) -> Option<PathBuf>;

    /// Copy the referenced bytes into an application-private cache location
    /// under the given name and return the path of the copy.
    async fn copy_to_cache(&self, reference: &str, file_name: &str) -> Option<PathBuf>;
}
