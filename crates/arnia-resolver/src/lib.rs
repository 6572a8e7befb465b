//! Source-reference resolution for the upload pipeline.
//!
//! A capture source may hand over a direct file path, a `file://` URI, or an
//! indirect provider-style reference. [`resolve_source`] walks the fallback
//! chain: direct path, platform resolution, cache copy, and finally the
//! original reference unchanged. It never errors; the worst case is a
//! degraded result that the HTTP layer will fail on naturally.

pub mod local;
pub mod traits;

pub use local::LocalFiles;
pub use traits::SourceResolver;

use arnia_core::filename::{sanitize_filename, unix_millis};

/// Result of resolving a source reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Location the HTTP layer should read bytes from.
    pub location: String,
    /// True when every resolution step failed and `location` is the
    /// original reference, returned best-effort.
    pub degraded: bool,
}

/// Walk the resolution fallback chain for one source reference.
///
/// `file_name` is the already-ensured upload filename; cache copies are
/// stored under a timestamp-prefixed, sanitized variant of it to stay
/// collision-resistant.
pub async fn resolve_source(
    resolver: &dyn SourceResolver,
    reference: &str,
    file_name: &str,
) -> ResolvedSource {
    if is_direct_reference(reference) {
        return ResolvedSource {
            location: strip_file_scheme(reference).to_string(),
            degraded: false,
        };
    }

    if let Some(path) = resolver.resolve_direct_path(reference).await {
        return ResolvedSource {
            location: path.to_string_lossy().into_owned(),
            degraded: false,
        };
    }

    let cache_name = format!("{}_{}", unix_millis(), sanitize_filename(file_name, "photo"));
    if let Some(path) = resolver.copy_to_cache(reference, &cache_name).await {
        return ResolvedSource {
            location: path.to_string_lossy().into_owned(),
            degraded: false,
        };
    }

    tracing::warn!(
        reference = %reference,
        "Source resolution degraded: using original reference unchanged"
    );
    ResolvedSource {
        location: reference.to_string(),
        degraded: true,
    }
}

/// A reference is direct when it carries no scheme, or the `file` scheme.
pub fn is_direct_reference(reference: &str) -> bool {
    !reference.contains("://") || reference.starts_with("file://")
}

/// Strip a leading `file://` scheme, leaving other references untouched.
pub fn strip_file_scheme(reference: &str) -> &str {
    reference.strip_prefix("file://").unwrap_or(reference)
}
