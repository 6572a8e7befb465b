use crate::traits::SourceResolver;
use crate::strip_file_scheme;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem resolver.
///
/// Treats `file://` references and bare paths as direct; anything else can
/// only be satisfied by the cache-copy step, and only when the reference
/// happens to name a readable path.
#[derive(Clone)]
pub struct LocalFiles {
    cache_dir: PathBuf,
}

impl LocalFiles {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

#[async_trait]
impl SourceResolver for LocalFiles {
    async fn resolve_direct_path(&self, reference: &str) -> Option<PathBuf> {
        let path = PathBuf::from(strip_file_scheme(reference));
        match fs::try_exists(&path).await {
            Ok(true) => Some(path),
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(reference = %reference, error = %e, "Stat failed for source reference");
                None
            }
        }
    }

    async fn copy_to_cache(&self, reference: &str, file_name: &str) -> Option<PathBuf> {
        let source = PathBuf::from(strip_file_scheme(reference));

        let data = match fs::read(&source).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(reference = %reference, error = %e, "Failed to read source for cache copy");
                return None;
            }
        };

        if let Err(e) = fs::create_dir_all(&self.cache_dir).await {
            tracing::warn!(dir = %self.cache_dir.display(), error = %e, "Failed to create cache directory");
            return None;
        }

        let target = self.cache_dir.join(file_name);
        match fs::write(&target, &data).await {
            Ok(()) => {
                tracing::info!(
                    path = %target.display(),
                    size_bytes = data.len(),
                    "Copied source reference into cache"
                );
                Some(target)
            }
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "Failed to write cache copy");
                None
            }
        }
    }
}
