//! On-disk response cache for the data source

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::DomainError;

/// File count and size of the cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskCacheStats {
    pub cache_dir: PathBuf,
    pub exists: bool,
    pub file_count: u64,
    pub size_bytes: u64,
}

impl DiskCacheStats {
    /// Size in MiB rounded to two decimals
    pub fn size_mb(&self) -> f64 {
        (self.size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
    }
}

/// Stores raw response bodies under a directory, one file per request URL.
///
/// With a TTL, entries whose file is older than the TTL are treated as absent
/// and get overwritten by the next fetch.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    ttl: Option<Duration>,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Cached body for `url`, if present, fresh and readable
    pub async fn read(&self, url: &str) -> Option<String> {
        let path = self.path_for(url);

        if let Some(ttl) = self.ttl {
            if !is_fresh(&path, ttl).await {
                return None;
            }
        }

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                debug!(url = %url, path = %path.display(), "Disk cache hit");
                Some(body)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read disk cache entry");
                None
            }
        }
    }

    /// Store the body for `url`
    pub async fn write(&self, url: &str, body: &str) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::cache(format!(
                "Failed to create cache directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.path_for(url);
        tokio::fs::write(&path, body).await.map_err(|e| {
            DomainError::cache(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Walk the cache directory and total file count and size
    pub async fn stats(&self) -> Result<DiskCacheStats, DomainError> {
        let dir = self.dir.clone();

        tokio::task::spawn_blocking(move || scan(&dir))
            .await
            .map_err(|e| DomainError::internal(format!("Cache scan task failed: {}", e)))?
    }
}

async fn is_fresh(path: &Path, ttl: Duration) -> bool {
    let modified = match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(_) => return false,
    };

    match modified.elapsed() {
        Ok(age) if age >= ttl => {
            debug!(path = %path.display(), age_secs = age.as_secs(), "Disk cache entry expired");
            false
        }
        // A modification time in the future counts as fresh
        _ => true,
    }
}

fn scan(dir: &Path) -> Result<DiskCacheStats, DomainError> {
    if !dir.is_dir() {
        return Ok(DiskCacheStats {
            cache_dir: dir.to_path_buf(),
            exists: false,
            file_count: 0,
            size_bytes: 0,
        });
    }

    let mut file_count = 0;
    let mut size_bytes = 0;
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|e| {
            DomainError::cache(format!("Failed to read {}: {}", current.display(), e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| DomainError::cache(e.to_string()))?;
            let metadata = entry
                .metadata()
                .map_err(|e| DomainError::cache(e.to_string()))?;

            if metadata.is_dir() {
                pending.push(entry.path());
            } else if metadata.is_file() {
                file_count += 1;
                size_bytes += metadata.len();
            }
        }
    }

    Ok(DiskCacheStats {
        cache_dir: dir.to_path_buf(),
        exists: true,
        file_count,
        size_bytes,
    })
}
