//! Transient staging of accepted uploads.
//!
//! An accepted file is written to a uniquely named location inside the
//! staging directory and lives exactly as long as the request. Release is
//! guaranteed on every exit path: the happy path removes the file
//! explicitly, and the drop guard covers early returns, provider failures,
//! and panics.

use std::path::{Path, PathBuf};

use minuta_core::AppError;
use uuid::Uuid;

/// Staged audio file with scoped lifetime
#[derive(Debug)]
pub struct StagedAudio {
    path: PathBuf,
    removed: bool,
}

impl StagedAudio {
    /// Write `data` to a per-request-unique file inside `staging_dir`.
    pub async fn stage(
        staging_dir: &Path,
        extension: &str,
        data: &[u8],
    ) -> Result<Self, AppError> {
        let filename = format!("meeting_{}.{}", Uuid::new_v4(), extension);
        let path = staging_dir.join(filename);

        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to stage upload at {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), size_bytes = data.len(), "Staged upload");

        Ok(StagedAudio {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the staged file now instead of waiting for the drop guard.
    pub async fn remove(mut self) {
        self.removed = true;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove staged upload"
                );
            }
        } else {
            tracing::debug!(path = %self.path.display(), "Removed staged upload");
        }
    }
}

impl Drop for StagedAudio {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove staged upload during drop"
                );
            }
        }
    }
}
