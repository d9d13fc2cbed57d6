// src/core/fs_ops.rs
//! File system helpers shared by configuration, database setup and the CLI

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::app_log;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() || path.exists() {
            return Ok(());
        }

        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        app_log!(info, "Created directory: {}", path.display());
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_dir_exists_creates_nested_dirs() {
        let base = std::env::temp_dir().join(format!("jobswipe-fs-{}", uuid::Uuid::new_v4()));
        let nested = base.join("a").join("b");

        FsOps::ensure_dir_exists(&nested).await.unwrap();
        assert!(nested.is_dir());
        // second call is a no-op
        FsOps::ensure_dir_exists(&nested).await.unwrap();

        tokio::fs::remove_dir_all(&base).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_missing_file_reports_path() {
        let err = FsOps::read_file_safe(Path::new("/nonexistent/jobs.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jobs.json"));
    }
}
