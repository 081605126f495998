// src/infrastructure/media_storage.rs
//
// Media file storage
//
// CRITICAL RULES:
// - Stored names are flat: no directories, no traversal
// - Existing files are never overwritten
// - Removing a missing file is not an error
// - Errors carry the storage layer's own message

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use url::Url;

use crate::config::CatalogConfig;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait MediaStorage: Send + Sync {
    fn upload(&self, filename: &str, bytes: &[u8]) -> AppResult<()>;
    fn remove(&self, filename: &str) -> AppResult<()>;
    fn public_url(&self, filename: &str) -> String;
}

/// Stores uploads in a local directory served under a base URL
pub struct LocalMediaStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalMediaStorage {
    pub fn new(root: PathBuf, public_base: impl Into<String>) -> Self {
        Self {
            root,
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.media_dir(), config.public_media_base())
    }

    fn validate_filename(filename: &str) -> AppResult<()> {
        let trimmed = filename.trim();
        if trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed.contains('\0')
        {
            return Err(AppError::Storage(format!("Invalid file name: {:?}", filename)));
        }
        Ok(())
    }
}

impl MediaStorage for LocalMediaStorage {
    fn upload(&self, filename: &str, bytes: &[u8]) -> AppResult<()> {
        Self::validate_filename(filename)?;

        std::fs::create_dir_all(&self.root)
            .map_err(|e| AppError::Storage(format!("Cannot create media directory: {}", e)))?;

        let path = self.root.join(filename);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    AppError::Storage(format!("The resource already exists: {}", filename))
                }
                _ => AppError::Storage(e.to_string()),
            })?;

        file.write_all(bytes)
            .and_then(|_| file.sync_all())
            .map_err(|e| AppError::Storage(e.to_string()))?;

        log::info!("Stored media {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn remove(&self, filename: &str) -> AppResult<()> {
        Self::validate_filename(filename)?;

        let path = self.root.join(filename);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed media {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    fn public_url(&self, filename: &str) -> String {
        match Url::parse(&self.public_base) {
            Ok(mut url) if !url.cannot_be_a_base() => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(filename);
                }
                url.to_string()
            }
            _ => format!("{}/{}", self.public_base, filename),
        }
    }
}
