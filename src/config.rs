// src/config.rs
//
// Runtime configuration
//
// Defaults are usable as-is; each value can be overridden through an
// environment variable. Invalid overrides fall back to the default.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::visibility::BASIC_MAX_MOVES;
use crate::error::{AppError, AppResult};

pub const ENV_DATA_DIR: &str = "MOVE_CATALOG_DATA_DIR";
pub const ENV_BASIC_MAX_MOVES: &str = "MOVE_CATALOG_BASIC_MAX_MOVES";
pub const ENV_OEMBED_ENDPOINT: &str = "MOVE_CATALOG_OEMBED_ENDPOINT";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "MOVE_CATALOG_HTTP_TIMEOUT_SECS";
pub const ENV_MEDIA_BASE_URL: &str = "MOVE_CATALOG_MEDIA_BASE_URL";
pub const ENV_POOL_SIZE: &str = "MOVE_CATALOG_POOL_SIZE";
pub const ENV_AUTH_URL: &str = "MOVE_CATALOG_AUTH_URL";
pub const ENV_AUTH_API_KEY: &str = "MOVE_CATALOG_AUTH_API_KEY";

pub const DEFAULT_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

const APP_DIR_NAME: &str = "move-catalog";
const DATABASE_FILE: &str = "move-catalog.db";
const MEDIA_DIR: &str = "media";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub basic_max_moves: usize,
    pub oembed_endpoint: String,
    pub http_timeout_secs: u64,
    /// Prefix for public media URLs; `None` derives a file:// URL from the media dir
    pub media_base_url: Option<String>,
    pub pool_size: u32,
    /// Base URL of the hosted auth service; sign-in is unavailable without it
    pub auth_url: Option<String>,
    pub auth_api_key: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(env::temp_dir)
            .join(APP_DIR_NAME);

        Self {
            data_dir,
            basic_max_moves: BASIC_MAX_MOVES,
            oembed_endpoint: DEFAULT_OEMBED_ENDPOINT.to_string(),
            http_timeout_secs: 10,
            media_base_url: None,
            pool_size: 8,
            auth_url: None,
            auth_api_key: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by any MOVE_CATALOG_* variables that are set
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            data_dir: env::var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            basic_max_moves: load_basic_cap(defaults.basic_max_moves),
            oembed_endpoint: env::var(ENV_OEMBED_ENDPOINT).unwrap_or(defaults.oembed_endpoint),
            http_timeout_secs: load_or(ENV_HTTP_TIMEOUT_SECS, defaults.http_timeout_secs),
            media_base_url: env::var(ENV_MEDIA_BASE_URL).ok().or(defaults.media_base_url),
            pool_size: load_or(ENV_POOL_SIZE, defaults.pool_size),
            auth_url: env::var(ENV_AUTH_URL).ok().or(defaults.auth_url),
            auth_api_key: env::var(ENV_AUTH_API_KEY).ok().or(defaults.auth_api_key),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn media_dir(&self) -> PathBuf {
        self.data_dir.join(MEDIA_DIR)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn public_media_base(&self) -> String {
        match &self.media_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("file://{}", self.media_dir().display()),
        }
    }

    /// Create the data and media directories if missing
    pub fn ensure_dirs(&self) -> AppResult<()> {
        std::fs::create_dir_all(self.media_dir()).map_err(AppError::Io)?;
        Ok(())
    }
}

/// The gated cap may be lowered but never raised
fn load_basic_cap(default: usize) -> usize {
    let cap = load_or(ENV_BASIC_MAX_MOVES, default);
    if cap > BASIC_MAX_MOVES {
        log::warn!(
            "{} = {} exceeds the gated cap; using {}",
            ENV_BASIC_MAX_MOVES,
            cap,
            BASIC_MAX_MOVES
        );
        return BASIC_MAX_MOVES;
    }
    cap
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Invalid {} value {:?}: {}; using default {}", key, raw, e, default);
            default
        }),
        Err(_) => {
            log::debug!("{} not set, using default: {}", key, default);
            default
        }
    }
}
