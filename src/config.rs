use std::path::PathBuf;

use url::Url;

use crate::api::{ApiConfig, DEFAULT_FILE_FIELD};

pub const ENDPOINT_VAR: &str = "QA_UPLOADER_ENDPOINT";
pub const FILE_FIELD_VAR: &str = "QA_UPLOADER_FILE_FIELD";
pub const DOWNLOAD_DIR_VAR: &str = "QA_UPLOADER_DOWNLOAD_DIR";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub download_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if the
    /// caller loaded one).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut api = ApiConfig::default();

        if let Some(raw) = lookup(ENDPOINT_VAR) {
            match Url::parse(raw.trim()) {
                Ok(url) => api.endpoint = url,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "Ignoring invalid {}, using {}",
                    ENDPOINT_VAR,
                    api.endpoint
                ),
            }
        }

        api.file_field = lookup(FILE_FIELD_VAR)
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_FIELD.to_string());

        let download_dir = lookup(DOWNLOAD_DIR_VAR)
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| resolve_download_dir(dirs::download_dir(), dirs::home_dir()));

        Self { api, download_dir }
    }
}

/// Platform download folder, then `<home>/Downloads`, then the working directory.
fn resolve_download_dir(download: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    download
        .or_else(|| home.map(|h| h.join("Downloads")).filter(|d| d.is_dir()))
        .unwrap_or_else(|| PathBuf::from("."))
}
