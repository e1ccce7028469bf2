use serde::Deserialize;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Error body some processing servers send alongside a failure status
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message", alias = "detail")]
    pub error: String,
}

/// Configuration for the upload client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: Url,
    pub file_field: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            file_field: DEFAULT_FILE_FIELD.to_string(),
        }
    }
}
