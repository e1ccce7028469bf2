mod client;
mod models;

pub use client::{ApiError, Result, UploadClient};
pub use models::{ApiConfig, DEFAULT_FILE_FIELD};
