use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;

use super::models::{ApiConfig, ErrorResponse};
use crate::domain::model::PDF_MIME;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Processing failed (HTTP {status}){}", detail_suffix(.detail))]
    ProcessingFailed { status: u16, detail: Option<String> },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct UploadClient {
    config: ApiConfig,
    http: Client,
}

impl UploadClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Post a PDF to the processing endpoint and return the produced document.
    ///
    /// The file travels as a single multipart part under the configured field
    /// name. Any non-success status is a processing failure; the body is only
    /// consulted to enrich the message.
    pub async fn process_document(&self, file_name: &str, contents: Vec<u8>) -> Result<Bytes> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(self.config.file_field.clone(), part);

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ApiError::ProcessingFailed {
                status: status.as_u16(),
                detail: extract_error_detail(&body),
            });
        }

        Ok(response.bytes().await?)
    }
}

fn extract_error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|r| r.error)
        .filter(|e| !e.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use url::Url;

    fn client_for(server: &mockito::Server) -> UploadClient {
        UploadClient::new(ApiConfig {
            endpoint: Url::parse(&server.url()).unwrap(),
            ..ApiConfig::default()
        })
    }

    #[tokio::test]
    async fn test_process_document_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="report.pdf""#.to_string()),
                Matcher::Regex("%PDF-1.4".to_string()),
            ]))
            .with_status(200)
            .with_body("docx-bytes")
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client
            .process_document("report.pdf", b"%PDF-1.4 test".to_vec())
            .await
            .unwrap();

        assert_eq!(&body[..], b"docx-bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_processing_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let err = client_for(&server)
            .process_document("report.pdf", b"%PDF-".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::ProcessingFailed {
                status: 500,
                detail: None
            }
        ));
        assert_eq!(err.to_string(), "Processing failed (HTTP 500)");
    }

    #[tokio::test]
    async fn test_json_error_detail_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "No questions found"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .process_document("report.pdf", b"%PDF-".to_vec())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Processing failed (HTTP 400): No questions found"
        );
    }

    #[test]
    fn test_extract_error_detail() {
        assert_eq!(
            extract_error_detail(br#"{"message":"bad pdf"}"#),
            Some("bad pdf".to_string())
        );
        assert_eq!(extract_error_detail(br#"{"error":"  "}"#), None);
        assert_eq!(extract_error_detail(b"<html>oops</html>"), None);
    }
}
