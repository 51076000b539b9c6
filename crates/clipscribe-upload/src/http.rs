//! HTTP transcription endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use clipscribe_core::{MP4_MIME, UploadSelection};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Result, UploadError, UploadReceipt, Uploader};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/upload";

/// Configuration for the HTTP upload client.
#[derive(Debug, Clone)]
pub struct HttpUploaderConfig {
    /// Full URL of the upload endpoint
    pub endpoint: String,

    /// Optional request timeout. None waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpUploaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl HttpUploaderConfig {
    /// Create a new config pointing at the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the multipart `POST /upload` endpoint.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: reqwest::Client,
    config: HttpUploaderConfig,
}

#[derive(Debug, Deserialize)]
struct AcceptedBody {
    #[serde(default)]
    transcription: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RejectedBody {
    /// Usually a string, but whatever the server put here is shown.
    #[serde(default)]
    message: Value,
}

impl RejectedBody {
    fn message(self) -> Option<String> {
        match self.message {
            Value::Null => None,
            Value::String(message) => Some(message),
            other => Some(other.to_string()),
        }
    }
}

impl HttpUploader {
    /// Create a new client with the given configuration.
    pub fn new(config: HttpUploaderConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Create a client for an endpoint with default settings.
    pub fn from_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HttpUploaderConfig::new(endpoint))
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, selection: &UploadSelection) -> Result<UploadReceipt> {
        let file = selection.file();
        debug!(
            endpoint = %self.config.endpoint,
            filename = file.name(),
            bytes = file.len(),
            option = selection.language().code(),
            "Sending upload request"
        );

        let file_part =
            reqwest::multipart::Part::stream_with_length(file.data().clone(), file.len() as u64)
                .file_name(file.name().to_string())
                .mime_str(MP4_MIME)
                .map_err(|e| UploadError::InvalidRequest(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("option", selection.language().code());

        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Upload endpoint responded");

        if !status.is_success() {
            let body: RejectedBody = response
                .json()
                .await
                .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;
            let message = body.message().unwrap_or_else(|| {
                warn!(status = %status, "Rejection carried no message");
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: AcceptedBody = response
            .json()
            .await
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

        if body.transcription.is_none() {
            warn!("Upload accepted but no transcription was returned");
        }

        Ok(UploadReceipt {
            transcription: body.transcription,
            message: body.message,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use clipscribe_core::{LanguageOption, SelectedFile};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn selection() -> UploadSelection {
        let file = SelectedFile::new(
            "clip.mp4",
            Some(MP4_MIME.to_string()),
            Bytes::from_static(b"fake mp4 bytes"),
        );
        UploadSelection::validate(Some(file), Some(LanguageOption::Fr)).unwrap()
    }

    fn uploader(server: &MockServer) -> HttpUploader {
        HttpUploader::from_endpoint(format!("{}/upload", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_sends_multipart_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(body_string_contains("name=\"file\"; filename=\"clip.mp4\""))
            .and(body_string_contains("Content-Type: video/mp4"))
            .and(body_string_contains("fake mp4 bytes"))
            .and(body_string_contains("name=\"option\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transcription": "hello",
                "message": "File and option received successfully",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = uploader(&server).upload(&selection()).await.unwrap();
        assert_eq!(receipt.transcription.as_deref(), Some("hello"));
        assert_eq!(
            receipt.message.as_deref(),
            Some("File and option received successfully")
        );
    }

    #[tokio::test]
    async fn test_success_without_transcription() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "File and option received successfully",
                "filename": "clip.mp4",
                "option": "fr",
            })))
            .mount(&server)
            .await;

        let receipt = uploader(&server).upload(&selection()).await.unwrap();
        assert_eq!(receipt.transcription, None);
    }

    #[tokio::test]
    async fn test_rejection_message_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "message": "No option selected" })),
            )
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&selection()).await.unwrap_err();
        match err {
            UploadError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No option selected");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejection_with_non_string_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "message": 123 })))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&selection()).await.unwrap_err();
        assert!(matches!(
            err,
            UploadError::Rejected { status: 422, ref message } if message == "123"
        ));

        server.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": { "detail": "bad codec" }
            })))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&selection()).await.unwrap_err();
        assert!(matches!(
            err,
            UploadError::Rejected { status: 400, ref message } if message == r#"{"detail":"bad codec"}"#
        ));
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&selection()).await.unwrap_err();
        assert!(matches!(
            err,
            UploadError::Rejected { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&selection()).await.unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Port 9 (discard) is not listening in test environments.
        let uploader = HttpUploader::from_endpoint("http://127.0.0.1:9/upload").unwrap();
        let err = uploader.upload(&selection()).await.unwrap_err();
        assert!(matches!(err, UploadError::NetworkError(_)));
    }
}
