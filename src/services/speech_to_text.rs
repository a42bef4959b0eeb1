use crate::config::RelayConfig;
use crate::services::relay::{AudioUpload, DownstreamResponse, RelayError};
use axum::http::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Name of the multipart field the downstream expects the audio in
pub const FILE_FIELD: &str = "file";

/// Trait for speech-to-text backends the relay forwards uploads to
#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    /// Forward one upload and hand back whatever the backend answered
    async fn forward(&self, upload: &AudioUpload) -> Result<DownstreamResponse, RelayError>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;
}

/// Whisper service reached over HTTP.
///
/// Expects the endpoint shape of the reference Flask service:
/// ```bash
/// curl -F "file=@clip.wav" http://localhost:5000/transcribe
/// ```
pub struct WhisperClient {
    client: reqwest::Client,
    url: String,
    connect_timeout: Duration,
}

impl WhisperClient {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.whisper_service_url.clone(),
            connect_timeout: config.connect_timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(upload: &AudioUpload) -> Result<Form, RelayError> {
        let mut part = Part::bytes(upload.bytes.to_vec()).file_name(upload.filename.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait::async_trait]
impl SpeechToText for WhisperClient {
    async fn forward(&self, upload: &AudioUpload) -> Result<DownstreamResponse, RelayError> {
        let form = Self::build_form(upload)?;

        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(DownstreamResponse {
            status,
            content_type,
            body,
        })
    }

    async fn health_check(&self) -> bool {
        // Any HTTP answer counts, the Flask service only routes POST
        self.client
            .get(&self.url)
            .timeout(self.connect_timeout)
            .send()
            .await
            .is_ok()
    }
}
