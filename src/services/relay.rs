use crate::services::speech_to_text::SpeechToText;
use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// One uploaded audio file, alive for a single request
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl AudioUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// What the downstream answered, passed back to the caller untouched
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("failed to read upload: {0}")]
    Read(String),

    #[error("file exceeds the upload limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    /// Display text followed by the source chain, e.g.
    /// `error sending request ...: client error (Connect): ...: Connection refused (os error 111)`
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();

        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }

        message
    }
}

/// Result of one relay call
#[derive(Debug)]
pub enum RelayOutcome {
    /// Downstream answered; status and body go back verbatim
    Success(DownstreamResponse),
    /// No file, or an empty one. Nothing was sent downstream
    ValidationError,
    /// Reading, building or sending the request failed
    TransportError { message: String },
}

pub struct TranscriptionRelay {
    backend: Arc<dyn SpeechToText>,
}

impl TranscriptionRelay {
    pub fn new(backend: Arc<dyn SpeechToText>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn SpeechToText> {
        &self.backend
    }

    pub async fn transcribe(&self, upload: Option<AudioUpload>) -> RelayOutcome {
        let upload = match upload {
            Some(upload) if !upload.is_empty() => upload,
            _ => return RelayOutcome::ValidationError,
        };

        debug!(
            "Received file: {} with size: {} bytes",
            upload.filename,
            upload.size()
        );

        match self.backend.forward(&upload).await {
            Ok(response) => {
                debug!(
                    "Received response from Whisper service: {}",
                    response.status
                );
                RelayOutcome::Success(response)
            }
            Err(e) => {
                error!(filename = %upload.filename, "Error processing audio file: {:?}", e);
                RelayOutcome::TransportError {
                    message: e.message(),
                }
            }
        }
    }
}
