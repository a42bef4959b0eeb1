use crate::AppState;
use crate::api::error::{AppError, EMPTY_FILE_MESSAGE};
use crate::services::relay::{AudioUpload, DownstreamResponse, RelayError, RelayOutcome};
use crate::services::speech_to_text::FILE_FIELD;
use axum::{
    extract::{Multipart, State, multipart::MultipartError, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa::ToSchema;

/// Form accepted by the transcribe endpoint
#[derive(ToSchema)]
pub struct TranscribeForm {
    /// Audio file to transcribe
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

impl IntoResponse for DownstreamResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        match self.content_type {
            Some(content_type) => {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type);
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

#[utoipa::path(
    post,
    path = "/audio/api/transcribe",
    request_body(content = TranscribeForm, description = "Audio file", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcription returned by the Whisper service"),
        (status = 400, description = "No file or an empty file was uploaded", body = String),
        (status = 413, description = "File exceeds the upload limit", body = String),
        (status = 500, description = "Reading, forwarding or the downstream call failed", body = String)
    ),
    tag = "audio"
)]
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    // A request that is not multipart at all carries no file
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart, state.config.max_file_size)
            .await
            .map_err(|e| {
                match &e {
                    RelayError::TooLarge { .. } => tracing::warn!("Rejected audio upload: {}", e),
                    _ => tracing::error!("Error reading audio upload: {:?}", e),
                }
                AppError::from(e)
            })?,
        Err(rejection) => {
            tracing::debug!("Rejected non-multipart upload: {}", rejection.body_text());
            None
        }
    };

    match state.relay.transcribe(upload).await {
        RelayOutcome::Success(response) => Ok(response.into_response()),
        RelayOutcome::ValidationError => Err(AppError::BadRequest(EMPTY_FILE_MESSAGE.to_string())),
        RelayOutcome::TransportError { message } => Err(AppError::Processing(message)),
    }
}

/// Pull the audio part out of the form.
///
/// The part named `file` wins; otherwise the first part carrying a filename is used.
async fn read_upload(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<Option<AudioUpload>, RelayError> {
    let mut fallback = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size))?
    {
        let is_file_field = field.name() == Some(FILE_FIELD);
        if !is_file_field && (field.file_name().is_none() || fallback.is_some()) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or("unnamed")
            .to_string();
        let content_type = field.content_type().map(|s| s.to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_file_size))?;

        if bytes.len() > max_file_size {
            return Err(RelayError::TooLarge {
                limit: max_file_size,
            });
        }

        let upload = AudioUpload {
            filename,
            content_type,
            bytes,
        };

        if is_file_field {
            return Ok(Some(upload));
        }
        fallback = Some(upload);
    }

    Ok(fallback)
}

fn multipart_error(e: MultipartError, max_file_size: usize) -> RelayError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::TooLarge {
            limit: max_file_size,
        }
    } else {
        RelayError::Read(e.body_text())
    }
}
