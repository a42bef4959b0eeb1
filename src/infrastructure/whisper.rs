use crate::config::RelayConfig;
use crate::services::speech_to_text::{SpeechToText, WhisperClient};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub async fn setup_backend(config: &RelayConfig) -> Result<Arc<dyn SpeechToText>> {
    let client = WhisperClient::new(config)?;

    info!("🎙️  Whisper service: {}", client.url());

    // Warm up the connection pool; an unreachable service is not fatal
    if client.health_check().await {
        info!("🎙️  Whisper service reachable");
    } else {
        tracing::warn!(
            "⚠️  Whisper service unreachable! Transcription requests will fail until it comes up."
        );
    }

    Ok(Arc::new(client))
}
