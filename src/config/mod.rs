use anyhow::{Result, anyhow};
use std::env;
use std::time::Duration;
use url::Url;

/// Relay configuration, loaded once at startup and never mutated
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Downstream Whisper endpoint (default: "http://localhost:5000/transcribe")
    pub whisper_service_url: String,

    /// Maximum accepted upload size in bytes (default: 100 MB)
    pub max_file_size: usize,

    /// Total timeout for one downstream call in seconds (default: 300)
    pub request_timeout_secs: u64,

    /// Connect timeout for the downstream in seconds (default: 10)
    pub connect_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            whisper_service_url: "http://localhost:5000/transcribe".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100 MB
            request_timeout_secs: 300,
            connect_timeout_secs: 10,
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            whisper_service_url: env::var("WHISPER_SERVICE_URL")
                .unwrap_or(default.whisper_service_url),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),

            connect_timeout_secs: env::var("CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.connect_timeout_secs),
        }
    }

    /// Config pointing at a specific downstream, with short timeouts
    pub fn for_downstream(url: impl Into<String>) -> Self {
        Self {
            whisper_service_url: url.into(),
            request_timeout_secs: 10,
            connect_timeout_secs: 2,
            ..Self::default()
        }
    }

    /// Reject anything that is not an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.whisper_service_url).map_err(|e| {
            anyhow!(
                "WHISPER_SERVICE_URL '{}' is not a valid URL: {}",
                self.whisper_service_url,
                e
            )
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(anyhow!(
                    "WHISPER_SERVICE_URL must use http or https, got '{}'",
                    other
                ));
            }
        }

        if self.max_file_size == 0 {
            return Err(anyhow!("MAX_FILE_SIZE must be greater than zero"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Body limit for the upload route: file size plus multipart overhead
    pub fn body_limit(&self) -> usize {
        self.max_file_size.saturating_add(10 * 1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.whisper_service_url, "http://localhost:5000/transcribe");
        assert_eq!(config.max_file_size, 100 * 1024 * 1024);
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_downstream_config() {
        let config = RelayConfig::for_downstream("https://stt.internal/transcribe");
        assert_eq!(config.whisper_service_url, "https://stt.internal/transcribe");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        let config = RelayConfig::for_downstream("/transcribe");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = RelayConfig::for_downstream("ftp://example.com/transcribe");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_body_limit_includes_overhead() {
        let config = RelayConfig {
            max_file_size: 1024,
            ..RelayConfig::default()
        };
        assert_eq!(config.body_limit(), 1024 + 10 * 1024 * 1024);
    }

    #[test]
    fn test_body_limit_saturates_on_huge_file_size() {
        let config = RelayConfig {
            max_file_size: usize::MAX,
            ..RelayConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.body_limit(), usize::MAX);
    }
}
