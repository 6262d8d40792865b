//! Configuration module
//!
//! This module provides the configuration structures for the API and the
//! upstream provider clients. Configuration is read from the environment
//! once at process start and passed down explicitly; nothing reads ambient
//! global state after startup.

use std::env;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_TRANSCRIPTION_MODEL: &str = "gemini-2.0-flash";
const GEMINI_SUMMARY_MODEL: &str = "gemini-2.0-flash";
const PROVIDER_TIMEOUT_SECS: u64 = 120;

/// Base configuration shared by the HTTP surface
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Summarizer service configuration
#[derive(Clone, Debug)]
pub struct SummarizerConfig {
    pub base: BaseConfig,
    // Upload staging configuration
    pub upload_dir: String,
    pub max_audio_size_bytes: usize,
    pub audio_allowed_extensions: Vec<String>,
    pub audio_allowed_content_types: Vec<String>,
    // Upstream provider configuration
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub transcription_model: String,
    pub summary_model: String,
    pub provider_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<SummarizerConfig>);

impl Config {
    fn inner(&self) -> &SummarizerConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = SummarizerConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn upload_dir(&self) -> &str {
        &self.inner().upload_dir
    }

    pub fn max_audio_size_bytes(&self) -> usize {
        self.inner().max_audio_size_bytes
    }

    pub fn audio_allowed_extensions(&self) -> &[String] {
        &self.inner().audio_allowed_extensions
    }

    pub fn audio_allowed_content_types(&self) -> &[String] {
        &self.inner().audio_allowed_content_types
    }

    pub fn gemini_api_key(&self) -> &str {
        &self.inner().gemini_api_key
    }

    pub fn gemini_api_base(&self) -> &str {
        &self.inner().gemini_api_base
    }

    pub fn transcription_model(&self) -> &str {
        &self.inner().transcription_model
    }

    pub fn summary_model(&self) -> &str {
        &self.inner().summary_model
    }

    pub fn provider_timeout_secs(&self) -> u64 {
        self.inner().provider_timeout_secs
    }
}

impl SummarizerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        const MAX_AUDIO_SIZE_MB: usize = 25;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_audio_size_mb = env::var("MAX_AUDIO_SIZE_MB")
            .unwrap_or_else(|_| MAX_AUDIO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_AUDIO_SIZE_MB);

        let audio_allowed_extensions = env::var("AUDIO_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "mp3,wav,m4a,flac".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let audio_allowed_content_types = env::var("AUDIO_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| {
                "audio/mpeg,audio/mp3,audio/mp4,audio/x-m4a,audio/wav,audio/x-wav,audio/wave,audio/flac"
                    .to_string()
            })
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let config = SummarizerConfig {
            base,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            max_audio_size_bytes: max_audio_size_mb * 1024 * 1024,
            audio_allowed_extensions,
            audio_allowed_content_types,
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?,
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| GEMINI_API_BASE.to_string()),
            transcription_model: env::var("GEMINI_TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| GEMINI_TRANSCRIPTION_MODEL.to_string()),
            summary_model: env::var("GEMINI_SUMMARY_MODEL")
                .unwrap_or_else(|_| GEMINI_SUMMARY_MODEL.to_string()),
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| PROVIDER_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(PROVIDER_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("GEMINI_API_KEY must not be empty"));
        }

        if self.max_audio_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_AUDIO_SIZE_MB must be greater than 0"));
        }

        if self.audio_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "AUDIO_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.upload_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }

        Ok(())
    }
}
