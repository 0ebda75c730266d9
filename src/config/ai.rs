//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which provider serves completions
    #[serde(default)]
    pub provider: AiProvider,

    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// OpenAI (or compatible) API key
    pub openai_api_key: Option<Secret<String>>,

    /// Model override; defaults per provider
    pub model: Option<String>,

    /// API root override; defaults per provider
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature; unset uses the model default
    pub temperature: Option<f32>,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    OpenAI,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured model, or the selected provider's default
    pub fn model_name(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) if !model.is_empty() => model.as_str(),
            (_, AiProvider::Gemini) => DEFAULT_GEMINI_MODEL,
            (_, AiProvider::OpenAI) => DEFAULT_OPENAI_MODEL,
        }
    }

    /// Configured base URL, or the selected provider's default
    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) if !url.is_empty() => url.as_str(),
            (_, AiProvider::Gemini) => DEFAULT_GEMINI_BASE_URL,
            (_, AiProvider::OpenAI) => DEFAULT_OPENAI_BASE_URL,
        }
    }

    /// API key of the selected provider, if set and non-empty
    pub fn api_key(&self) -> Option<&Secret<String>> {
        let key = match self.provider {
            AiProvider::Gemini => self.gemini_api_key.as_ref(),
            AiProvider::OpenAI => self.openai_api_key.as_ref(),
        };
        key.filter(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_none() {
            return Err(ValidationError::MissingRequired(match self.provider {
                AiProvider::Gemini => "GEMINI_API_KEY",
                AiProvider::OpenAI => "OPENAI_API_KEY",
            }));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidAiBaseUrl);
            }
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            openai_api_key: None,
            model: None,
            base_url: None,
            timeout_secs: default_timeout(),
            temperature: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}
