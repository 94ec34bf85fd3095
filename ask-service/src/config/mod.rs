use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AskConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// `None` puts the service in mock mode for its whole lifetime.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
}

impl AskConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Ok(Self::from_lookup(common_config, |key| env::var(key).ok()))
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);

        let api_base = lookup("GEMINI_API_BASE")
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());

        AskConfig {
            common,
            google: GoogleConfig { api_key, api_base },
        }
    }

    pub fn is_live(&self) -> bool {
        self.google.api_key.is_some()
    }
}
