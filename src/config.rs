//! 插件配置：TTS 服务地址、可选令牌、超时，以及 OneBot 消息后端设置。
//!
//! Plugin configuration.
//!
//! Values come from (in increasing priority) built-in defaults, a YAML file, and
//! `ANIME_TTS_*` environment variables.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_TTS_API_URL: &str = "https://gsv2p.acgnai.top";
pub const DEFAULT_TTS_TIMEOUT_SECS: u64 = 12000;
pub const DEFAULT_ONEBOT_API_URL: &str = "http://127.0.0.1:5700";
pub const DEFAULT_ONEBOT_TIMEOUT_SECS: u64 = 30;

/// TTS backend settings.
///
/// Register at <https://gsv.acgnai.top> for access to the default service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Base URL of the TTS service.
    pub api_url: String,
    /// Bearer token. The public service currently needs none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_TTS_API_URL.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TTS_TIMEOUT_SECS,
        }
    }
}

impl TtsConfig {
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OneBot v11 HTTP API settings for voice delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneBotConfig {
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OneBotConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ONEBOT_API_URL.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_ONEBOT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub tts: TtsConfig,
    pub onebot: OneBotConfig,
}

impl PluginConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Override fields with any `ANIME_TTS_*` variables that are set.
    ///
    /// Unparsable timeouts are ignored.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("ANIME_TTS_API_URL") {
            self.tts.api_url = url;
        }
        if let Some(token) = lookup("ANIME_TTS_API_TOKEN") {
            self.tts.api_token = Some(token);
        }
        if let Some(secs) = lookup("ANIME_TTS_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            self.tts.timeout_secs = secs;
        }
        if let Some(url) = lookup("ANIME_TTS_ONEBOT_URL") {
            self.onebot.api_url = url;
        }
        if let Some(token) = lookup("ANIME_TTS_ONEBOT_TOKEN") {
            self.onebot.access_token = Some(token);
        }
        if let Some(secs) = lookup("ANIME_TTS_ONEBOT_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok())
        {
            self.onebot.timeout_secs = secs;
        }
        self
    }
}
