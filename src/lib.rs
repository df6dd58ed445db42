//! # anime-tts
//!
//! 二游语音生成插件：让 AI 自主选择语音模型，调用远程 TTS 服务生成语音，并以语音条形式发送到会话中。
//!
//! A chat-bot plugin that lets an AI agent pick an anime character voice model, synthesize
//! speech through a remote TTS service, and deliver the audio as a voice message.
//!
//! ## Overview
//!
//! The agent drives three independent steps:
//!
//! 1. `get_tts_model`: list the backend's models (model → language → emotions)
//! 2. `generate_voice`: synthesize text with a chosen model/language/emotion, get a `.wav` URL
//! 3. `send_record_msg`: route a chat key to a private or group chat and send the voice clip
//!
//! Synthesis errors reach the agent so it can retry with corrected parameters. Delivery is
//! best-effort: failures are logged and never returned.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anime_tts::config::PluginConfig;
//! use anime_tts::plugins::{get_plugin_registry, AgentCtx, AnimeTtsPlugin};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anime_tts::Result<()> {
//!     let config = PluginConfig::from_env();
//!     let registry = get_plugin_registry();
//!     registry.register(Arc::new(AnimeTtsPlugin::from_config(&config)?));
//!
//!     let ctx = AgentCtx::new();
//!     let models = registry
//!         .call(&ctx, "anime_tts", "get_tts_model", serde_json::json!({}))
//!         .await?;
//!     println!("{}", models);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Plugin configuration (YAML file and environment) |
//! | [`transport`] | JSON HTTP transport to the TTS backend |
//! | [`tts`] | Model catalog and voice synthesis |
//! | [`routing`] | Chat key parsing |
//! | [`messaging`] | Messaging backends and best-effort voice delivery |
//! | [`plugins`] | Plugin metadata, sandbox methods, registry |
//! | [`types`] | Tool calling types |
//! | [`telemetry`] | Logging setup |

pub mod config;
pub mod messaging;
pub mod plugins;
pub mod routing;
pub mod telemetry;
pub mod transport;
pub mod tts;
pub mod types;

// Re-export main types for convenience
pub use config::{OneBotConfig, PluginConfig, TtsConfig};
pub use messaging::{DeliveryError, VoiceDelivery};
pub use plugins::{AgentCtx, AnimeTtsPlugin, Plugin, PluginRegistry};
pub use routing::{ChatKey, ChatType};
pub use tts::{ModelCatalog, TtsClient, TtsClientBuilder};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
