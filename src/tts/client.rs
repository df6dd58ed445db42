//! TTS (Text-to-Speech) client.

use super::seed::{SeedSource, ThreadRngSeed};
use super::types::{
    ModelCatalog, SynthesisRequest, SynthesisResponse, SynthesisStatus, API_VERSION,
};
use crate::config::TtsConfig;
use crate::transport::{HttpTransport, JsonTransport};
use crate::{Error, Result};
use reqwest::Method;
use std::sync::Arc;
use tracing::{error, info};

const MODELS_PATH: &str = "models";
const INFER_PATH: &str = "infer_single";

/// Client for the anime voice TTS backend.
///
/// Cheap to clone; clones share the transport and its connection pool.
#[derive(Clone)]
pub struct TtsClient {
    transport: Arc<dyn JsonTransport>,
    seeds: Arc<dyn SeedSource>,
}

impl TtsClient {
    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    /// Fetch the model catalog (model → language → emotions).
    pub async fn model_catalog(&self) -> Result<ModelCatalog> {
        let body = serde_json::json!({ "version": API_VERSION });
        let data = self
            .transport
            .request(Method::POST, MODELS_PATH, Some(&body))
            .await?;
        Ok(ModelCatalog::from_response(data))
    }

    /// Agent-facing description of every available model.
    pub async fn list_models(&self) -> Result<String> {
        Ok(self.model_catalog().await?.summary())
    }

    /// Synthesize `text` and return the URL of the generated `.wav`.
    ///
    /// `model_name`, `language` and `emotion` should come from [`Self::model_catalog`];
    /// the backend is the one that validates them.
    pub async fn synthesize(
        &self,
        text: &str,
        model_name: &str,
        language: &str,
        emotion: &str,
    ) -> Result<String> {
        let request = SynthesisRequest::new(
            text,
            model_name,
            language,
            emotion,
            self.seeds.next_seed(),
        );
        let payload = serde_json::to_value(&request)?;
        let data = self
            .transport
            .request(Method::POST, INFER_PATH, Some(&payload))
            .await?;

        let response = SynthesisResponse::from_value(&data);
        if let Some(url) = &response.audio_url {
            info!("data: {}", url);
        }

        match response.status() {
            SynthesisStatus::ParameterError => {
                error!(
                    "TTS API 参数错误: 模型: {}, 语言: {}, 语气: {}",
                    model_name, language, emotion
                );
                Err(Error::Parameter {
                    model: model_name.to_string(),
                    language: language.to_string(),
                    emotion: emotion.to_string(),
                })
            }
            SynthesisStatus::Success(url) => {
                info!(
                    "TTS API 参数: 模型: {}, 语言: {}, 语气: {}",
                    model_name, language, emotion
                );
                info!("TTS API 文本: {}", text);
                Ok(url)
            }
            SynthesisStatus::Unknown => Err(Error::UnknownSynthesis {
                body: data.to_string(),
                model: model_name.to_string(),
                language: language.to_string(),
                emotion: emotion.to_string(),
            }),
        }
    }
}

pub struct TtsClientBuilder {
    config: Option<TtsConfig>,
    transport: Option<Arc<dyn JsonTransport>>,
    seeds: Option<Arc<dyn SeedSource>>,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
            seeds: None,
        }
    }

    pub fn config(mut self, config: TtsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a ready-made transport instead of building one from the config.
    pub fn transport(mut self, transport: Arc<dyn JsonTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn seed_source(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    pub fn build(self) -> Result<TtsClient> {
        let transport = match self.transport {
            Some(t) => t,
            None => {
                let config = self.config.unwrap_or_default();
                if config.timeout_secs == 0 {
                    return Err(Error::configuration("TTS timeout must be positive"));
                }
                Arc::new(HttpTransport::new(&config)?) as Arc<dyn JsonTransport>
            }
        };
        let seeds = self
            .seeds
            .unwrap_or_else(|| Arc::new(ThreadRngSeed) as Arc<dyn SeedSource>);
        Ok(TtsClient { transport, seeds })
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
