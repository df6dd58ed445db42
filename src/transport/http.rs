use crate::config::TtsConfig;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// A JSON request/response channel to the TTS backend.
///
/// `TtsClient` only talks to this trait, so tests can swap in an in-process fake.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// Send `body` to `path` (resolved against the base URL) and return the parsed JSON reply.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &TtsConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        // Synthesis can take minutes; every phase shares one generous ceiling.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_idle_timeout(Some(timeout))
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Self::with_client(client, &config.api_url, config.api_token.clone())
    }

    /// Build on top of an existing client (shares its connection pool).
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_token: Option<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid TTS API URL: {}", e),
                ErrorContext::new()
                    .with_field_path("tts.api_url")
                    .with_details(base_url.to_string())
                    .with_source("transport"),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Cannot join path onto TTS API URL: {}", e),
                ErrorContext::new()
                    .with_details(path.to_string())
                    .with_source("transport"),
            )
        })
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let url = self.resolve(path)?;

        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .headers(json_headers());
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            info!("{}", body);
            req = req.json(body);
        }

        debug!("TTS request: {} {}", method, url);
        let response = req.send().await.map_err(TransportError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let json = response.json().await.map_err(TransportError::Http)?;
        Ok(json)
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
