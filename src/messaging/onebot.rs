use super::types::{Message, MessageReceipt};
use super::{MessagingBackend, MessagingError};
use crate::config::OneBotConfig;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// OneBot v11 action response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub retcode: i64,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub wording: Option<String>,
}

impl ActionResponse {
    pub fn is_ok(&self) -> bool {
        self.status != "failed" && self.retcode == 0
    }

    fn failure_message(&self) -> String {
        self.msg
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| self.wording.clone().filter(|w| !w.is_empty()))
            .unwrap_or_else(|| "未知错误".to_string())
    }

    fn into_receipt(self) -> std::result::Result<MessageReceipt, MessagingError> {
        if !self.is_ok() {
            return Err(MessagingError::ActionFailed {
                retcode: Some(self.retcode),
                message: self.failure_message(),
            });
        }
        let message_id = self
            .data
            .as_ref()
            .and_then(|d| d.get("message_id"))
            .and_then(|id| id.as_i64());
        Ok(MessageReceipt { message_id })
    }
}

/// Client for a OneBot v11 HTTP API (go-cqhttp, NapCat, Lagrange, ...).
pub struct OneBotHttpBackend {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl OneBotHttpBackend {
    pub fn new(config: &OneBotConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        // Ensure a trailing slash so action names join under any path prefix.
        let mut raw = config.api_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid OneBot API URL: {}", e),
                ErrorContext::new()
                    .with_field_path("onebot.api_url")
                    .with_details(config.api_url.clone())
                    .with_source("onebot"),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
        })
    }

    /// Call a OneBot action with JSON params.
    pub async fn call_api(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> std::result::Result<MessageReceipt, MessagingError> {
        let url = self
            .base_url
            .join(action)
            .map_err(|e| MessagingError::Transport(e.to_string()))?;
        debug!("OneBot action {}: {}", action, params);

        let mut req = self.client.post(url).json(&params);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessagingError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let action_response: ActionResponse = response
            .json()
            .await
            .map_err(|e| MessagingError::Transport(e.to_string()))?;
        action_response.into_receipt()
    }
}

#[async_trait]
impl MessagingBackend for OneBotHttpBackend {
    async fn send_private_msg(
        &self,
        user_id: u64,
        message: &Message,
    ) -> std::result::Result<MessageReceipt, MessagingError> {
        self.call_api(
            "send_private_msg",
            serde_json::json!({ "user_id": user_id, "message": message }),
        )
        .await
    }

    async fn send_group_msg(
        &self,
        group_id: u64,
        message: &Message,
    ) -> std::result::Result<MessageReceipt, MessagingError> {
        self.call_api(
            "send_group_msg",
            serde_json::json!({ "group_id": group_id, "message": message }),
        )
        .await
    }
}
