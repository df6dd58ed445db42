use super::types::Message;
use super::{MessagingBackend, MessagingError};
use crate::routing::{ChatKey, ChatType, RouteError};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info};

/// Why a voice message was not delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("无效的 chat_key 格式: {0}")]
    InvalidChatKey(String),

    #[error("目标ID必须为数字: {0}")]
    InvalidTargetId(String),

    #[error("不支持的聊天类型: {0}")]
    UnsupportedChatType(String),

    #[error("API调用失败: {message}")]
    MessagingApi {
        retcode: Option<i64>,
        message: String,
    },

    #[error("发送语音消息异常: {0}")]
    Unexpected(String),
}

impl DeliveryError {
    /// Stable label used in logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidChatKey(_) => "invalid_chat_key",
            Self::InvalidTargetId(_) => "invalid_target_id",
            Self::UnsupportedChatType(_) => "unsupported_chat_type",
            Self::MessagingApi { .. } => "messaging_api",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// Errors caused by a malformed chat key.
    pub fn is_routing_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidChatKey(_) | Self::InvalidTargetId(_) | Self::UnsupportedChatType(_)
        )
    }
}

impl From<RouteError> for DeliveryError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::InvalidChatKey(k) => Self::InvalidChatKey(k),
            RouteError::InvalidTargetId(t) => Self::InvalidTargetId(t),
            RouteError::UnsupportedChatType(c) => Self::UnsupportedChatType(c),
        }
    }
}

impl From<MessagingError> for DeliveryError {
    fn from(e: MessagingError) -> Self {
        match e {
            MessagingError::ActionFailed { retcode, message } => {
                Self::MessagingApi { retcode, message }
            }
            MessagingError::Transport(msg) => Self::Unexpected(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub chat_key: ChatKey,
    pub message_id: Option<i64>,
}

pub type DeliveryResult = std::result::Result<DeliveryReceipt, DeliveryError>;

/// Sends voice clips to the chat a chat key points at.
#[derive(Clone)]
pub struct VoiceDelivery {
    backend: Arc<dyn MessagingBackend>,
}

impl VoiceDelivery {
    pub fn new(backend: Arc<dyn MessagingBackend>) -> Self {
        Self { backend }
    }

    /// Deliver and report the outcome.
    pub async fn try_deliver(&self, chat_key: &str, voice: &str) -> DeliveryResult {
        let key = ChatKey::parse(chat_key)?;
        let message = Message::voice(voice);

        let send = async {
            match key.chat_type {
                ChatType::Private => self.backend.send_private_msg(key.target_id, &message).await,
                ChatType::Group => self.backend.send_group_msg(key.target_id, &message).await,
            }
        };
        let receipt = AssertUnwindSafe(send)
            .catch_unwind()
            .await
            .map_err(|panic| DeliveryError::Unexpected(panic_message(&*panic)))??;

        match key.chat_type {
            ChatType::Private => info!("私聊语音发送成功: QQ={}, voice={}", key.target_id, voice),
            ChatType::Group => info!("群聊语音发送成功: 群={}, voice={}", key.target_id, voice),
        }

        Ok(DeliveryReceipt {
            chat_key: key,
            message_id: receipt.message_id,
        })
    }

    /// Deliver, logging and discarding any failure.
    pub async fn deliver(&self, chat_key: &str, voice: &str) {
        if let Err(e) = self.try_deliver(chat_key, voice).await {
            let category = e.category();
            match &e {
                DeliveryError::MessagingApi { .. } => error!(category, "{}", e),
                e if e.is_routing_error() => error!(category, "参数错误: {}", e),
                _ => error!(category, "{}", e),
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in messaging backend".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            DeliveryError::from(RouteError::InvalidChatKey("x".into())).category(),
            "invalid_chat_key"
        );
        assert_eq!(
            DeliveryError::from(MessagingError::Transport("down".into())).category(),
            "unexpected"
        );
        let api = DeliveryError::from(MessagingError::ActionFailed {
            retcode: Some(100),
            message: "blocked".into(),
        });
        assert_eq!(api.category(), "messaging_api");
        assert_eq!(api.to_string(), "API调用失败: blocked");
        assert!(!api.is_routing_error());
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*boxed), "boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*boxed), "bang");
    }
}
