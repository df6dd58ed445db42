//! 消息投递：通过聊天后端（OneBot v11 兼容网关）把语音条发送到私聊或群聊。
//!
//! Messaging backends and best-effort voice delivery.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`MessagingBackend`] | Trait for chat gateways that can send private/group messages |
//! | [`OneBotHttpBackend`] | OneBot v11 HTTP API implementation |
//! | [`VoiceDelivery`] | Routes a chat key to the right send call; never fails outward |

mod delivery;
mod onebot;
mod types;

pub use delivery::{DeliveryError, DeliveryReceipt, DeliveryResult, VoiceDelivery};
pub use onebot::{ActionResponse, OneBotHttpBackend};
pub use types::{Message, MessageReceipt, MessageSegment};

use async_trait::async_trait;

/// Failure reported by a messaging backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessagingError {
    /// The gateway received the action and refused it.
    #[error("action failed (retcode {retcode:?}): {message}")]
    ActionFailed {
        retcode: Option<i64>,
        message: String,
    },

    /// The gateway could not be reached or answered garbage.
    #[error("messaging transport error: {0}")]
    Transport(String),
}

/// A chat gateway able to deliver messages.
#[async_trait]
pub trait MessagingBackend: Send + Sync {
    async fn send_private_msg(
        &self,
        user_id: u64,
        message: &Message,
    ) -> Result<MessageReceipt, MessagingError>;

    async fn send_group_msg(
        &self,
        group_id: u64,
        message: &Message,
    ) -> Result<MessageReceipt, MessagingError>;
}
