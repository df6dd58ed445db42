//! 会话路由：解析 chat_key（`<适配器>-<会话类型>_<目标ID>`）以确定语音消息的发送目标。
//!
//! Chat routing.

mod chat_key;

pub use chat_key::{ChatKey, ChatType};

/// Why a chat key could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("无效的 chat_key 格式: {0}")]
    InvalidChatKey(String),

    #[error("目标ID必须为数字: {0}")]
    InvalidTargetId(String),

    #[error("不支持的聊天类型: {0}")]
    UnsupportedChatType(String),
}
