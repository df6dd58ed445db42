//! Chat key parsing.
//!
//! A chat key looks like `<adapter_id>-<chat_type>_<target_id>`, e.g. `onebot-group_123456`.

use super::RouteError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatType {
    Private,
    Group,
}

impl ChatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed chat key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatKey {
    pub adapter_id: String,
    pub chat_type: ChatType,
    pub target_id: u64,
}

impl ChatKey {
    /// Parse a chat key.
    ///
    /// Checks run in a fixed order: `_` must be present, the key splits on its first
    /// `-`, the remainder on its first `_`, the target must be all ASCII digits, and only
    /// then is the chat type checked. So `onebot-channel_abc` is an invalid target, not
    /// an unsupported type.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        if !raw.contains('_') {
            return Err(RouteError::InvalidChatKey(raw.to_string()));
        }

        let (adapter_id, rest) = raw
            .split_once('-')
            .ok_or_else(|| RouteError::InvalidChatKey(raw.to_string()))?;
        let (chat_type, target) = rest
            .split_once('_')
            .ok_or_else(|| RouteError::InvalidChatKey(raw.to_string()))?;

        if target.is_empty() || !target.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RouteError::InvalidTargetId(target.to_string()));
        }
        let target_id = target
            .parse::<u64>()
            .map_err(|_| RouteError::InvalidTargetId(target.to_string()))?;

        let chat_type = match chat_type {
            "private" => ChatType::Private,
            "group" => ChatType::Group,
            other => return Err(RouteError::UnsupportedChatType(other.to_string())),
        };

        Ok(Self {
            adapter_id: adapter_id.to_string(),
            chat_type,
            target_id,
        })
    }
}

impl std::str::FromStr for ChatKey {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}_{}", self.adapter_id, self.chat_type, self.target_id)
    }
}
