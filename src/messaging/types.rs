//! Message types handed to the messaging backend.

use serde::{Deserialize, Serialize};

/// One OneBot v11 message segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum MessageSegment {
    /// Voice clip; `file` is a local path or a URL the backend can fetch.
    Record { file: String },
}

impl MessageSegment {
    pub fn record(file: impl Into<String>) -> Self {
        Self::Record { file: file.into() }
    }
}

/// A message made of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(pub Vec<MessageSegment>);

impl Message {
    /// A message holding a single voice clip.
    pub fn voice(file: impl Into<String>) -> Self {
        Self(vec![MessageSegment::record(file)])
    }

    pub fn segments(&self) -> &[MessageSegment] {
        &self.0
    }
}

/// What the backend reports for an accepted send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    #[serde(default)]
    pub message_id: Option<i64>,
}
