//! 类型模块：与宿主 Agent 框架交互使用的工具调用类型。
//!
//! # Types Module
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ToolDefinition`] | Function-calling definition of a sandbox method |
//! | [`ToolCall`] | Invocation of a sandbox method by the agent |
//! | [`ToolResult`] | Result handed back to the agent |
//!
//! ## Example
//!
//! ```rust
//! use anime_tts::types::ToolCall;
//!
//! let call = ToolCall {
//!     id: "call_1".to_string(),
//!     name: "get_tts_model".to_string(),
//!     arguments: serde_json::json!({}),
//! };
//! assert_eq!(call.name, "get_tts_model");
//! ```

pub mod tool;

pub use tool::{FunctionDefinition, ToolCall, ToolDefinition, ToolResult};
