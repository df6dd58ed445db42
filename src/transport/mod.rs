//! 传输层：带固定 JSON 头和超长超时的 TTS 后端 HTTP 请求封装。
//!
//! HTTP transport for the TTS backend.

mod http;

pub use http::{HttpTransport, JsonTransport, TransportError};
