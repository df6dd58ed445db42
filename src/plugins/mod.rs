//! Plugin system: host-facing metadata, sandbox methods, and registry.

mod anime_tts;
mod base;
mod registry;

pub use anime_tts::{
    AnimeTtsPlugin, GenerateVoiceArgs, GetTtsModelArgs, SendRecordMsgArgs, METHOD_GENERATE_VOICE,
    METHOD_GET_TTS_MODEL, METHOD_SEND_RECORD_MSG,
};
pub use base::{AgentCtx, Plugin, PluginMetadata, SandboxMethod, SandboxMethodType};
pub use registry::{get_plugin_registry, PluginRegistry};
