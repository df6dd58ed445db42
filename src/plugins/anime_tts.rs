//! The anime voice TTS plugin.

use super::base::{AgentCtx, Plugin, PluginMetadata, SandboxMethod, SandboxMethodType};
use crate::config::PluginConfig;
use crate::messaging::{MessagingBackend, OneBotHttpBackend, VoiceDelivery};
use crate::tts::TtsClient;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, Instrument};

pub const METHOD_GET_TTS_MODEL: &str = "get_tts_model";
pub const METHOD_GENERATE_VOICE: &str = "generate_voice";
pub const METHOD_SEND_RECORD_MSG: &str = "send_record_msg";

/// Arguments of `get_tts_model`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetTtsModelArgs {}

/// Arguments of `generate_voice`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateVoiceArgs {
    /// 要生成语音的文本，大部分模型支持中文，少部分支持日语、英语等
    pub text: String,
    /// 模型，务必先通过 get_tts_model 方法获取可用模型后填入
    pub model_name: String,
    /// 语言，通过 get_tts_model 方法获取的模型字典的值为模型支持的语言字典，请填入语言字典的键名
    pub language: String,
    /// 语气，语言字典的值为支持的语气列表，请填入合适的语气
    pub emotion: String,
}

/// Arguments of `send_record_msg`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendRecordMsgArgs {
    /// 会话标识
    pub chat_key: String,
    /// 语音文件路径或 URL
    pub voice_path: String,
}

const GENERATE_VOICE_DOC: &str = "根据传入文本，语音模型，语言，语气生成一段音频的 URL，后缀名为 `.wav`。

可选角色大多是《崩坏3》《原神》《星穹铁道》《鸣潮》《明日方舟》《蔚蓝档案》《妮姬》中的人物。

**重要提示：** 请务必使用**语音模型角色**的语气和人设来构思文本。例如，如果选择爱莉希雅的语音模型，请使用符合爱莉希雅性格和背景的措辞，避免使用大模型自己的人设或其他角色的口头禅或表达方式。

Example:
    generate_voice(\"愿你前行的道路有群星闪耀，愿你留下的足迹有百花绽放。你即是上帝的馈赠，世界因你而瑰丽。\", \"崩环三-中文-爱莉希雅\", \"中文\", \"默认\")";

/// Lets the agent pick a voice model, synthesize speech and send it as a voice message.
pub struct AnimeTtsPlugin {
    metadata: PluginMetadata,
    tts: TtsClient,
    delivery: VoiceDelivery,
}

impl AnimeTtsPlugin {
    pub fn new(tts: TtsClient, delivery: VoiceDelivery) -> Self {
        Self {
            metadata: default_metadata(),
            tts,
            delivery,
        }
    }

    /// Build the HTTP TTS client and the OneBot backend from configuration.
    pub fn from_config(config: &PluginConfig) -> Result<Self> {
        let tts = TtsClient::builder().config(config.tts.clone()).build()?;
        let backend: Arc<dyn MessagingBackend> = Arc::new(OneBotHttpBackend::new(&config.onebot)?);
        Ok(Self::new(tts, VoiceDelivery::new(backend)))
    }

    pub fn tts(&self) -> &TtsClient {
        &self.tts
    }

    /// 获取所有生成语音可用的模型
    pub async fn get_tts_model(&self, _ctx: &AgentCtx) -> Result<String> {
        self.tts.list_models().await
    }

    /// 根据传入文本，语音模型，语言，语气生成一段音频的 URL
    pub async fn generate_voice(
        &self,
        _ctx: &AgentCtx,
        text: &str,
        model_name: &str,
        language: &str,
        emotion: &str,
    ) -> Result<String> {
        self.tts.synthesize(text, model_name, language, emotion).await
    }

    /// 发送语音消息. Failures are logged, never returned.
    pub async fn send_record_msg(&self, _ctx: &AgentCtx, chat_key: &str, voice_path: &str) {
        self.delivery.deliver(chat_key, voice_path).await
    }
}

fn default_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "二游语音生成插件".to_string(),
        module_name: "anime_tts".to_string(),
        description: "AI 自主选择语音模型使用 TTS 生成语音并直接发送语音条".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        author: "Jerry_FaGe".to_string(),
        url: "https://github.com/Jerry-FaGe/nekro-plugin-anime-tts".to_string(),
    }
}

fn schema_of<T: JsonSchema>() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or(serde_json::Value::Null)
}

fn parse_args<T: DeserializeOwned>(method: &str, args: serde_json::Value) -> Result<T> {
    // Hosts send `null` for methods without arguments.
    let args = if args.is_null() {
        serde_json::json!({})
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| {
        Error::validation_with_context(
            format!("Invalid arguments for {}: {}", method, e),
            ErrorContext::new()
                .with_field_path(format!("{}.args", method))
                .with_source("anime_tts"),
        )
    })
}

#[async_trait]
impl Plugin for AnimeTtsPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn methods(&self) -> Vec<SandboxMethod> {
        vec![
            SandboxMethod {
                name: METHOD_GET_TTS_MODEL.to_string(),
                display_name: "获取语音模型".to_string(),
                description: "获取所有生成语音可用的模型".to_string(),
                method_type: SandboxMethodType::Agent,
                parameters: schema_of::<GetTtsModelArgs>(),
            },
            SandboxMethod {
                name: METHOD_GENERATE_VOICE.to_string(),
                display_name: "生成语音".to_string(),
                description: GENERATE_VOICE_DOC.to_string(),
                method_type: SandboxMethodType::Tool,
                parameters: schema_of::<GenerateVoiceArgs>(),
            },
            SandboxMethod {
                name: METHOD_SEND_RECORD_MSG.to_string(),
                display_name: "发送语音消息".to_string(),
                description: "发送语音消息".to_string(),
                method_type: SandboxMethodType::Tool,
                parameters: schema_of::<SendRecordMsgArgs>(),
            },
        ]
    }

    async fn call(
        &self,
        ctx: &AgentCtx,
        method: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let span = tracing::info_span!("anime_tts", request_id = %ctx.request_id, method);
        async move {
            match method {
                METHOD_GET_TTS_MODEL => {
                    let _: GetTtsModelArgs = parse_args(method, args)?;
                    Ok(self.get_tts_model(ctx).await?.into())
                }
                METHOD_GENERATE_VOICE => {
                    let a: GenerateVoiceArgs = parse_args(method, args)?;
                    let url = self
                        .generate_voice(ctx, &a.text, &a.model_name, &a.language, &a.emotion)
                        .await?;
                    Ok(url.into())
                }
                METHOD_SEND_RECORD_MSG => {
                    let a: SendRecordMsgArgs = parse_args(method, args)?;
                    self.send_record_msg(ctx, &a.chat_key, &a.voice_path).await;
                    Ok(serde_json::Value::Null)
                }
                other => Err(Error::validation_with_context(
                    format!("Unknown method: {}", other),
                    ErrorContext::new().with_source("anime_tts"),
                )),
            }
        }
        .instrument(span)
        .await
    }

    async fn cleanup(&self) -> Result<()> {
        // The HTTP clients are shared handles; dropping the plugin releases them.
        info!("anime_tts plugin cleaned up");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_schemas_list_required_fields() {
        let schema = schema_of::<GenerateVoiceArgs>();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in ["text", "model_name", "language", "emotion"] {
            assert!(required.contains(&field), "missing {field}");
        }
        assert!(schema["properties"]["text"]["description"]
            .as_str()
            .unwrap()
            .contains("要生成语音的文本"));
    }

    #[test]
    fn test_null_args_accepted_for_empty_struct() {
        let _: GetTtsModelArgs = parse_args(METHOD_GET_TTS_MODEL, serde_json::Value::Null).unwrap();
    }

    #[test]
    fn test_bad_args_are_validation_errors() {
        let err = parse_args::<SendRecordMsgArgs>(
            METHOD_SEND_RECORD_MSG,
            serde_json::json!({"chat_key": "onebot-group_1"}),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(
            err.context().unwrap().field_path.as_deref(),
            Some("send_record_msg.args")
        );
    }
}
