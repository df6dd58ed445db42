//! TTS (Text-to-Speech) wire types.

use serde::Serialize;
use std::collections::BTreeMap;

/// Protocol version marker sent with every request.
pub const API_VERSION: &str = "v4";
/// Backend status for rejected model/language/emotion values.
pub const STATUS_PARAMETER_ERROR: &str = "参数错误";
/// Backend status for a finished synthesis.
pub const STATUS_SUCCESS: &str = "合成成功";
/// Split the input text on punctuation.
pub const SPLIT_BY_PUNCTUATION: &str = "按标点符号切";
/// Largest seed value the backend accepts.
pub const MAX_SEED: u64 = 999_999_999;

/// Body of `POST infer_single`.
///
/// Only text, model, language, emotion and seed vary; everything else is fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub version: &'static str,
    pub model_name: String,
    pub prompt_text_lang: String,
    pub emotion: String,
    pub text: String,
    pub text_lang: String,
    pub top_k: u32,
    pub top_p: u32,
    pub temperature: u32,
    pub text_split_method: &'static str,
    pub batch_size: u32,
    pub batch_threshold: f64,
    pub split_bucket: bool,
    // Spelled the way the backend expects it.
    pub speed_facter: u32,
    pub fragment_interval: f64,
    pub media_type: &'static str,
    pub parallel_infer: bool,
    pub repetition_penalty: f64,
    pub seed: u64,
    pub sample_steps: u32,
    pub if_sr: bool,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        model_name: impl Into<String>,
        language: impl Into<String>,
        emotion: impl Into<String>,
        seed: u64,
    ) -> Self {
        let language = language.into();
        Self {
            version: API_VERSION,
            model_name: model_name.into(),
            prompt_text_lang: language.clone(),
            emotion: emotion.into(),
            text: text.into(),
            text_lang: language,
            top_k: 10,
            top_p: 1,
            temperature: 1,
            text_split_method: SPLIT_BY_PUNCTUATION,
            batch_size: 1,
            batch_threshold: 0.75,
            split_bucket: true,
            speed_facter: 1,
            fragment_interval: 0.3,
            media_type: "wav",
            parallel_infer: true,
            repetition_penalty: 1.35,
            seed,
            sample_steps: 16,
            if_sr: false,
        }
    }
}

/// Reply of `POST infer_single`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisResponse {
    pub msg: Option<String>,
    pub audio_url: Option<String>,
}

/// What the backend's `msg` field says about a synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisStatus {
    Success(String),
    ParameterError,
    Unknown,
}

impl SynthesisResponse {
    /// Read the two fields the backend is judged by. Each field is taken on its own,
    /// so a non-string `audio_url` cannot hide the status in `msg`.
    pub fn from_value(data: &serde_json::Value) -> Self {
        let field = |key: &str| {
            data.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Self {
            msg: field("msg"),
            audio_url: field("audio_url"),
        }
    }

    /// Classify the reply. Parameter errors win over everything else; a success
    /// without an audio URL counts as unknown.
    pub fn status(&self) -> SynthesisStatus {
        match self.msg.as_deref() {
            Some(STATUS_PARAMETER_ERROR) => SynthesisStatus::ParameterError,
            Some(STATUS_SUCCESS) => match &self.audio_url {
                Some(url) => SynthesisStatus::Success(url.clone()),
                None => SynthesisStatus::Unknown,
            },
            _ => SynthesisStatus::Unknown,
        }
    }
}

/// model name → language → emotions
pub type ModelMap = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// The backend's model catalog, raw and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalog {
    raw: serde_json::Value,
    models: ModelMap,
}

impl ModelCatalog {
    /// Build from a `POST models` reply. A missing `models` key gives an empty catalog.
    pub fn from_response(mut response: serde_json::Value) -> Self {
        let raw = response
            .get_mut("models")
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null);
        let models = serde_json::from_value(raw.clone()).unwrap_or_default();
        Self { raw, models }
    }

    /// The mapping exactly as the backend sent it.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    pub fn models(&self) -> &ModelMap {
        &self.models
    }

    pub fn languages(&self, model: &str) -> Option<Vec<&str>> {
        self.models
            .get(model)
            .map(|langs| langs.keys().map(String::as_str).collect())
    }

    pub fn emotions(&self, model: &str, language: &str) -> Option<&[String]> {
        self.models
            .get(model)
            .and_then(|langs| langs.get(language))
            .map(Vec::as_slice)
    }

    /// Agent-facing text embedding the raw mapping.
    pub fn summary(&self) -> String {
        format!(
            "[get_tts_model Results]\n{}\n这是语音生成接口可用的全部模型，键为模型名，值为该模型可用的语言字典，语言字典内为语气列表，请根据用户要求从中选择一个最合适的。",
            self.raw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let req = SynthesisRequest::new("你好", "崩环三-中文-爱莉希雅", "中文", "默认", 42);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["version"], "v4");
        assert_eq!(v["model_name"], "崩环三-中文-爱莉希雅");
        assert_eq!(v["prompt_text_lang"], "中文");
        assert_eq!(v["text_lang"], "中文");
        assert_eq!(v["emotion"], "默认");
        assert_eq!(v["text"], "你好");
        assert_eq!(v["top_k"], 10);
        assert_eq!(v["text_split_method"], "按标点符号切");
        assert_eq!(v["batch_size"], 1);
        assert_eq!(v["split_bucket"], true);
        for key in ["top_p", "temperature", "speed_facter"] {
            assert_eq!(v[key], 1);
            assert!(v[key].is_u64(), "{} should be an integer", key);
        }
        assert_eq!(v["fragment_interval"], 0.3);
        assert_eq!(v["media_type"], "wav");
        assert_eq!(v["parallel_infer"], true);
        assert_eq!(v["repetition_penalty"], 1.35);
        assert_eq!(v["seed"], 42);
        assert_eq!(v["sample_steps"], 16);
        assert_eq!(v["if_sr"], false);
        assert_eq!(v.as_object().unwrap().len(), 21);
    }

    #[test]
    fn test_status_classification() {
        let parse = |v: serde_json::Value| SynthesisResponse::from_value(&v);

        assert_eq!(
            parse(json!({"msg": "参数错误", "audio_url": "https://x/y.wav"})).status(),
            SynthesisStatus::ParameterError
        );
        assert_eq!(
            parse(json!({"msg": "合成成功", "audio_url": "https://x/y.wav"})).status(),
            SynthesisStatus::Success("https://x/y.wav".into())
        );
        assert_eq!(parse(json!({"msg": "合成成功"})).status(), SynthesisStatus::Unknown);
        assert_eq!(parse(json!({"msg": "something else"})).status(), SynthesisStatus::Unknown);
        assert_eq!(parse(json!({})).status(), SynthesisStatus::Unknown);
        assert_eq!(parse(json!("合成成功")).status(), SynthesisStatus::Unknown);
    }

    #[test]
    fn test_status_ignores_mistyped_audio_url() {
        let parse = |v: serde_json::Value| SynthesisResponse::from_value(&v);

        assert_eq!(
            parse(json!({"msg": "参数错误", "audio_url": 0})).status(),
            SynthesisStatus::ParameterError
        );
        assert_eq!(
            parse(json!({"msg": "参数错误", "audio_url": false})).status(),
            SynthesisStatus::ParameterError
        );
        assert_eq!(
            parse(json!({"msg": "合成成功", "audio_url": 0})).status(),
            SynthesisStatus::Unknown
        );
        assert_eq!(
            parse(json!({"msg": 7, "audio_url": "https://x/y.wav"})).status(),
            SynthesisStatus::Unknown
        );
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = ModelCatalog::from_response(json!({
            "models": {
                "原神-中文-胡桃": {"中文": ["默认", "开心"], "日语": ["默认"]}
            }
        }));
        assert_eq!(catalog.languages("原神-中文-胡桃").unwrap(), vec!["中文", "日语"]);
        assert_eq!(
            catalog.emotions("原神-中文-胡桃", "中文").unwrap(),
            &["默认".to_string(), "开心".to_string()]
        );
        assert!(catalog.emotions("原神-中文-胡桃", "英语").is_none());
        assert!(catalog.languages("missing").is_none());
    }

    #[test]
    fn test_catalog_without_models_key() {
        let catalog = ModelCatalog::from_response(json!({"detail": "nope"}));
        assert!(catalog.models().is_empty());
        assert!(catalog.summary().starts_with("[get_tts_model Results]\nnull\n"));
    }

    #[test]
    fn test_catalog_keeps_unexpected_shapes_raw() {
        let catalog = ModelCatalog::from_response(json!({"models": ["a", "b"]}));
        assert!(catalog.models().is_empty());
        assert!(catalog.summary().contains(r#"["a","b"]"#));
    }
}
