//! TTS（文字转语音）模块：查询可用语音模型，按模型/语言/语气合成语音并返回音频 URL。

mod client;
mod seed;
mod types;

pub use client::{TtsClient, TtsClientBuilder};
pub use seed::{FixedSeed, SeedSource, ThreadRngSeed};
pub use types::{
    ModelCatalog, ModelMap, SynthesisRequest, SynthesisResponse, SynthesisStatus, API_VERSION,
    MAX_SEED, STATUS_PARAMETER_ERROR, STATUS_SUCCESS,
};
