use std::time::Duration;

use serde::Deserialize;

/// Locations and limits for the external collaborators of the pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluatorConfig {
    /// Base URL of the repository reader service. Default: "http://github-reader:5001".
    #[serde(default = "default_repository_reader_url")]
    pub repository_reader_url: String,
    /// Base URL of the video parser service. Default: "http://video-parser:5002".
    #[serde(default = "default_video_parser_url")]
    pub video_parser_url: String,
    /// Bound on each evidence request, in seconds. Default: 30.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub model: ModelConfig,
}

/// OpenAI-compatible chat completions endpoint used for judging.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Default: "https://api.cerebras.ai/v1".
    #[serde(default = "default_model_base_url")]
    pub base_url: String,
    /// Bearer token. Sent only when non-empty.
    #[serde(default)]
    pub api_key: String,
    /// Default: "llama-4-scout-17b-16e-instruct".
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Bound on the model call, in seconds. Default: 60.
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_repository_reader_url() -> String {
    "http://github-reader:5001".into()
}
fn default_video_parser_url() -> String {
    "http://video-parser:5002".into()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_model_base_url() -> String {
    "https://api.cerebras.ai/v1".into()
}
fn default_model_name() -> String {
    "llama-4-scout-17b-16e-instruct".into()
}
fn default_model_timeout_secs() -> u64 {
    60
}

impl EvaluatorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            repository_reader_url: default_repository_reader_url(),
            video_parser_url: default_video_parser_url(),
            request_timeout_secs: default_request_timeout_secs(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_model_base_url(),
            api_key: String::new(),
            name: default_model_name(),
            timeout_secs: default_model_timeout_secs(),
        }
    }
}
