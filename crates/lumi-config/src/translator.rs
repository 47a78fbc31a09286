use serde::{Deserialize, Serialize};

fn default_provider() -> String {
    "remote".to_string()
}

fn default_target_lang() -> String {
    "zh".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "qwen3:4b-instruct".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_num_predict() -> u32 {
    512
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// "remote", "ollama" or "mock"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            target_lang: default_target_lang(),
            source_lang: None,
            ollama: OllamaConfig::default(),
        }
    }
}

/// Locally reachable generative-model endpoint.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
            temperature: default_temperature(),
            num_predict: default_num_predict(),
        }
    }
}
