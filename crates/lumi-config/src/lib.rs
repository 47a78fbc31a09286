use std::env;

use serde::{Deserialize, Serialize};

use self::annotate::AnnotateConfig;
use self::dictionary::DictionaryConfig;
use self::network::NetworkConfig;
use self::translator::TranslatorConfig;

pub mod annotate;
pub mod dictionary;
pub mod network;
pub mod translator;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub dictionary: DictionaryConfig,
    pub translator: TranslatorConfig,
    pub annotate: AnnotateConfig,
}

impl Config {
    /// Defaults with environment overrides for the knobs that change
    /// between installs.
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Ok(api_base) = env::var("LUMI_API_BASE") {
            config.network.api_base = api_base;
        }
        if let Ok(token) = env::var("LUMI_AUTH_TOKEN") {
            config.network.auth_token = Some(token);
        }
        if let Ok(providers) = env::var("LUMI_DICTIONARY_PROVIDERS") {
            config.dictionary.providers = providers
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        if let Ok(path) = env::var("LUMI_OFFLINE_DB") {
            config.dictionary.offline_path = path;
        }
        if let Ok(provider) = env::var("LUMI_TRANSLATOR") {
            config.translator.provider = provider;
        }
        if let Ok(url) = env::var("OLLAMA_URL") {
            config.translator.ollama.base_url = url;
        }
        if let Ok(model) = env::var("OLLAMA_MODEL") {
            config.translator.ollama.model = model;
        }
        if let Ok(ms) = env::var("LUMI_DEBOUNCE_MS") {
            if let Ok(parsed) = ms.parse() {
                config.annotate.debounce_ms = parsed;
            }
        }

        config
    }
}
