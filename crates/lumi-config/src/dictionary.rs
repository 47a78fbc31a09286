use serde::{Deserialize, Serialize};

fn default_providers() -> Vec<String> {
    vec!["remote".to_string()]
}

fn default_offline_path() -> String {
    "lumi-dictionary.db".to_string()
}

fn default_free_api_base() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

/// Dictionary lookup configuration. `providers` is an ordered fallback
/// chain; known names are "remote", "offline" and "free-dictionary".
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
    #[serde(default = "default_offline_path")]
    pub offline_path: String,
    #[serde(default = "default_free_api_base")]
    pub free_api_base: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            offline_path: default_offline_path(),
            free_api_base: default_free_api_base(),
        }
    }
}
