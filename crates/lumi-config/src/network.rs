use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// Backend API endpoint and auth. The bearer token is optional for read
/// paths; write paths (highlights, notes, vocabulary) require it.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            auth_token: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
