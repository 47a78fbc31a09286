use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_max_selection_len() -> usize {
    100
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnnotateConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Quiet window before a selection burst is forwarded to lookup
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Selections longer than this are ignored
    #[serde(default = "default_max_selection_len")]
    pub max_selection_len: usize,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            debounce_ms: default_debounce_ms(),
            max_selection_len: default_max_selection_len(),
        }
    }
}
