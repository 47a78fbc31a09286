use std::sync::Arc;

use anyhow::bail;
use lumi_config::dictionary::DictionaryConfig;
use lumi_config::network::NetworkConfig;
use lumi_core::dictionary::DictionaryProvider;

pub mod chain;
pub mod error;
pub mod free_dict;
pub mod offline;
pub mod remote;

pub use chain::DictionaryChain;
pub use error::DictionaryError;
pub use free_dict::FreeDictionary;
pub use offline::OfflineDictionary;
pub use remote::RemoteDictionary;

/// Build the configured provider (or fallback chain of providers) once at
/// startup. Variants are a closed set selected here; nothing downstream
/// inspects provider types.
pub fn create_dictionary_provider(
    network: &NetworkConfig,
    config: &DictionaryConfig,
) -> anyhow::Result<Arc<dyn DictionaryProvider>> {
    let mut providers: Vec<Arc<dyn DictionaryProvider>> = Vec::new();

    for name in &config.providers {
        let provider: Arc<dyn DictionaryProvider> = match name.as_str() {
            "remote" => Arc::new(RemoteDictionary::new(
                network.api_base.clone(),
                network.auth_token.clone(),
            )),
            "offline" => Arc::new(OfflineDictionary::open(&config.offline_path)?),
            "free-dictionary" => Arc::new(FreeDictionary::new(config.free_api_base.clone())),
            other => bail!("unknown dictionary provider: {other}"),
        };
        providers.push(provider);
    }

    match providers.len() {
        0 => bail!("no dictionary providers configured"),
        1 => Ok(providers.remove(0)),
        _ => Ok(Arc::new(DictionaryChain::new(providers))),
    }
}
