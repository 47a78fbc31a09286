use std::sync::Arc;

use lumi_config::Config;
use lumi_core::language::LanguageAnalyzer;
use lumi_lang_english::EnglishAnalyzer;
use tokio::signal;

mod bridge;
mod controller;
mod events;
mod io;
mod selection;
mod state;

#[cfg(test)]
mod tests;

use controller::AppController;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumi=info".into()),
        )
        .init();

    let config = Config::new();
    let dictionary = lumi_dictionary::create_dictionary_provider(&config.network, &config.dictionary)?;
    let translator =
        lumi_translator::create_translation_provider(&config.network, &config.translator)?;
    let analyzer: Arc<dyn LanguageAnalyzer> = Arc::new(EnglishAnalyzer::new());
    tracing::info!(
        "providers: dictionary={} translator={}",
        dictionary.name(),
        translator.name()
    );

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(analyzer, dictionary, translator).await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            controller.shutdown();
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
            controller.shutdown();
        }
    }

    tasks.shutdown().await;
    Ok(())
}
