mod conclusion;
mod config;
mod dispatch;
mod errors;
mod llm_client;
mod pipeline;
mod routes;
mod scoring;
mod sentiment;
mod state;
mod survey;
mod translation;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::conclusion::{ConclusionMode, ConclusionStrategy, FallbackPolicy, RuleConcluder};
use crate::config::Config;
use crate::dispatch::{HttpTransport, SubmissionDispatcher};
use crate::llm_client::LlmClient;
use crate::pipeline::EligibilityPipeline;
use crate::routes::build_router;
use crate::scoring::RuleScorer;
use crate::sentiment::SentimentScorer;
use crate::state::AppState;
use crate::translation::HttpTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort start-up
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Motopack API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client for every external call
    let http = reqwest::Client::builder()
        .timeout(config.external_timeout)
        .build()?;

    let translator = HttpTranslator::new(
        http.clone(),
        config.translation_api_url.clone(),
        config.translation_api_key.clone(),
    );
    if config.translation_api_url.is_none() {
        warn!("TRANSLATION_API_URL not set, open answers will be scored untranslated");
    }

    let concluder = build_conclusion_strategy(&config, http.clone());
    info!("Conclusion strategy: {}", concluder.label());

    let dispatcher = SubmissionDispatcher::new(
        config.webhook_url.clone(),
        Arc::new(HttpTransport::new(http)),
    );
    if !dispatcher.is_configured() {
        warn!("MAKE_WEBHOOK_URL not set, every submission will fail to deliver");
    }

    let scorer = RuleScorer::new(config.scoring_rules.clone());
    info!(
        "Scoring rules: {} categorical, {} numeric",
        scorer.rules().categorical.len(),
        scorer.rules().numeric.len()
    );

    let pipeline = EligibilityPipeline::new(
        Arc::new(translator),
        config.target_language.clone(),
        SentimentScorer::default(),
        scorer,
        concluder,
        dispatcher,
    );

    // Build router
    let app = build_router(AppState::new(pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form's public host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Motopack API stopped");
    Ok(())
}

/// Selects the conclusion strategy from `CONCLUSION_STRATEGY` and `LLM_FALLBACK`.
fn build_conclusion_strategy(config: &Config, http: reqwest::Client) -> ConclusionStrategy {
    let rules = RuleConcluder::new(config.thresholds.clone());
    let t = rules.thresholds();
    info!(
        "Conclusion thresholds: low={} high={} buffers=+{}/-{}",
        t.low, t.high, t.positive_buffer, t.negative_buffer
    );
    match config.conclusion_mode {
        ConclusionMode::Rules => ConclusionStrategy::Rules(rules),
        ConclusionMode::Llm => {
            let llm = LlmClient::new(
                http,
                config.llm_api_url.clone(),
                config.openai_api_key.clone(),
            );
            if !llm.has_credential() {
                warn!("CONCLUSION_STRATEGY=llm but OPENAI_API_KEY is not set");
            }
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            ConclusionStrategy::Llm {
                generator: Arc::new(llm),
                fallback: match config.llm_fallback {
                    FallbackPolicy::None => None,
                    FallbackPolicy::Rules => Some(rules),
                },
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
