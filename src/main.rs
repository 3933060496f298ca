//! Angel Interviewer - pitch-deck interviews with an LLM angel investor
//!
//! Founders upload a deck (PDF, DOCX or PPTX), answer the investor's
//! questions, and receive a final review.

mod api;
mod config;
mod extract;
mod interview;
mod llm;

use api::{create_router, AppState};
use config::Config;
use interview::{Interviewer, SessionStore};
use llm::{GeminiService, LlmService, LoggingService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "angel_interviewer=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    if config.llm.api_key.is_empty() && config.llm.gateway.is_none() {
        tracing::warn!("No model credentials configured. Set GEMINI_API_KEY or LLM_GATEWAY.");
    }

    let gemini = GeminiService::new(
        config.llm.api_key.clone(),
        &config.llm.model,
        config.llm.gateway.as_deref(),
        config.llm.timeout,
    )?;
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(gemini)));

    let interviewer = Interviewer::new(
        llm,
        SessionStore::new(config.session_ttl),
        config.llm.max_output_tokens,
    );
    let state = AppState::new(interviewer);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state, config.max_upload_bytes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Angel interviewer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
