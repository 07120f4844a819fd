//! RFPLens Server
//!
//! HTTP transport for the RFP analysis pipeline. Exposes document upload
//! and URL analysis routes over the engine, reading provider credentials
//! from the environment at startup.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;

use config::{Credentials, ServerConfig};
use handlers::{create_router, AppState};
use rfplens_extract::WebExtractor;
use rfplens_llm::{GeminiProvider, OpenAiProvider};
use rfplens_pipeline::{AnalysisEngine, FieldCatalog};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Extraction setup error
    #[error("Extractor setup error: {0}")]
    Extract(#[from] rfplens_extract::ExtractError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Validates configuration, builds the two providers from config plus the
/// supplied credentials, and serves until shutdown. Missing credentials are
/// logged but not fatal; the affected routes answer with a configuration
/// error instead.
pub async fn start_server(
    config: ServerConfig,
    credentials: Credentials,
) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting RFPLens server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Upload limits: {} files, {} bytes each",
        config.limits.max_files, config.limits.max_file_bytes
    );

    if credentials.openai_api_key.is_none() {
        warn!("no OpenAI API key in environment; analysis routes will refuse requests");
    }
    if credentials.gemini_api_key.is_none() {
        warn!("no Gemini API key in environment; the form-fill route will refuse requests");
    }

    let analysis = OpenAiProvider::new(
        config.openai.base_url.clone(),
        config.openai.model.clone(),
        credentials.openai_api_key,
    );
    let form_fill = GeminiProvider::new(
        config.gemini.base_url.clone(),
        config.gemini.model.clone(),
        credentials.gemini_api_key,
    );

    let state = AppState {
        engine: Arc::new(AnalysisEngine::new(Arc::new(analysis), Arc::new(form_fill))),
        web: Arc::new(WebExtractor::new()?),
        catalog: Arc::new(FieldCatalog::builtin()),
        limits: config.limits,
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("RFPLens listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
