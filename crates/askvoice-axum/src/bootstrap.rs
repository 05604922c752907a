//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where concrete adapters are wired
//! together: the Gemini client, the process-backed speech supervisor and
//! the `/ask` admission controller.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use askvoice_core::AppConfig;
use askvoice_core::config::{AdmissionSettings, AnswerSettings, SpeechSettings};
use askvoice_core::ports::{AnswerPort, SpeechPort};
use askvoice_core::services::AnswerService;
use askvoice_gemini::{GeminiClient, GeminiConfig};
use askvoice_runtime::{RateLimiter, SpeechSupervisor};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Optional path to static assets served at `/`.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    pub answer: AnswerSettings,
    pub admission: AdmissionSettings,
    pub speech: SpeechSettings,
}

impl ServerConfig {
    /// Take listener and service settings from the loaded configuration.
    pub fn from_app_config(config: AppConfig) -> Self {
        Self {
            host: config.server.host,
            port: config.server.port,
            static_dir: config.server.static_dir,
            cors: CorsConfig::default(),
            answer: config.answer,
            admission: config.admission,
            speech: config.speech,
        }
    }

    /// Set the static directory served at `/`.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
///
/// Handlers depend only on what is held here.
pub struct AxumContext {
    /// Answer orchestrator.
    pub answers: Arc<AnswerService>,
    /// Speech supervisor as a port.
    pub speech: Arc<dyn SpeechPort>,
    /// Admission controller guarding `/ask`.
    pub limiter: Arc<RateLimiter>,
}

impl AxumContext {
    pub fn new(
        answers: Arc<AnswerService>,
        speech: Arc<dyn SpeechPort>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            answers,
            speech,
            limiter,
        }
    }
}

/// Build every service from configuration.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let gemini = GeminiClient::new(GeminiConfig::from_settings(&config.answer))
        .context("Failed to create Gemini client")?;
    info!(model = gemini.model(), "Answering service configured");
    let answer_port: Arc<dyn AnswerPort> = Arc::new(gemini);

    let supervisor = SpeechSupervisor::from_settings(&config.speech);
    let stop_timeout_ms =
        u64::try_from(config.speech.stop_timeout.as_millis()).unwrap_or(u64::MAX);
    info!(
        program = %config.speech.program,
        stop_timeout_ms,
        "Speech engine configured"
    );

    let limiter = RateLimiter::from_settings(&config.admission)
        .context("Invalid admission settings")?;
    info!(
        max_per_second = config.admission.max_per_second,
        policy = %config.admission.policy,
        "Admission control configured"
    );

    Ok(AxumContext::new(
        Arc::new(AnswerService::new(answer_port)),
        Arc::new(supervisor),
        Arc::new(limiter),
    ))
}

/// Start the web server and run until Ctrl-C.
///
/// If `config.static_dir` is set, serves static assets at `/` as well.
/// Live speech is stopped before returning.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config)?;
    let speech = Arc::clone(&ctx.speech);

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("askvoice listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = speech.stop_speech().await {
        warn!("Failed to stop speech on shutdown: {e}");
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use askvoice_core::config::API_KEY_VAR;

    fn app_config() -> AppConfig {
        AppConfig::from_lookup(|key: &str| (key == API_KEY_VAR).then(|| "test-key".to_string()))
            .unwrap()
    }

    #[test]
    fn server_config_takes_listener_settings() {
        let config = ServerConfig::from_app_config(app_config());
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert!(config.static_dir.is_none());
        assert!(matches!(config.cors, CorsConfig::AllowAll));
    }

    #[test]
    fn builders_override_defaults() {
        let config = ServerConfig::from_app_config(app_config())
            .with_static_dir("./static")
            .with_allowed_origins(vec!["http://localhost:3000".into()]);
        assert_eq!(config.static_dir, Some(PathBuf::from("./static")));
        assert!(matches!(config.cors, CorsConfig::AllowOrigins(ref o) if o.len() == 1));
    }

    #[tokio::test]
    async fn bootstrap_wires_services() {
        let ctx = bootstrap(&ServerConfig::from_app_config(app_config())).unwrap();
        assert_eq!(
            ctx.limiter.min_interval(),
            std::time::Duration::from_secs_f64(1.0 / 3.0)
        );
        assert!(!ctx.speech.status().await.is_speaking());
    }
}
