//! Case Intake service binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use case_intake::adapters::{
    router, IdleSessionSweeper, IdleSessionSweeperConfig, InMemorySessionStore, IntakeAppState,
    LlmCaseAnalyzer, MockAIProvider, OpenAICompatibleConfig, OpenAICompatibleProvider,
};
use case_intake::config::{AiConfig, AiProviderKind, AppConfig, ServerConfig};
use case_intake::ports::{AIProvider, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate().context("validating configuration")?;
    info!(
        "Case Intake v{} starting ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.server.environment
    );

    let ai_provider = build_ai_provider(&config.ai)?;
    let provider_info = ai_provider.provider_info();
    info!(provider = %provider_info.name, model = %provider_info.model, "AI provider ready");

    let analyzer = Arc::new(
        LlmCaseAnalyzer::new(ai_provider)
            .with_temperature(config.ai.temperature)
            .with_max_tokens(config.ai.max_tokens),
    );
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = config.sessions.idle_ttl().map(|idle_ttl| {
        info!(idle_ttl_secs = idle_ttl.as_secs(), "Idle session eviction enabled");
        let sweeper = IdleSessionSweeper::new(
            store.clone(),
            IdleSessionSweeperConfig::new(idle_ttl)
                .with_sweep_interval(config.sessions.sweep_interval()),
        );
        tokio::spawn(async move { sweeper.run(shutdown_rx).await })
    });

    let app = router(IntakeAppState::new(store, analyzer))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server)?)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down gracefully");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(sweeper) = sweeper {
        let _ = sweeper.await;
    }
    Ok(())
}

fn build_ai_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>> {
    match config.provider {
        AiProviderKind::Mock => Ok(Arc::new(MockAIProvider::new())),
        AiProviderKind::OpenaiCompatible => {
            let api_key = config
                .api_key
                .clone()
                .context("AI API key is required for the openai_compatible provider")?;
            let provider = OpenAICompatibleProvider::new(
                OpenAICompatibleConfig::new(api_key)
                    .with_base_url(&config.base_url)
                    .with_model(&config.model)
                    .with_timeout(config.timeout())
                    .with_max_retries(config.max_retries),
            )?;
            Ok(Arc::new(provider))
        }
    }
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let origins = config.cors_origins_list();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(origins))
}
