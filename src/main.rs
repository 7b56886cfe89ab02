use std::sync::Arc;

use candidate_onboarding::api::{CandidateApi, HttpCandidateApi};
use candidate_onboarding::config::{ApiConfig, ServerConfig};
use candidate_onboarding::onboarding::{OnboardingManager, OnboardingRouteState, onboarding_routes};
use candidate_onboarding::session::SessionContext;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let api_config = ApiConfig::from_env()?;
    let server_config = ServerConfig::from_env();
    let session = SessionContext::from_env();

    eprintln!("Candidate onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", api_config.base_url);
    eprintln!(
        "   Server token: {}",
        if api_config.server_token.is_some() { "set" } else { "not set" }
    );
    eprintln!(
        "   User session: {}",
        if session.is_authenticated().await { "token from env" } else { "signed out" }
    );

    let api: Arc<dyn CandidateApi> = Arc::new(HttpCandidateApi::new(&api_config, session)?);
    let manager = Arc::new(OnboardingManager::new(api));
    tracing::info!(session = %manager.id(), "Wizard session ready");

    let app = onboarding_routes(OnboardingRouteState { manager }).layer(CorsLayer::permissive());

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("   Wizard API: http://{}/api/onboarding/status\n", addr);
    tracing::info!(addr = %addr, "Onboarding server started");
    axum::serve(listener, app).await?;

    Ok(())
}
