use analytics::StatsEngine;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use database::{CrewRepository, MissionRepository};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod handlers;
pub mod stats;

pub use auth::{AccessDecision, AccessPolicy, AllowAll, BearerTokenPolicy, RequestContext};
pub use stats::{RepositoryStatsSource, StatsSource};

/// The shared application state that all handlers can access.
pub struct AppState {
    pub missions: Arc<dyn MissionRepository>,
    pub crew: Arc<dyn CrewRepository>,
    pub stats: Arc<dyn StatsSource>,
    pub policy: Arc<dyn AccessPolicy>,
    pub engine: StatsEngine,
}

impl AppState {
    /// Wires a single store that serves both missions and crew, with stats
    /// computed from its mission snapshots.
    pub fn new<R>(repo: R, policy: Arc<dyn AccessPolicy>) -> Self
    where
        R: MissionRepository + CrewRepository + 'static,
    {
        let repo = Arc::new(repo);
        let missions: Arc<dyn MissionRepository> = repo.clone();
        Self {
            stats: Arc::new(RepositoryStatsSource::new(missions.clone())),
            missions,
            crew: repo,
            policy,
            engine: StatsEngine::new(),
        }
    }
}

/// Builds the application router. Mission routes sit behind the access policy;
/// crew routes and the health check do not.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let mission_routes = Router::new()
        .route("/missions", get(handlers::list_missions))
        .route("/missions/stats", get(handlers::get_mission_stats))
        .route("/missions/:id", get(handlers::get_mission))
        .route("/missions/:id/duration", get(handlers::get_mission_duration))
        .route("/missions/:id/:action", post(handlers::apply_mission_action))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_access,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/crew", get(handlers::list_crew))
        .route("/crew/:id", get(handlers::get_crew_member))
        .route("/crew/status/:status", get(handlers::get_crew_by_status))
        .route("/crew/mission/:mission_id", get(handlers::get_crew_by_mission))
        .merge(mission_routes)
        .with_state(state)
        .layer(cors)
        // Logs every incoming request and its response status.
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn run_server(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Web server started.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
    }
}
