// bases/ui_server/src/server.rs
use crate::config::Config;
use crate::handlers;
use axum::routing::{get, post};
use axum::Router;
use session_registry::SessionRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;
use ytdlp_bridge::{VideoTool, YtDlp};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tool: Arc<dyn VideoTool>,
    pub registry: SessionRegistry,
    pub config: Config,
}

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/formats", post(handlers::formats))
        .route("/api/download", post(handlers::download))
        .route("/api/progress/:id", get(handlers::progress))
        .route("/api/pause/:id", post(handlers::pause))
        .route("/api/resume/:id", post(handlers::resume))
        .route("/api/cancel/:id", post(handlers::cancel))
        .route("/api/folders", post(handlers::folders))
        .route("/api/create-folder", post(handlers::create_folder))
        .route("/api/default-folder", get(handlers::default_folder))
        .route("/api/open-folder", post(handlers::open_folder))
        .route("/api/storage", get(handlers::storage))
        .route("/api/zip", post(handlers::zip))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Run the UI server until interrupted.
pub async fn run(config: Config) -> color_eyre::Result<()> {
    let tool = YtDlp::locate()?;
    let state = AppState {
        tool: Arc::new(tool),
        registry: SessionRegistry::new(),
        config: config.clone(),
    };

    let app = router(state);
    let addr = SocketAddr::new(config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("vidhaul listening on http://{addr}");
    info!("downloads default to {}", config.download_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}
