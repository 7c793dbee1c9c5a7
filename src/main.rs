mod config;
mod dto;
mod handlers;
mod mapping;
mod models;
mod repository;
mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use std::sync::Arc;

use handlers::rest;
use repository::Repository;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::{NoteService, checker::GrammarChecker};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes api config");

    // Repository creation and migration
    let mut repo = Repository::new(&cfg.database_dsn)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let checker = GrammarChecker::new(cfg.grammar_check_url.clone());
    let service = Arc::new(NoteService::new(Arc::new(repo), checker));

    let router = build_router(service);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind to port {}: {e}", cfg.port));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("failed to read listener address: {e}"));

    tracing::info!("REST server starting, listening on {}", addr);
    tracing::info!("Grammar checks are sent to {}", cfg.grammar_check_url);

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}

fn build_router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/note", rest::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
