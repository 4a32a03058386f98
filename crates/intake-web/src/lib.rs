//! Intake Web Server
//!
//! Axum-based server for the patient intake form, the staff dashboard, and
//! the real-time WebSocket channel between them.

pub mod protocol;
pub mod registry;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/patient-form", get(routes::pages::patient_form))
        .route("/staff", get(routes::pages::staff_view))
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Intake server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
