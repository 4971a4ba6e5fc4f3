//! HTTP surface of the quiz.
//!
//! # Endpoints
//! - `GET /`, `HEAD /`: current question plus progress, or the completion
//!   summary once the store has no question for the current index
//! - `PUT /:answer`: grade `answer` (zero-based option index) and advance
//! - `OPTIONS`: empty 200, CORS headers attached by the CORS layer
//! - `GET /health`: liveness
//!
//! Progress lives entirely in the `quizA-1` cookie; every question or graded
//! response carries an updated `Set-Cookie`. Completion responses do not.
//!
//! # Running
//!
//! Seed questions, then start the server.
//! ```sh
//! cargo run -p storage --bin seed -- --file questions.json
//! RUST_LOG=info cargo run -p server
//! ```

use axum::{
    Router,
    routing::{get, put},
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use cors::create_cors_layer;
use routes::{
    answer_handler, health_handler, missing_answer_handler, preflight_handler, question_handler,
    reserved_answer_handler,
};
use state::AppState;

/// Builds the application router.
pub fn build_router(config: &Config, state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(question_handler)
                .put(missing_answer_handler)
                .options(preflight_handler),
        )
        .route(
            "/health",
            get(health_handler).put(reserved_answer_handler),
        )
        .route(
            "/:answer",
            put(answer_handler).options(preflight_handler),
        )
        .layer(create_cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured port and serves until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an I/O error if the port cannot be bound or serving fails.
pub async fn start_server(config: Config, state: AppState) -> std::io::Result<()> {
    let app = build_router(&config, state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!(
        environment = %config.environment,
        cookie_domain = %config.cookie_domain,
        origin = %config.allowed_origin,
        "Server running on {address}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
