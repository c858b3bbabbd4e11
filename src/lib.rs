//! Documentation of the flame matchmaking site backend.
//!
//! # General Infrastructure
//! - Static pages (`/flame`, `/calc`, `/coming`) are plain HTML served out of
//!   `public/`, with `/` redirecting to `/flame`
//! - One data endpoint, `POST /submit`, records a pairing (two names + a mode)
//! - Submissions land in a single JSON file owned by [`store::SubmissionStore`];
//!   nothing else reads or writes that file
//! - Single process, no database, no accounts
//!
//! # Environment
//!
//! | Variable           | Default            |
//! |--------------------|--------------------|
//! | `RUST_PORT`        | `8080`             |
//! | `SUBMISSIONS_FILE` | `submissions.json` |
//! | `PUBLIC_DIR`       | `public`           |
//!
//! Log verbosity follows `RUST_LOG`.
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

use routes::{root_handler, submit_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let public = &state.config.public_dir;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(root_handler))
        .route("/submit", post(submit_handler))
        .route_service("/flame", ServeFile::new(public.join("flame.html")))
        .route_service("/calc", ServeFile::new(public.join("calc.html")))
        .route_service("/coming", ServeFile::new(public.join("coming.html")))
        .fallback_service(ServeDir::new(public))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
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
