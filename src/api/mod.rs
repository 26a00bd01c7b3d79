//! REST API over a single sizing session.
//!
//! Endpoints:
//! - `GET /scenario` — session scenario, loads included
//! - `GET /loads`, `POST /loads`, `DELETE /loads` — read, append to, or clear the load list
//! - `GET /evaluation` — evaluation of the session
//! - `POST /evaluate` — stateless evaluation of a posted scenario

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::ScenarioConfig;
use crate::loads::LoadList;

pub use types::{AppendResponse, ErrorResponse};

/// Mutable state of the one session the server holds.
#[derive(Debug)]
pub struct Session {
    /// Technical and pricing parameters; its `loads` field is not used.
    pub scenario: ScenarioConfig,
    /// Loads entered so far.
    pub loads: LoadList,
}

/// Application state shared across all request handlers.
pub struct AppState {
    pub session: RwLock<Session>,
}

impl AppState {
    /// Starts a session from `scenario`, taking its loads as the initial list.
    pub fn new(scenario: ScenarioConfig) -> Self {
        let loads = scenario.load_list();
        Self {
            session: RwLock::new(Session { scenario, loads }),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scenario", get(handlers::get_scenario))
        .route(
            "/loads",
            get(handlers::get_loads)
                .post(handlers::append_load)
                .delete(handlers::clear_loads),
        )
        .route("/evaluation", get(handlers::get_evaluation))
        .route("/evaluate", post(handlers::post_evaluate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
