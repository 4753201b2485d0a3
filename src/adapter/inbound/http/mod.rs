//! HTTP API.
//!
//! | Method | Path | Handler |
//! | --- | --- | --- |
//! | `POST` | `/client/`, `/client` | [`handler::create_client`] |
//! | `GET` | `/client/clients` | [`handler::list_clients`] |
//! | `GET` | `/client/{client_id}` | [`handler::get_client`] |
//! | `GET` | `/health` | [`health::health`] |

pub mod error;
pub mod handler;
pub mod health;
pub mod query;

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::application::client::ClientService;

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClientService>,
}

impl AppState {
    pub fn new(service: Arc<ClientService>) -> Self {
        Self { service }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/client/", post(handler::create_client))
        .route("/client", post(handler::create_client))
        .route("/client/clients", get(handler::list_clients))
        .route("/client/{client_id}", get(handler::get_client))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns the listener's I/O error if serving fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
