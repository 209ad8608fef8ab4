//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod documents;
pub mod error;
mod schemas;
mod workers;

use axum::Router;
use axum::response::{IntoResponse, Response};
use tower_http::trace::TraceLayer;

pub use crate::handler::error::{Error, ErrorKind, Result};

use crate::state::AppState;

#[inline]
async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns the complete coordinator router over the given state.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(documents::routes())
        .merge(workers::routes())
        .merge(schemas::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
