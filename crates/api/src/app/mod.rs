//! HTTP application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP handlers (one file per area)
//! - `dto.rs`: request shapes that only exist at the HTTP boundary
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use feedback_domain::FeedbackService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handler state. Cheap to clone; the service holds the repository behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub feedback: FeedbackService,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the black-box tests).
pub fn build_app(feedback: FeedbackService) -> Router {
    let state = AppState { feedback };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
