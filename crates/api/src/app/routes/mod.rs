use axum::Router;

pub mod feedback;
pub mod survey;
pub mod system;

/// Router for the REST API and the survey pages.
pub fn router() -> Router {
    Router::new()
        .nest("/api/feedback", feedback::router())
        .nest("/survey", survey::router())
}
