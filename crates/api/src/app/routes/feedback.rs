use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use feedback_core::FeedbackId;
use feedback_domain::{CreateFeedbackDto, FeedbackStatus, UpdateFeedbackDto};

use crate::app::{errors, AppState};

/// Count used by `GET /recent` when none is given.
pub const DEFAULT_RECENT_COUNT: i64 = 10;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_feedback).post(create_feedback))
        .route("/recent", get(recent_feedback_default))
        .route("/recent/:count", get(recent_feedback))
        .route("/rating/:rating", get(feedback_by_rating))
        .route("/status/:status", get(feedback_by_status))
        .route("/category/:category", get(feedback_by_category))
        .route(
            "/:id",
            get(get_feedback).put(update_feedback).delete(delete_feedback),
        )
}

pub async fn list_feedback(Extension(state): Extension<AppState>) -> axum::response::Response {
    tracing::info!("listing all feedback");

    match state.feedback.get_all().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

pub async fn get_feedback(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    tracing::info!(feedback_id = %id, "fetching feedback");

    match state.feedback.get_by_id(id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::NOT_FOUND),
    }
}

pub async fn create_feedback(
    Extension(state): Extension<AppState>,
    body: Result<Json<CreateFeedbackDto>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return errors::bad_request("invalid_request", e.body_text()),
    };
    tracing::info!(customer_name = %body.customer_name, "creating feedback");

    match state.feedback.create(body).await {
        Ok(created) => {
            let location = format!("/api/feedback/{}", created.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(created),
            )
                .into_response()
        }
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

pub async fn update_feedback(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateFeedbackDto>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return errors::bad_request("invalid_request", e.body_text()),
    };
    tracing::info!(feedback_id = %id, "updating feedback");

    if body.id != id {
        return errors::bad_request("id_mismatch", "ID mismatch");
    }

    match state.feedback.update(body).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

pub async fn delete_feedback(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    tracing::info!(feedback_id = %id, "deleting feedback");

    match state.feedback.delete(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::NOT_FOUND),
    }
}

pub async fn feedback_by_rating(
    Extension(state): Extension<AppState>,
    Path(rating): Path<String>,
) -> axum::response::Response {
    let rating: i32 = match rating.trim().parse() {
        Ok(v) => v,
        Err(_) => return errors::bad_request("invalid_request", "rating must be an integer"),
    };
    tracing::info!(rating, "fetching feedback by rating");

    match state.feedback.get_by_rating(rating).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

pub async fn recent_feedback_default(
    Extension(state): Extension<AppState>,
) -> axum::response::Response {
    recent(state, DEFAULT_RECENT_COUNT).await
}

pub async fn recent_feedback(
    Extension(state): Extension<AppState>,
    Path(count): Path<String>,
) -> axum::response::Response {
    let count: i64 = match count.trim().parse() {
        Ok(v) => v,
        Err(_) => return errors::bad_request("invalid_request", "count must be an integer"),
    };
    recent(state, count).await
}

async fn recent(state: AppState, count: i64) -> axum::response::Response {
    tracing::info!(count, "fetching recent feedback");

    match state.feedback.get_recent_feedback(count).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

pub async fn feedback_by_status(
    Extension(state): Extension<AppState>,
    Path(status): Path<String>,
) -> axum::response::Response {
    let status: FeedbackStatus = match status.parse() {
        Ok(v) => v,
        Err(e) => return errors::bad_request("invalid_request", e.to_string()),
    };
    tracing::info!(%status, "fetching feedback by status");

    match state.feedback.get_by_status(status).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

pub async fn feedback_by_category(
    Extension(state): Extension<AppState>,
    Path(category): Path<String>,
) -> axum::response::Response {
    tracing::info!(%category, "fetching feedback by category");

    match state.feedback.get_by_category(&category).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(f) => errors::failure_to_response(f, StatusCode::BAD_REQUEST),
    }
}

fn parse_id(raw: &str) -> Result<FeedbackId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::bad_request("invalid_id", "invalid feedback id"))
}
