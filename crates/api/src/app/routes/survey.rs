use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use feedback_domain::CreateFeedbackDto;

use crate::app::dto::SurveySubmission;
use crate::app::AppState;

const SURVEY_PAGE: &str = include_str!("../../../static/survey.html");
const QUESTIONS_PAGE: &str = include_str!("../../../static/questions.html");

pub const THANK_YOU: &str = "Thank you for your feedback";
pub const INVALID_DATA: &str = "Invalid data";

pub fn router() -> Router {
    Router::new()
        .route("/", get(survey_page))
        .route("/questions", get(questions_page))
        .route("/submit", post(submit_survey))
}

pub async fn survey_page() -> Html<&'static str> {
    Html(SURVEY_PAGE)
}

pub async fn questions_page() -> Html<&'static str> {
    Html(QUESTIONS_PAGE)
}

/// Survey form submission. Responds with `{success, message}` rather than the
/// REST error body, since the page script only checks `success`.
pub async fn submit_survey(
    Extension(state): Extension<AppState>,
    body: Result<Json<SurveySubmission>, JsonRejection>,
) -> axum::response::Response {
    let Json(submission) = match body {
        Ok(v) => v,
        Err(e) => {
            tracing::info!(reason = %e.body_text(), "rejected survey submission");
            return outcome(StatusCode::BAD_REQUEST, false, INVALID_DATA);
        }
    };

    let dto = CreateFeedbackDto::from(submission);
    tracing::info!(customer_name = %dto.customer_name, "survey submitted");

    match state.feedback.create(dto).await {
        Ok(_) => outcome(StatusCode::OK, true, THANK_YOU),
        Err(f) => outcome(StatusCode::BAD_REQUEST, false, f.message),
    }
}

fn outcome(
    status: StatusCode,
    success: bool,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "success": success,
            "message": message.into(),
        })),
    )
        .into_response()
}
