use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use feedback_domain::{Failure, FailureKind};

/// Map a service failure to a response. `NotFound` is always 404; other kinds
/// use the status the calling endpoint reports failures with.
pub fn failure_to_response(failure: Failure, otherwise: StatusCode) -> axum::response::Response {
    let (status, code) = match failure.kind {
        FailureKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        FailureKind::Validation => (otherwise, "validation_error"),
        FailureKind::Persistence => (otherwise, "persistence_error"),
    };

    (
        status,
        axum::Json(json!({
            "error": code,
            "message": failure.message,
            "errors": failure.errors,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    let message = message.into();
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message,
            "errors": [message],
        })),
    )
        .into_response()
}

pub fn bad_request(code: &'static str, message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_ignores_fallback_status() {
        let res = failure_to_response(Failure::not_found(), StatusCode::BAD_REQUEST);
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_uses_fallback_status() {
        let res = failure_to_response(Failure::validation("bad"), StatusCode::BAD_REQUEST);
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = failure_to_response(Failure::persistence("down"), StatusCode::NOT_FOUND);
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
