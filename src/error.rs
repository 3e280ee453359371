use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meal_planner_shared::Error;
use serde_json::json;

/// Domain error rendered as `{"error", "message", "details"?}`.
#[derive(Debug)]
pub struct AppError(pub Error);

pub type Result<T> = std::result::Result<T, AppError>;

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(Error::NotFound(message.into()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(Error::User(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validate(_) | Error::User(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Gone(_) => StatusCode::GONE,
            Error::Server(_) | Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self.0 {
            Error::Validate(_) => "validation",
            Error::User(_) => "bad_request",
            Error::Unauthorized(_) => "unauthorized",
            Error::Forbidden(_) => "forbidden",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Gone(_) => "gone",
            Error::Server(_) | Error::Unknown(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let body = match self.0 {
            Error::Validate(errors) => json!({
                "error": kind,
                "message": "Validation failed",
                "details": errors,
            }),
            Error::Server(message) => {
                tracing::error!(%message, "server error");
                json!({"error": kind, "message": "Internal server error"})
            }
            Error::Unknown(err) => {
                tracing::error!(error = ?err, "unexpected error");
                json!({"error": kind, "message": "Internal server error"})
            }
            Error::User(message)
            | Error::Unauthorized(message)
            | Error::Forbidden(message)
            | Error::NotFound(message)
            | Error::Conflict(message)
            | Error::Gone(message) => json!({"error": kind, "message": message}),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status() {
        let cases = [
            (Error::User("bad".to_owned()), StatusCode::BAD_REQUEST),
            (Error::Unauthorized("no".to_owned()), StatusCode::UNAUTHORIZED),
            (Error::Forbidden("no".to_owned()), StatusCode::FORBIDDEN),
            (Error::NotFound("gone".to_owned()), StatusCode::NOT_FOUND),
            (Error::Conflict("dup".to_owned()), StatusCode::CONFLICT),
            (Error::Gone("old".to_owned()), StatusCode::GONE),
            (
                Error::Unknown(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError(err).into_response().status(), status);
        }
    }

    #[test]
    fn anyhow_errors_become_internal() {
        let err: AppError = anyhow::anyhow!("db down").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
