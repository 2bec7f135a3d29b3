use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::error::{ErrorBody, ErrorKind};
use thiserror::Error;

/// Ошибки API инстансов
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::MalformedRequest(_) => ErrorKind::MalformedRequest,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            ApiError::Io(_) | ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn instance_not_found(uuid: &str) -> Self {
        ApiError::NotFound(format!("Instance with uuid {} does not exist", uuid))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{:#}", self);
        }
        let body = ErrorBody {
            kind: self.kind(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MalformedRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PermissionDenied("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(ApiError::from(io).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_detail() {
        let err = ApiError::instance_not_found("abc");
        assert_eq!(err.to_string(), "Instance with uuid abc does not exist");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
