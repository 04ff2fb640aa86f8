use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rgb565_pipeline::PipelineError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Invalid input: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Target too large: {width}x{height} (max {max} per side)")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("Conversion task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Whether the caller's input caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConvertError::Decode(_) | ConvertError::Pipeline(_) | ConvertError::TooLarge { .. }
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownPreset(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Convert(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Convert(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("empty body".to_string());
        assert_eq!(error.to_string(), "Bad request: empty body");
    }

    #[test]
    fn test_api_error_unknown_preset() {
        let error = ApiError::UnknownPreset("lcd".to_string());
        assert_eq!(error.to_string(), "Unknown preset: lcd");
    }

    #[test]
    fn test_convert_error_pipeline() {
        let error: ConvertError = PipelineError::InvalidScale(-5.0).into();
        assert_eq!(error.to_string(), "Invalid input: invalid scale percentage: -5");
    }

    #[test]
    fn test_convert_error_too_large() {
        let error = ConvertError::TooLarge {
            width: 10000,
            height: 20,
            max: 8192,
        };
        assert_eq!(error.to_string(), "Target too large: 10000x20 (max 8192 per side)");
    }

    #[test]
    fn test_api_error_from_convert_error() {
        let api_error: ApiError = ConvertError::Decode("bad signature".to_string()).into();
        match api_error {
            ApiError::Convert(_) => {}
            _ => panic!("Expected Convert variant"),
        }
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::UnknownPreset("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Client-side conversion failures -> BAD_REQUEST
        let response = ApiError::Convert(ConvertError::Decode("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiError::Convert(ConvertError::Pipeline(PipelineError::MissingDimension("height")))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Server-side conversion failures -> INTERNAL_SERVER_ERROR
        let response = ApiError::Convert(ConvertError::Encode("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
