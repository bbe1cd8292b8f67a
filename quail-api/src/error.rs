use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum QuailApiError {
    Quail(StatusCode, ErrorDetail),
    Decode(serde_json::Error),
    Internal(ApiError),
}

impl QuailApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            QuailApiError::Quail(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for QuailApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, body) | ApiError::ServerError(status, body) => {
                QuailApiError::Quail(status, ErrorDetail::from_body(&body))
            }
            ApiError::SerdeJson(e) => QuailApiError::Decode(e),
            e => QuailApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for QuailApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuailApiError::Internal(e) => write!(f, "Internal error: {}", e),
            QuailApiError::Decode(e) => write!(f, "Unexpected response body: {}", e),
            QuailApiError::Quail(status, detail) => match detail.code {
                Some(code) => write!(f, "({}) {}: {}", status, code, detail.message),
                None => write!(f, "({}) {}", status, detail.message),
            },
        }
    }
}

impl std::error::Error for QuailApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, alias = "msg", alias = "error")]
    pub message: String,
}

impl ErrorDetail {
    /// Fall back to the raw body when it is not a JSON error object
    fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorDetail>(body) {
            Ok(detail) if !detail.message.is_empty() => detail,
            _ => ErrorDetail {
                code: None,
                message: body.trim().to_string(),
            },
        }
    }
}
