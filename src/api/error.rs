// src/api/error.rs
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the analysis service
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response at all: refused connection, DNS failure, reset.
    #[error("No se pudo contactar al servicio de análisis: {0}")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Respuesta inválida del servicio de análisis: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Message for a non-2xx response: the body's `detail` when there is one,
/// otherwise the status text.
pub(crate) fn status_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|detail| match detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.trim().is_empty() => None,
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        });

    detail.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wins_over_status_text() {
        let message = status_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "Error en validación: entrada vacía"}"#,
        );
        assert_eq!(message, "Error en validación: entrada vacía");
    }

    #[test]
    fn test_falls_back_to_status_text() {
        assert_eq!(status_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"), "Bad Gateway");
        assert_eq!(status_message(StatusCode::NOT_FOUND, r#"{"error": "x"}"#), "Not Found");
        assert_eq!(status_message(StatusCode::NOT_FOUND, r#"{"detail": null}"#), "Not Found");
    }

    #[test]
    fn test_structured_detail_is_kept_as_json() {
        let message = status_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "entrada"], "msg": "field required"}]}"#,
        );
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_unknown_status_uses_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(status_message(status, ""), "HTTP 599");
    }
}
