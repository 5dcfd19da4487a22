// Typed errors with thiserror. JS-side failures are converted to meaningful
// messages at the wasm boundary; nothing panics in non-test code.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Application error taxonomy: transport failure, non-success HTTP status,
/// malformed body, missing page structure, or local validation failure.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("page element missing: {0}")]
    MissingElement(String),

    /// Rejection detail reported by the server, e.g. a movie-request `detail`.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    /// True for an HTTP 404, which the search flow maps to "zero results".
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Http { status: 404 })
    }

    pub fn missing(id: &str) -> Self {
        AppError::MissingElement(id.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for AppError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Extract a readable message from a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AppError::Http { status: 503 };
        assert!(err.to_string().contains("503"));

        let err = AppError::MissingElement("heroSection".to_string());
        assert!(err.to_string().contains("heroSection"));
    }

    #[test]
    fn not_found_classification() {
        assert!(AppError::Http { status: 404 }.is_not_found());
        assert!(!AppError::Http { status: 500 }.is_not_found());
        assert!(!AppError::Network("offline".to_string()).is_not_found());
    }

    #[test]
    fn decode_error_from_serde_json() {
        let err: AppError = serde_json::from_str::<i32>("not json").unwrap_err().into();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
