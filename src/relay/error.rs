// Relay errors and their HTTP representation
//
// Every failure becomes a `{ "error": "<message>" }` body with a status code.
// Messages are shown to end users as is, hence French.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::agent::UnknownAction;

pub const RATE_LIMITED_MESSAGE: &str = "Trop de requêtes. Réessayez dans quelques instants.";
pub const CREDITS_EXHAUSTED_MESSAGE: &str =
    "Crédits IA épuisés. Ajoutez des crédits dans les paramètres.";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Erreur du service IA";
pub const NO_STRUCTURED_RESULT_MESSAGE: &str = "L'IA n'a pas retourné de résultat structuré";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erreur inconnue";

#[derive(Debug, Error)]
pub enum RelayError {
    /// The `action` field names nothing the relay knows
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    /// Upstream 429
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    /// Upstream 402
    #[error("{}", CREDITS_EXHAUSTED_MESSAGE)]
    CreditsExhausted,

    /// Any other upstream non-2xx status
    #[error("{}", UPSTREAM_FAILURE_MESSAGE)]
    Upstream,

    /// The reply carried no tool call, or arguments that are not JSON
    #[error("{}", NO_STRUCTURED_RESULT_MESSAGE)]
    NoStructuredResult,

    /// Anything else: malformed request body, transport failure...
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn internal(message: impl Into<String>) -> Self {
        RelayError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            RelayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            RelayError::CreditsExhausted => StatusCode::PAYMENT_REQUIRED,
            RelayError::Upstream
            | RelayError::NoStructuredResult
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text for the `error` field; never empty
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Relay request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Relay request rejected");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::from(UnknownAction("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(RelayError::CreditsExhausted.status_code(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(RelayError::Upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            RelayError::NoStructuredResult.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RelayError::from(UnknownAction("summarize".into())).message(),
            "Unknown action: summarize"
        );
        assert_eq!(RelayError::RateLimited.message(), RATE_LIMITED_MESSAGE);
        assert_eq!(RelayError::internal("").message(), "Erreur inconnue");
        assert_eq!(RelayError::internal("boom").message(), "boom");
    }
}
