use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure of a single outbound call to a third-party service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("malformed payload: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Whether the upstream could not be reached at all, as opposed to
    /// answering with something we could not make sense of.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Transport(_) | UpstreamError::Status(_) | UpstreamError::Timeout(_)
        )
    }
}

/// Request-level failure of `/api/lookup`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("City is required.")]
    MissingCity,

    #[error("Could not find a city named \"{0}\".")]
    CityNotFound(String),

    #[error("Could not reach the geocoding service.")]
    GeocoderUnavailable(#[source] UpstreamError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::MissingCity => StatusCode::BAD_REQUEST,
            LookupError::CityNotFound(_) => StatusCode::NOT_FOUND,
            LookupError::GeocoderUnavailable(_) => StatusCode::BAD_GATEWAY,
            LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            LookupError::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<UpstreamError> for LookupError {
    fn from(err: UpstreamError) -> Self {
        if err.is_unreachable() {
            LookupError::GeocoderUnavailable(err)
        } else {
            LookupError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        match &self {
            LookupError::GeocoderUnavailable(source) => {
                error!("Geocoding failed: {}", source);
            }
            LookupError::Internal(details) => {
                error!("Lookup error: {}", details);
            }
            _ => {}
        }

        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(LookupError::MissingCity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            LookupError::CityNotFound("Atlantis".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::GeocoderUnavailable(UpstreamError::Timeout(Duration::from_secs(8)))
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            LookupError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(LookupError::MissingCity.public_message(), "City is required.");
        assert_eq!(
            LookupError::CityNotFound("Atlantis".into()).public_message(),
            "Could not find a city named \"Atlantis\"."
        );
        assert_eq!(
            LookupError::Internal("db exploded".into()).public_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_upstream_error_classification() {
        let unreachable: LookupError =
            UpstreamError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE).into();
        assert!(matches!(unreachable, LookupError::GeocoderUnavailable(_)));

        let garbled: LookupError = UpstreamError::Decode("expected array".into()).into();
        assert!(matches!(garbled, LookupError::Internal(_)));
    }
}
