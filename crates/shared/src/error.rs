//! Client-side error taxonomy.

use thiserror::Error;

use crate::models::{CookieRole, UserType};

/// Why a cookie token could not be turned into a [`DecodedToken`](crate::DecodedToken).
///
/// Every variant is treated the same way by the gates: the viewer is
/// unauthenticated and gets redirected without a visible error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("no token cookie present")]
    Missing,
    #[error("token must have three dot-separated segments, found {0}")]
    Segments(usize),
    #[error("token payload is not base64url: {0}")]
    Base64(String),
    #[error("token payload is not a valid claims object: {0}")]
    Json(String),
    #[error("unknown user type `{0}`")]
    UnknownRole(String),
    #[error("user type {user_type} cannot be carried by the {cookie} cookie")]
    RoleMismatch {
        cookie: CookieRole,
        user_type: UserType,
    },
}

/// Failure of a REST call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// 2xx response whose envelope carried `status: false` / `success: false`.
    #[error("{message}")]
    Rejected { message: String },
}

impl ApiError {
    /// The HTTP status code, when the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a component-local error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Unable to reach the server".to_string(),
            ApiError::Http { status, body } => {
                try_envelope_message(body).unwrap_or_else(|| format!("Request failed ({status})"))
            }
            ApiError::Deserialize(_) => "Unexpected response from the server".to_string(),
            ApiError::Rejected { message } => message.clone(),
        }
    }
}

/// Pull the `message` field out of an error body, if the backend sent one.
pub fn try_envelope_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Failure of the realtime session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("socket connect failed: {0}")]
    Connect(String),
    #[error("socket closed before the handshake completed")]
    ClosedDuringHandshake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_backend_message() {
        let err = ApiError::Http {
            status: 400,
            body: r#"{"status":false,"message":"Insufficient balance"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message(), "Insufficient balance");
    }

    #[test]
    fn http_error_without_body_falls_back_to_status() {
        let err = ApiError::Http {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        };
        assert_eq!(err.user_message(), "Request failed (502)");
    }
}
