//! Error handling for the workshop admin client
//!
//! Every failure is normalised to a title + description notification; losing
//! the session additionally redirects to the login page.

use serde::Serialize;
use shared::{LineError, Page, SessionError, ValidationError};
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Validation errors, caught before submission
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Line rejected: {0}")]
    Line(#[from] LineError),

    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    Unauthorized,

    // API errors
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Transport errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub code: String,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn new(code: &str, title: &str, description: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

impl ClientError {
    /// Build an API error from a non-2xx status and its JSON body
    pub fn from_response(status: u16, data: Option<serde_json::Value>) -> Self {
        let message = data
            .as_ref()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("detail"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| default_message(status).to_string());

        if status == 404 {
            return ClientError::NotFound(message);
        }

        ClientError::Api {
            status,
            message,
            data,
        }
    }

    /// HTTP status behind the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            ClientError::Unauthorized | ClientError::InvalidCredentials => Some(401),
            ClientError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Page to navigate to after this error
    pub fn redirect(&self) -> Option<Page> {
        match self {
            ClientError::Unauthorized => Some(Page::Login),
            _ => None,
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            ClientError::Validation(err) => {
                Notification::new("VALIDATION_ERROR", "Check the form", err.to_string())
            }
            ClientError::Line(err) => {
                Notification::new("LINE_REJECTED", "Cannot add item", err.to_string())
            }
            ClientError::InvalidCredentials => Notification::new(
                "INVALID_CREDENTIALS",
                "Login failed",
                "Invalid username or password",
            ),
            ClientError::Unauthorized => Notification::new(
                "UNAUTHORIZED",
                "Session expired",
                "Please log in again",
            ),
            ClientError::Api { message, .. } => {
                Notification::new("API_ERROR", "Request failed", message.clone())
            }
            ClientError::NotFound(message) => {
                Notification::new("NOT_FOUND", "Not found", message.clone())
            }
            ClientError::Network(_) => Notification::new(
                "NETWORK_ERROR",
                "Connection problem",
                "The server could not be reached",
            ),
            ClientError::Decode(_) => Notification::new(
                "DECODE_ERROR",
                "Unexpected response",
                "The server answered with data the dashboard does not understand",
            ),
            ClientError::Session(err) => {
                Notification::new("SESSION_ERROR", "Session storage", err.to_string())
            }
            ClientError::Configuration(message) => {
                Notification::new("CONFIGURATION_ERROR", "Configuration", message.clone())
            }
        }
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "The request was rejected",
        401 => "Authentication required",
        403 => "You do not have permission to perform this action",
        404 => "The requested item does not exist",
        409 => "The item was changed by someone else",
        500..=599 => "The server failed to process the request",
        _ => "Unexpected response from the server",
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_prefers_message_then_detail() {
        let err = ClientError::from_response(400, Some(json!({"message": "Name taken"})));
        assert_eq!(err.notification().description, "Name taken");

        let err = ClientError::from_response(403, Some(json!({"detail": "Not allowed"})));
        assert_eq!(err.notification().description, "Not allowed");

        let err = ClientError::from_response(500, None);
        assert_eq!(
            err.notification().description,
            "The server failed to process the request"
        );
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_not_found_is_its_own_kind() {
        let err = ClientError::from_response(404, Some(json!({"detail": "No Organization matches"})));
        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_only_session_loss_redirects() {
        assert_eq!(ClientError::Unauthorized.redirect(), Some(Page::Login));
        assert_eq!(ClientError::InvalidCredentials.redirect(), None);
        assert_eq!(ClientError::from_response(500, None).redirect(), None);
    }

    #[test]
    fn test_line_errors_become_notifications() {
        let err: ClientError = LineError::MissingItem.into();
        let note = err.notification();
        assert_eq!(note.code, "LINE_REJECTED");
        assert_eq!(note.to_string(), "Cannot add item: Select an item first");
    }
}
