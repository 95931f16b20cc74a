//! Typed error hierarchy for the hrdesk client.
//!
//! `ClientError` covers every failure a view can hit: a superseded request,
//! an HTTP or transport failure, an undecodable payload, a form that failed
//! local validation, or a board operation naming something the view does not
//! know about. The CLI wraps these in `anyhow` at the boundary.

use thiserror::Error;

use crate::models::Id;

/// Errors surfaced by the API adapter, the view-models and the form controllers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A newer request superseded this one. Views ignore it silently.
    #[error("Request cancelled")]
    Cancelled,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Invalid form input: {0}")]
    InvalidInput(String),

    #[error("Task {id} is not on this board")]
    UnknownTask { id: Id },

    #[error("Status group {id} does not exist on this board")]
    UnknownStatusGroup { id: Id },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    /// The message a view shows inline next to the affected list or form.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: generic_status_message(status.as_u16()),
            }
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub(crate) fn generic_status_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_detected() {
        assert!(ClientError::Cancelled.is_cancelled());
        assert!(!ClientError::Network("reset".into()).is_cancelled());
    }

    #[test]
    fn http_error_displays_server_message() {
        let err = ClientError::Http {
            status: 422,
            message: "Title is required".to_string(),
        };
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn validation_error_lists_every_field() {
        let err = ClientError::Validation {
            fields: vec!["title".into(), "board".into()],
        };
        assert_eq!(err.to_string(), "Missing required fields: title, board");
    }

    #[test]
    fn network_error_has_friendly_user_message() {
        let err = ClientError::Network("connection refused".into());
        assert!(err.user_message().contains("Unable to reach the server"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn unknown_task_carries_id() {
        let err = ClientError::UnknownTask { id: 42 };
        match &err {
            ClientError::UnknownTask { id } => assert_eq!(*id, 42),
            _ => panic!("Expected UnknownTask"),
        }
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn generic_status_message_names_code() {
        assert_eq!(generic_status_message(503), "Request failed with status 503");
    }

    #[test]
    fn implements_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&ClientError::Cancelled);
    }
}
