// Error taxonomy for calls against the records service
use thiserror::Error;

/// Every failure is terminal for the one user action that triggered it;
/// nothing here is fatal to the session.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The server answered 200 but flagged the operation as failed.
    #[error("{0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// The short text worth showing in a notification. Server-supplied
    /// messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) => message.clone(),
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("request timed out: {err}"))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Rejected("Логин уже существует".into());
        assert_eq!(err.user_message(), "Логин уже существует");

        let err = ApiError::Status {
            status: 404,
            message: "Студент не найден".into(),
        };
        assert_eq!(err.user_message(), "Студент не найден");
    }
}
