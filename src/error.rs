use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum TaskdeskError {
    // Backend errors
    Api { status: u16, message: String },

    // Auth errors
    Unauthorized(String),
    SessionExpired,
    NotAuthenticated,
    InvalidToken(String),
    PermissionDenied(String),

    // Transport errors
    Transport(String),

    // Payload errors
    Serialization(String),

    // Configuration errors
    ConfigError(String),
}

impl TaskdeskError {
    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Unauthorized(msg) => msg.clone(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            other => other.to_string(),
        }
    }

    /// True for failures that end the session
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::SessionExpired | Self::NotAuthenticated
        )
    }
}

impl fmt::Display for TaskdeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::SessionExpired => write!(f, "Session expired"),
            Self::NotAuthenticated => write!(f, "Not authenticated"),
            Self::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            Self::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for TaskdeskError {}

impl From<reqwest::Error> for TaskdeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TaskdeskError::Serialization(err.to_string())
        } else {
            TaskdeskError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TaskdeskError {
    fn from(err: serde_json::Error) -> Self {
        TaskdeskError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for TaskdeskError {
    fn from(err: url::ParseError) -> Self {
        TaskdeskError::ConfigError(format!("Invalid URL: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for TaskdeskError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        TaskdeskError::InvalidToken(err.to_string())
    }
}

// Generic result type for Taskdesk
pub type Result<T> = std::result::Result<T, TaskdeskError>;
