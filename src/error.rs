use thiserror::Error;

/// Main error type for the Stroke-Sync library
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),

    #[error("Processing submission error: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Timeline-level validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("Invalid duration: {value} (must be finite and >= 0)")]
    InvalidDuration { value: f64 },

    #[error("Invalid playback rate: {value} (must be finite and > 0)")]
    InvalidRate { value: f64 },
}

/// Controller-level state errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error("Not ready for {operation}: {reason}")]
    NotReady {
        operation: &'static str,
        reason: String,
    },
}

/// Processing-submission errors (pass-through, never affect sync state)
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Failed to read clip for submission: {path}")]
    PayloadRead { path: String },

    #[error("Invalid processing endpoint: {endpoint}")]
    InvalidEndpoint { endpoint: String },

    #[error("Request to processing endpoint failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Processing endpoint rejected job ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

impl ControllerError {
    pub(crate) fn not_ready(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::NotReady {
            operation,
            reason: reason.into(),
        }
    }
}

impl SyncError {
    /// Check if this error is a local validation failure (usage error,
    /// never worth retrying) as opposed to an external-boundary failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Timeline(_) | Self::Controller(_))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Controller(ControllerError::NotReady { operation, .. }) => {
                format!(
                    "Cannot {} yet. Load a clip and mark the ball contact first.",
                    operation
                )
            }
            Self::Processing(ProcessingError::PayloadRead { path }) => {
                format!(
                    "Could not read clip '{}'. Please check the file exists.",
                    path
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
