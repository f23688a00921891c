//! Error types for reporting

use thiserror::Error;

/// Result type alias for reporting operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Failures of the reporting pipeline itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// DSN could not be parsed
    #[error("Invalid DSN: {message}")]
    InvalidDsn { message: String },

    /// A global configuration was already installed
    #[error("Reporting configuration is already installed")]
    AlreadyConfigured,

    /// No global configuration was installed
    #[error("No global reporting configuration is installed")]
    NotConfigured,

    /// Request never reached the monitoring service
    #[error("Transport error: {0}")]
    Transport(String),

    /// Monitoring service answered with a non-success status
    #[error("Event rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl ReportError {
    /// Create a new invalid DSN error
    pub fn invalid_dsn(message: impl Into<String>) -> Self {
        Self::InvalidDsn {
            message: message.into(),
        }
    }

    /// Whether sending again might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidDsn { .. } | Self::AlreadyConfigured | Self::NotConfigured => {
                false
            }
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
