//! Error types.
//!
//! - `FetchError`: everything that can go wrong while retrieving one series.
//! - `AppError`: binary-boundary error carrying the process exit code.
//!
//! Exit codes: `2` for configuration/usage problems, `4` for runtime failures.

use thiserror::Error;

/// Failure to retrieve or decode one upstream series.
///
/// Rendered verbatim in the TUI error panel and on stderr, so messages are
/// written for humans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("missing FRED_API_KEY (set it in the environment or a .env file)")]
    MissingApiKey,

    #[error("invalid FRED_API_KEY: {0}")]
    InvalidApiKey(String),

    #[error("FRED request failed: {0}")]
    Transport(String),

    #[error("FRED request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse FRED response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Whether re-entering the API key could fix this failure.
    pub fn is_credential_problem(&self) -> bool {
        match self {
            FetchError::MissingApiKey | FetchError::InvalidApiKey(_) => true,
            FetchError::Status { status, .. } => matches!(status, 400 | 401 | 403),
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let code = match err {
            FetchError::MissingApiKey | FetchError::InvalidApiKey(_) => 2,
            _ => 4,
        };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
