use std::time::Duration;
use thiserror::Error;

/// Failures of the single outbound quote call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Quote request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Connection to quote endpoint failed: {0}")]
    Connection(String),

    #[error("Quote endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Quote endpoint returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Quote request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Short machine-friendly label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Timeout { .. } => "timeout",
            TransportError::Connection(_) => "connection",
            TransportError::Status { .. } => "status",
            TransportError::InvalidResponse(_) => "invalid_response",
            TransportError::Request(_) => "request",
        }
    }
}

#[derive(Error, Debug)]
pub enum FreightError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Data integrity error: {message}")]
    DataIntegrityError { message: String },

    #[error("{count} product(s) are missing dimensions")]
    MissingDimensionsError { count: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    DataIntegrity,
    MissingDimensions,
    Transport,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FreightError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FreightError::ConfigError { .. }
            | FreightError::ConfigValidationError { .. }
            | FreightError::InvalidConfigValueError { .. }
            | FreightError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FreightError::ValidationError { .. } => ErrorCategory::Validation,
            FreightError::DataIntegrityError { .. } => ErrorCategory::DataIntegrity,
            FreightError::MissingDimensionsError { .. } => ErrorCategory::MissingDimensions,
            FreightError::Transport(_) => ErrorCategory::Transport,
            FreightError::IoError(_) => ErrorCategory::Io,
            FreightError::SerializationError(_) => ErrorCategory::Serialization,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::MissingDimensions => ErrorSeverity::Low,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::DataIntegrity | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FreightError::ConfigError { .. }
            | FreightError::ConfigValidationError { .. }
            | FreightError::InvalidConfigValueError { .. } => {
                "Check the carrier configuration file"
            }
            FreightError::MissingConfigError { .. } => {
                "Fill in the missing setting in the carrier configuration"
            }
            FreightError::ValidationError { .. } => "Check the postal codes and cart contents",
            FreightError::DataIntegrityError { .. } => {
                "Fix the catalog data: every shipped product needs a positive weight"
            }
            FreightError::MissingDimensionsError { .. } => {
                "Set width, height and length on the listed products"
            }
            FreightError::Transport(TransportError::Timeout { .. }) => {
                "The quote provider is slow; try again or raise api.timeout_seconds"
            }
            FreightError::Transport(TransportError::Status { status: 401 | 403, .. }) => {
                "Check the API key"
            }
            FreightError::Transport(_) => "Check network access to the quote provider",
            FreightError::IoError(_) => "Check that the file exists and is readable",
            FreightError::SerializationError(_) => "Check that the input file is valid JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                format!("Carrier is not configured correctly: {}", self)
            }
            ErrorCategory::Validation => format!("The shipment cannot be quoted: {}", self),
            ErrorCategory::DataIntegrity => format!("Catalog data problem: {}", self),
            ErrorCategory::MissingDimensions => format!("Quoting is blocked: {}", self),
            ErrorCategory::Transport => format!("Quote provider unavailable: {}", self),
            ErrorCategory::Io => format!("File error: {}", self),
            ErrorCategory::Serialization => format!("Invalid input data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FreightError>;
