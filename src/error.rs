//! Error types for the scan_seasons library
//!
//! The color math and the frame scorer are total and never fail. Errors only
//! arise when loading or validating configuration, parsing caller-supplied
//! values, and when the analysis gate refuses a frame.

use thiserror::Error;

/// Result type alias for scan_seasons operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for configuration and analysis gating
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Frame quality is below the acceptance thresholds
    #[error("Frame quality insufficient: overall {overall:.2} (minimum {minimum:.2})")]
    InsufficientQuality {
        overall: f64,
        minimum: f64,
        feedback: Option<String>,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration file could not be read or written
    #[error("Configuration I/O error: {message}")]
    ConfigIo {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed or serialized
    #[error("Configuration format error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl AnalysisError {
    /// Create a configuration I/O error with context
    pub fn config_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration parse error with context
    pub fn config_parse(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// A rejected frame is recoverable: the next frame may pass.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::InsufficientQuality { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InsufficientQuality {
                feedback: Some(feedback),
                ..
            } => feedback.clone(),
            AnalysisError::InsufficientQuality { feedback: None, .. } => {
                "The camera image is not good enough yet. Hold steady for a moment.".to_string()
            }
            AnalysisError::InvalidConfig { .. }
            | AnalysisError::ConfigIo { .. }
            | AnalysisError::ConfigParse { .. } => {
                "The analysis settings could not be loaded.".to_string()
            }
            AnalysisError::InvalidParameter { parameter, .. } => {
                format!("The value given for {} is not valid.", parameter)
            }
        }
    }
}
