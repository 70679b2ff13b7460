use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObsError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {route} failed with HTTP {status}: {summary}")]
    Status {
        method: String,
        route: String,
        status: u16,
        code: Option<String>,
        summary: String,
    },

    #[error("Malformed XML document: {0}")]
    XmlParse(#[from] quick_xml::de::DeError),

    #[error("Failed to serialize XML document: {0}")]
    XmlWrite(#[from] quick_xml::se::SeError),

    #[error("Expected <{expected}> document, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse classification of an [`ObsError`], separating API misuse from
/// failures of the service or the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Transport,
    Service,
    Document,
    Configuration,
}

impl ObsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ObsError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ObsError::InvalidArgument { .. } => ErrorCategory::Usage,
            ObsError::Http(_) | ObsError::IoError(_) => ErrorCategory::Transport,
            ObsError::Status { .. } => ErrorCategory::Service,
            ObsError::XmlParse(_) | ObsError::XmlWrite(_) | ObsError::UnexpectedRoot { .. } => {
                ErrorCategory::Document
            }
            ObsError::ConfigError { .. }
            | ObsError::MissingConfigError { .. }
            | ObsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// True when the service answered 404, e.g. for a group that no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ObsError::Status { status: 404, .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Usage => format!("The command was used incorrectly: {}", self),
            ErrorCategory::Transport => format!("Could not reach the build service: {}", self),
            ErrorCategory::Service => format!("The build service rejected the request: {}", self),
            ErrorCategory::Document => format!("Unexpected document from the build service: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ObsError>;
