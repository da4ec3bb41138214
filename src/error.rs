use std::{path::PathBuf, time::Duration};

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VisionError>;

/// Coarse classification of a failure, one per diagnostic the user sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    Connection,
    Timeout,
    Unexpected,
}

impl ErrorKind {
    /// Returns the kind as a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

/// Every way a single analysis run can fail.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// The image path does not point at an existing file.
    #[error("Image not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The image exists but could not be read.
    #[error("Failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The endpoint could not be reached.
    #[error("Could not connect to API at {url}")]
    ConnectionFailed { url: String, detail: String },

    /// No response arrived within the bounded wait.
    #[error("Request timed out after {}s", timeout.as_secs_f32())]
    TimedOut { timeout: Duration },

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body is not a chat-completion object.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response carried no choices to read the analysis from.
    #[error("Response contained no choices")]
    EmptyChoices,

    /// The first choice has no message content.
    #[error("Response choice has no message content")]
    MissingContent,

    /// Any other failure of the HTTP layer.
    #[error("Request failed: {0}")]
    Request(String),

    /// Progress or results could not be written to the console.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl VisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VisionError::FileNotFound { .. } | VisionError::ImageRead { .. } => {
                ErrorKind::FileNotFound
            }
            VisionError::ConnectionFailed { .. } => ErrorKind::Connection,
            VisionError::TimedOut { .. } => ErrorKind::Timeout,
            _ => ErrorKind::Unexpected,
        }
    }

    /// Follow-up lines printed under the error message.
    pub fn guidance(&self) -> Vec<String> {
        match self {
            VisionError::ConnectionFailed { detail, .. } => vec![
                "Make sure the inference server is running, e.g.:".to_string(),
                "  ./start_vision_api.sh".to_string(),
                format!("({detail})"),
            ],
            VisionError::TimedOut { .. } => {
                vec!["The model may be loading or processing a large image".to_string()]
            }
            _ => Vec::new(),
        }
    }
}
