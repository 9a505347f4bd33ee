use thiserror::Error;

/// Errors raised by the byte cursor when a read would leave the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Requested range exceeds the buffer
    #[error("Truncated data: requested {requested} bytes at offset {offset}, buffer holds {available}")]
    TruncatedData {
        offset: u64,
        requested: u64,
        available: u64,
    },
}

/// Fatal errors produced while decoding the metadata of one file.
///
/// The display text is the user-facing message; `reason` carries the
/// detail that is only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The outer container framing could not be located or is inconsistent
    #[error("Failed to read image data")]
    FailedToReadImageData { reason: String },

    /// The container was found but a directory inside it is invalid
    #[error("corrupted image metadata")]
    CorruptedMetadata { reason: String },
}

impl DecodeError {
    pub fn framing(reason: impl Into<String>) -> Self {
        DecodeError::FailedToReadImageData {
            reason: reason.into(),
        }
    }

    pub fn corrupted(reason: impl Into<String>) -> Self {
        DecodeError::CorruptedMetadata {
            reason: reason.into(),
        }
    }

    /// Detail describing where the fault was detected.
    pub fn reason(&self) -> &str {
        match self {
            DecodeError::FailedToReadImageData { reason }
            | DecodeError::CorruptedMetadata { reason } => reason,
        }
    }

    /// Whether the outer framing failed (nothing could be decoded at all).
    pub const fn is_framing(&self) -> bool {
        matches!(self, DecodeError::FailedToReadImageData { .. })
    }
}

/// Errors produced while compiling a key selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Regex failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors surfaced by the command-line front end.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// The input file could not be read
    #[error("{path}: Failed to open the file: {reason}")]
    FileOpen { path: String, reason: String },

    /// Metadata decoding failed
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A selector pattern did not compile
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Command-line configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The report could not be written
    #[error("Failed to write report: {0}")]
    Output(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Output(e.to_string())
    }
}
