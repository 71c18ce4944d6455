use std::fmt;

/// Result type alias for skewkeys core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for skewkeys core operations
#[derive(Debug)]
pub enum Error {
    /// Parameters that would produce a meaningless key sequence
    InvalidParameter(String),

    /// I/O errors while reading or writing key files
    Io(std::io::Error),

    /// Malformed record in a key file (1-based line number)
    Format { line: usize, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Format { line, message } => write!(f, "Format error at line {line}: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
