//! CLI error types.

use std::fmt;

use blackbox::RecorderError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Store connection failed or dropped.
    Connection(String),
    /// No record exists for the requested ID.
    NotFound(String),
    /// A record exists but could not be decoded.
    Corrupt(String),
    /// Output formatting error.
    Format(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "store error: {msg}"),
            Self::NotFound(id) => write!(f, "no captured log for request: {id}"),
            Self::Corrupt(msg) => write!(f, "unreadable record: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RecorderError> for CliError {
    fn from(err: RecorderError) -> Self {
        match err {
            RecorderError::StoreUnavailable(msg) => Self::Connection(msg),
            RecorderError::CorruptRecord(msg) | RecorderError::CompressionFailed(msg) => {
                Self::Corrupt(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_connection() {
        let err = CliError::Connection("connection refused".into());
        assert_eq!(err.to_string(), "store error: connection refused");
    }

    #[test]
    fn cli_error_display_not_found() {
        let err = CliError::NotFound("req-17".into());
        assert_eq!(err.to_string(), "no captured log for request: req-17");
    }

    #[test]
    fn cli_error_display_format() {
        let err = CliError::Format("bad UTF-8".into());
        assert_eq!(err.to_string(), "format error: bad UTF-8");
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn cli_error_from_store_unavailable() {
        let err = CliError::from(RecorderError::StoreUnavailable("down".into()));
        assert!(matches!(err, CliError::Connection(_)));
    }

    #[test]
    fn cli_error_from_corrupt_record() {
        let err = CliError::from(RecorderError::CorruptRecord("bad frame".into()));
        assert!(matches!(err, CliError::Corrupt(_)));
    }
}
