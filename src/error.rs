use std::io;

use thiserror::Error;

/// Everything that can go wrong while decoding or encoding a model.
///
/// No variant is recoverable: a failed `load` never yields a partial model.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bad magic: file is not an SEModel")]
    BadMagic,

    #[error("unsupported SEModel version {0}")]
    UnsupportedVersion(u16),

    #[error("header declares {0} bytes, which is smaller than the known fields")]
    InvalidHeaderSize(u16),

    #[error("stream ended before the current record was complete")]
    TruncatedStream,

    #[error("{what} index {index} out of range (count {count})")]
    IndexOutOfRange {
        what: &'static str,
        index: i64,
        count: u64,
    },

    #[error("string is not valid UTF-8")]
    InvalidString,

    #[error("io error: {0}")]
    Io(io::Error),
}

impl FormatError {
    pub(crate) fn out_of_range(what: &'static str, index: impl Into<i64>, count: usize) -> Self {
        FormatError::IndexOutOfRange {
            what,
            index: index.into(),
            count: count as u64,
        }
    }
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => FormatError::TruncatedStream,
            _ => FormatError::Io(err),
        }
    }
}

impl From<std::string::FromUtf8Error> for FormatError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        FormatError::InvalidString
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_maps_to_truncated() {
        let err: FormatError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(err, FormatError::TruncatedStream));
    }

    #[test]
    fn test_other_io_kept() {
        let err: FormatError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, FormatError::Io(_)));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = FormatError::out_of_range("face vertex", 12u32, 10);
        assert_eq!(err.to_string(), "face vertex index 12 out of range (count 10)");
    }
}
