//! Error Types

use std::path::PathBuf;
use thiserror::Error;

use crate::format::ElementType;

/// Main error type
#[derive(Debug, Error)]
pub enum DxxError {
    #[error("Invalid file extension. want: {valid:?}, got: {extension:?}")]
    UnsupportedFormat {
        extension: String,
        valid: Vec<&'static str>,
    },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {} at line {line}: invalid {element} value {token:?}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
        element: ElementType,
    },

    #[error("Degenerate buffer: {message}")]
    DegenerateBuffer { message: String },

    #[error("Bad conversion: no rescaling defined from {from} to {to}")]
    BadConversion { from: ElementType, to: ElementType },

    #[error("Audio error: {message}")]
    Audio { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl DxxError {
    pub fn unsupported<S: Into<String>>(extension: S) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
            valid: crate::format::list_names(),
        }
    }
    pub fn degenerate<S: Into<String>>(msg: S) -> Self { Self::DegenerateBuffer { message: msg.into() } }
    pub fn audio<S: Into<String>>(msg: S) -> Self { Self::Audio { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }

    /// Maps `NotFound` onto [`DxxError::FileNotFound`] for the given path.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, DxxError>;

impl From<hound::Error> for DxxError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Self::Io(e),
            other => Self::audio(format!("WAV: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = DxxError::audio("test");
        assert!(e.to_string().contains("Audio"));
    }

    #[test]
    fn test_unsupported_lists_valid_extensions() {
        let e = DxxError::unsupported("wav");
        let msg = e.to_string();
        assert!(msg.contains("\"wav\""));
        assert!(msg.contains("DSA") && msg.contains("DDB"));
        assert!(e.is_unsupported_format());
    }

    #[test]
    fn test_from_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(DxxError::from_io(io, "x.DSB"), DxxError::FileNotFound { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(DxxError::from_io(io, "x.DSB"), DxxError::Io(_)));
    }
}
