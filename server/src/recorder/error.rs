use std::io::{Error as IoError, ErrorKind};

use thiserror::Error;

/// Errors that can occur while recording a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecorderError {
    /// The recording file could not be created
    #[error("Could not create recording file {path}: {kind:?}")]
    CreateFailed { path: String, kind: ErrorKind },

    /// Writing to the recording failed
    #[error("Could not write to recording file {path}: {kind:?}")]
    WriteFailed { path: String, kind: ErrorKind },

    /// The recorder was already shut down
    #[error("Recorder has been shut down")]
    Closed,
}

impl RecorderError {
    pub(crate) fn create_failed(path: &std::path::Path, error: &IoError) -> Self {
        Self::CreateFailed {
            path: path.display().to_string(),
            kind: error.kind(),
        }
    }

    pub(crate) fn write_failed(path: &std::path::Path, error: &IoError) -> Self {
        Self::WriteFailed {
            path: path.display().to_string(),
            kind: error.kind(),
        }
    }
}
