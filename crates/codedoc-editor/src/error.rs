use thiserror::Error;

/// Failures reported by a [`FileStorage`](crate::FileStorage).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No content exists at the requested editability level.
    #[error("could not read {path}")]
    NotFound {
        /// Requested path.
        path: String,
    },
    /// Storage answered with a non-success status.
    #[error("storage error {status}: {message}")]
    Transport {
        /// HTTP-like status code.
        status: u16,
        /// Detail supplied by storage.
        message: String,
    },
}

impl StorageError {
    pub(crate) fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP-like status code of the failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Transport { status, .. } => *status,
        }
    }
}

/// Reasons an editor session refused an operation.
///
/// A refused operation leaves the session exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The editor is locked.
    #[error("editor is locked with [{name}] file changes")]
    Locked {
        /// File loaded while locked, empty if none.
        name: String,
    },
    /// The displayed text differs from the loaded version.
    #[error("file in editor has been modified, please save or discard the contents first")]
    Conflict,
    /// A new file name is empty or contains whitespace.
    #[error("invalid file name [{name}], empty or has spaces")]
    Validation {
        /// The rejected name.
        name: String,
    },
    /// The operation needs a loaded file.
    #[error("no file loaded in editor")]
    NoFileLoaded,
    /// Storage failed; the detail is passed through unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// HTTP-like status code of the failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Locked { .. } => 423,
            Self::Conflict => 409,
            Self::Validation { .. } => 400,
            Self::NoFileLoaded => 404,
            Self::Storage(err) => err.status_code(),
        }
    }
}
