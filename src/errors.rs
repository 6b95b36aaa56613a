//! Error types for the conflict resolver.
//!
//! A single [`ConflictError`] covers every failure the engine can surface.
//! A destination that does not exist yet is not an error: it is simply the
//! "nothing to conflict with" case.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ConflictError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ConflictError {
    /// The caller handed over options that cannot drive a batch,
    /// e.g. no destination.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Reading contents or metadata (or writing an accepted file) failed.
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prompt collaborator could not produce an answer.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The status sink rejected a write.
    #[error("failed to write status output: {0}")]
    Output(#[source] std::io::Error),
}

impl ConflictError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConflictError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_destination() -> Self {
        ConflictError::Configuration(
            "expected destination path to be a directory or a resolver function".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn io_error_names_the_path() {
        let error = ConflictError::io(
            "/tmp/missing.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(error.to_string(), "failed to access '/tmp/missing.txt': denied");
    }

    #[test]
    fn missing_destination_is_a_configuration_error() {
        assert!(matches!(
            ConflictError::missing_destination(),
            ConflictError::Configuration(_)
        ));
    }
}
