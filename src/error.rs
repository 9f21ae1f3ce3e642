//! Error types for probing and rendering.

use std::io;
use std::path::PathBuf;

/// Why a directory listing could not be produced.
///
/// Classified from [`io::ErrorKind`] so callers never look at platform
/// error numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("Doesn't exist.")]
    NotFound,

    #[error("Permission denied.")]
    PermissionDenied,

    #[error("Not a directory.")]
    NotADirectory,

    /// Any other failure, with the native diagnostic attached.
    #[error("{0}")]
    Other(String),
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ProbeError::NotFound,
            io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied,
            io::ErrorKind::NotADirectory => ProbeError::NotADirectory,
            _ => ProbeError::Other(err.to_string()),
        }
    }
}

/// A failure that stops rendering of one directory.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    /// The directory's own listing failed.
    #[error("{}", describe_probe_failure(.path, .cause))]
    Probe { path: PathBuf, cause: ProbeError },

    /// The output sink refused a write.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

impl TraversalError {
    pub fn probe(path: impl Into<PathBuf>, cause: ProbeError) -> Self {
        TraversalError::Probe {
            path: path.into(),
            cause,
        }
    }

    /// Path of the directory that failed, if the failure came from the probe.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            TraversalError::Probe { path, .. } => Some(path.as_path()),
            TraversalError::Output(_) => None,
        }
    }
}

fn describe_probe_failure(path: &std::path::Path, cause: &ProbeError) -> String {
    match cause {
        ProbeError::Other(detail) => {
            format!("Path `{}` can't be read: {}", path.display(), detail)
        }
        known => format!("Path `{}`: {}", path.display(), known),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_kinds_map_to_probe_errors() {
        let cases = [
            (io::ErrorKind::NotFound, ProbeError::NotFound),
            (
                io::ErrorKind::PermissionDenied,
                ProbeError::PermissionDenied,
            ),
            (io::ErrorKind::NotADirectory, ProbeError::NotADirectory),
        ];
        for (kind, expected) in cases {
            let err = io::Error::new(kind, "boom");
            assert_eq!(ProbeError::from(err), expected);
        }
    }

    #[test]
    fn unknown_io_error_keeps_its_message() {
        let err = io::Error::other("disk on fire");
        assert_eq!(
            ProbeError::from(err),
            ProbeError::Other("disk on fire".to_string())
        );
    }

    #[test]
    fn traversal_error_messages() {
        let err = TraversalError::probe("/missing", ProbeError::NotFound);
        assert_eq!(err.to_string(), "Path `/missing`: Doesn't exist.");

        let err = TraversalError::probe("/secret", ProbeError::PermissionDenied);
        assert_eq!(err.to_string(), "Path `/secret`: Permission denied.");

        let err = TraversalError::probe("/etc/hosts", ProbeError::NotADirectory);
        assert_eq!(err.to_string(), "Path `/etc/hosts`: Not a directory.");

        let err = TraversalError::probe("/dev/weird", ProbeError::Other("I/O error".into()));
        assert_eq!(
            err.to_string(),
            "Path `/dev/weird` can't be read: I/O error"
        );
    }

    #[test]
    fn output_error_has_no_path() {
        let err = TraversalError::from(io::Error::other("broken pipe"));
        assert!(err.path().is_none());
        assert!(err.to_string().contains("broken pipe"));
    }
}
