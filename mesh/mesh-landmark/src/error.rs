//! Error types for landmark extraction and storage.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for landmark operations.
pub type LandmarkResult<T> = Result<T, LandmarkError>;

/// Errors that can occur while deriving or storing landmarks.
#[derive(Debug, Error)]
pub enum LandmarkError {
    /// A landmark file name matches no role.
    #[error("unrecognized landmark file name: {name}")]
    UnrecognizedFileName {
        /// The offending file name.
        name: String,
    },

    /// The mesh has no vertices.
    #[error("point cloud is empty")]
    EmptyPointCloud,

    /// Not enough points for the requested computation.
    #[error("at least {required} points required, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A construction step produced a zero-length direction.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// Which construction failed.
        reason: String,
    },

    /// Eigendecomposition of the covariance matrix failed.
    #[error("PCA failed: {reason}")]
    PcaFailed {
        /// Why the decomposition is unusable.
        reason: String,
    },

    /// A landmark file does not hold a 3D point.
    #[error("malformed landmark file {}: {reason}", path.display())]
    MalformedLandmarkFile {
        /// File that failed to parse.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl LandmarkError {
    /// Create a `DegenerateGeometry` error with the given reason.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create a `MalformedLandmarkFile` error for `path`.
    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedLandmarkFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LandmarkError::UnrecognizedFileName {
            name: "unexpected.txt".to_string(),
        };
        assert!(err.to_string().contains("unexpected.txt"));

        let err = LandmarkError::InsufficientPoints {
            required: 3,
            actual: 2,
        };
        assert!(err.to_string().contains('3'));

        let err = LandmarkError::malformed("RPOss.txt", "expected 3 values");
        assert!(err.to_string().contains("RPOss.txt"));
    }
}
