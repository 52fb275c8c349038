//! Error type for the run-level pipeline.

use thiserror::Error;

use mesh_io::IoError;
use mesh_landmark::LandmarkError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that stop a pipeline run.
///
/// Mesh defects are not errors here; they are carried in the
/// [`DiagnosticReport`](mesh_topology::DiagnosticReport).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The STL file could not be loaded.
    #[error("mesh loading failed: {0}")]
    Io(#[from] IoError),

    /// The landmark directory could not be read.
    #[error("landmark storage failed: {0}")]
    Landmark(#[from] LandmarkError),
}
