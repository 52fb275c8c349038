//! Bone surface toolkit for finite-element preprocessing.
//!
//! This umbrella crate re-exports the mesh-* crates and adds the run-level
//! pipeline that ties them together. All crates are Layer 0 (zero GUI
//! dependencies) and can be used in CLI tools, servers, or batch jobs.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use bone_mesh::prelude::*;
//!
//! let inspection = inspect_stl("femur.stl", &ValidationOptions::default()).unwrap();
//! println!("{}", inspection.report);
//!
//! let params = ExtractionParams::new().with_rotated(true);
//! let landmarks = resolve_landmarks(
//!     &inspection.soup,
//!     Some(Path::new("landmarks")),
//!     Path::new("output"),
//!     &params,
//! )
//! .unwrap();
//! println!("{}: {:?}", landmarks.source, landmarks.set.proximal);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `Facet`, `TriangleSoup`, `VertexKey`, `EdgeKey`, `Aabb`
//! - [`io`] - STL encoding sniffer, loader and writer
//! - [`topology`] - Edge incidence, connected bodies and the diagnostic report
//! - [`landmark`] - Landmark extraction and the landmark file store
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for value types and parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{
    Inspection, LandmarkSource, ResolvedLandmarks, RunOutput, inspect_stl, resolve_landmarks, run,
};

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Facet`, `TriangleSoup`, `VertexKey`, `EdgeKey`, `Aabb`.
pub use mesh_types as types;

/// STL sniffing, loading and writing.
pub use mesh_io as io;

/// Topology diagnostics.
pub use mesh_topology as topology;

/// Landmark extraction and storage.
pub use mesh_landmark as landmark;

pub use mesh_landmark::ExtractionParams;
pub use mesh_topology::ValidationOptions;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for bone surface processing.
///
/// # Usage
///
/// ```
/// use bone_mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, Facet, Point3, TriangleSoup, Vector3};

    // I/O
    pub use mesh_io::{StlFormat, classify, load_stl, save_stl};

    // Topology
    pub use mesh_topology::{DiagnosticReport, Finding, Severity, ValidationOptions, analyze};

    // Landmarks
    pub use mesh_landmark::{
        ExtractionParams, LandmarkRole, LandmarkSet, extract_axis, load_landmark_dir,
        write_landmark_set,
    };

    // Pipeline
    pub use crate::{
        Inspection, LandmarkSource, PipelineError, ResolvedLandmarks, inspect_stl,
        resolve_landmarks,
    };
}
