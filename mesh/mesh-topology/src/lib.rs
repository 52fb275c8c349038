//! Topology and geometry diagnostics for triangle soups.
//!
//! This crate inspects an STL surface before it is handed to a volume
//! mesher and reports defects:
//! - Non-manifold edges (used by more than two facets)
//! - Hole edges (used by exactly one facet)
//! - Multiple disconnected bodies
//! - Degenerate (zero-area) facets
//! - Stored normals pointing toward the centroid
//! - Non-uniform bounding-box extents
//! - Duplicate vertices and facets
//!
//! Vertices and edges are identified by exact coordinates; see
//! [`mesh_types::VertexKey`]. The soup is never modified and analysis never
//! fails: every finding is data in the returned [`DiagnosticReport`].
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero GUI dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_topology::{Severity, analyze};
//! use mesh_types::TriangleSoup;
//!
//! // A cube with one facet missing
//! let soup: TriangleSoup = TriangleSoup::unit_cube().facets()[1..].iter().copied().collect();
//!
//! let report = analyze(&soup);
//! assert_eq!(report.hole_edges.len(), 3);
//! assert!(report.has_blocking_errors());
//!
//! for finding in report.findings() {
//!     if finding.severity() == Severity::Error {
//!         println!("{finding}");
//!     }
//! }
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod checks;
pub mod components;
mod report;
mod validate;

pub use adjacency::EdgeIncidence;
pub use checks::{
    NormalOrientation, ScalingTolerance, check_degenerate_faces,
    check_degenerate_faces_with_epsilon, check_duplicates, check_for_holes,
    check_multiple_bodies, check_non_manifold_edges, check_non_uniform_scaling,
    check_normals_orientation,
};
pub use components::{ComponentAnalysis, VertexGraph, find_connected_components};
pub use report::{DiagnosticReport, Finding, Severity};
pub use validate::{ValidationOptions, analyze, analyze_with_options};
