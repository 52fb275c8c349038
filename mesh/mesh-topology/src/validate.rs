//! Full mesh analysis.
//!
//! Runs every check on a soup and gathers the results into a
//! [`DiagnosticReport`]. Analysis never fails and never mutates the soup.

use mesh_types::{TriangleSoup, Vector3};
use tracing::{debug, info_span};

use crate::adjacency::EdgeIncidence;
use crate::checks::{
    ScalingTolerance, check_degenerate_faces_with_epsilon, check_duplicates,
    check_non_uniform_scaling, check_normals_orientation,
};
use crate::components::find_connected_components;
use crate::report::DiagnosticReport;

/// Options for mesh analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationOptions {
    /// Cross-product magnitude at or below which a facet is degenerate.
    ///
    /// Zero means only exactly collapsed facets are flagged.
    pub degenerate_epsilon: f64,
    /// Tolerance for the uniform-scaling check.
    pub scaling_tolerance: ScalingTolerance,
}

impl ValidationOptions {
    /// Set the degenerate-facet threshold.
    #[must_use]
    pub const fn with_degenerate_epsilon(mut self, epsilon: f64) -> Self {
        self.degenerate_epsilon = epsilon;
        self
    }

    /// Set the uniform-scaling tolerance.
    #[must_use]
    pub const fn with_scaling_tolerance(mut self, tolerance: ScalingTolerance) -> Self {
        self.scaling_tolerance = tolerance;
        self
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            degenerate_epsilon: 0.0,
            scaling_tolerance: ScalingTolerance::default(),
        }
    }
}

/// Analyze a soup with default options.
///
/// # Example
///
/// ```
/// use mesh_topology::analyze;
/// use mesh_types::TriangleSoup;
///
/// let report = analyze(&TriangleSoup::unit_cube());
///
/// assert!(report.is_manifold());
/// assert!(report.is_watertight());
/// assert_eq!(report.body_count, 1);
/// assert!(!report.has_blocking_errors());
/// ```
#[must_use]
pub fn analyze(soup: &TriangleSoup) -> DiagnosticReport {
    analyze_with_options(soup, &ValidationOptions::default())
}

/// Analyze a soup with custom options.
#[must_use]
pub fn analyze_with_options(soup: &TriangleSoup, options: &ValidationOptions) -> DiagnosticReport {
    let _span = info_span!("analyze", faces = soup.face_count()).entered();

    let incidence = EdgeIncidence::build(soup);
    let components = find_connected_components(soup);
    let degenerate_faces = check_degenerate_faces_with_epsilon(soup, options.degenerate_epsilon);
    let orientation = check_normals_orientation(soup);
    let (duplicate_vertex_count, duplicate_face_count) = check_duplicates(soup);
    let non_uniform_scaling = check_non_uniform_scaling(soup, &options.scaling_tolerance);
    let extents = if soup.is_empty() {
        Vector3::zeros()
    } else {
        soup.bounds().size()
    };

    let report = DiagnosticReport {
        face_count: soup.face_count(),
        vertex_count: soup.vertex_count(),
        unique_vertex_count: components.vertex_counts.iter().sum(),
        edge_count: incidence.edge_count(),
        non_manifold_edges: incidence.non_manifold_edges(),
        hole_edges: incidence.boundary_edges(),
        body_count: components.component_count,
        degenerate_faces,
        normals_outward: orientation.is_consistent(),
        first_inward_face: orientation.first_inward_face(),
        non_uniform_scaling,
        extents,
        duplicate_vertex_count,
        duplicate_face_count,
    };

    debug!(
        edges = report.edge_count,
        non_manifold = report.non_manifold_edges.len(),
        hole_edges = report.hole_edges.len(),
        bodies = report.body_count,
        degenerate = report.degenerate_faces.len(),
        "analysis complete"
    );

    report
}
