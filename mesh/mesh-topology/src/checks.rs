//! Individual topology and geometry checks.
//!
//! Each check runs on its own and never fails; [`crate::analyze`] runs all of
//! them and shares the edge incidence between the edge-based ones.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use mesh_types::{EdgeKey, TriangleSoup, VertexKey};

use crate::adjacency::EdgeIncidence;
use crate::components::find_connected_components;

/// Relative and absolute tolerance for comparing extent ratios against one.
///
/// A ratio `r` passes when `|r - 1| <= atol + rtol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingTolerance {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl ScalingTolerance {
    /// Whether `ratio` equals one within tolerance. Non-finite ratios fail.
    #[inline]
    #[must_use]
    pub fn accepts(&self, ratio: f64) -> bool {
        (ratio - 1.0).abs() <= self.atol + self.rtol
    }
}

impl Default for ScalingTolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

/// Outcome of the stored-normal orientation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalOrientation {
    /// Every stored normal points away from the mesh centroid.
    Outward,
    /// The first facet, in file order, whose normal points toward the centroid.
    Inward {
        /// Index of that facet.
        first_face: usize,
    },
}

impl NormalOrientation {
    /// Whether every normal points outward.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        matches!(self, Self::Outward)
    }

    /// Index of the first inward facet, if any.
    #[must_use]
    pub const fn first_inward_face(self) -> Option<usize> {
        match self {
            Self::Outward => None,
            Self::Inward { first_face } => Some(first_face),
        }
    }
}

/// Edges shared by more than two facets, with their incidence counts.
#[must_use]
pub fn check_non_manifold_edges(soup: &TriangleSoup) -> BTreeMap<EdgeKey, usize> {
    EdgeIncidence::build(soup).non_manifold_edges()
}

/// Edges used by exactly one facet.
///
/// The result lists hole-boundary edges, not holes: one missing triangle in
/// a closed surface yields three entries.
#[must_use]
pub fn check_for_holes(soup: &TriangleSoup) -> Vec<EdgeKey> {
    EdgeIncidence::build(soup).boundary_edges()
}

/// Number of connected bodies.
#[must_use]
pub fn check_multiple_bodies(soup: &TriangleSoup) -> usize {
    find_connected_components(soup).component_count
}

/// Indices of facets whose cross product `(v1 - v0) x (v2 - v0)` is exactly
/// zero.
///
/// # Example
///
/// ```
/// use mesh_topology::check_degenerate_faces;
/// use mesh_types::{Facet, Point3, TriangleSoup, Vector3};
///
/// let p = Point3::new(1.0, 2.0, 3.0);
/// let mut soup = TriangleSoup::unit_cube();
/// soup.push(Facet::new(Vector3::z(), [p, p, Point3::origin()]));
///
/// assert_eq!(check_degenerate_faces(&soup), vec![12]);
/// ```
#[must_use]
pub fn check_degenerate_faces(soup: &TriangleSoup) -> Vec<usize> {
    check_degenerate_faces_with_epsilon(soup, 0.0)
}

/// Indices of facets whose cross-product magnitude is at most `epsilon`.
#[must_use]
pub fn check_degenerate_faces_with_epsilon(soup: &TriangleSoup, epsilon: f64) -> Vec<usize> {
    soup.facets()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.geometric_normal().norm() <= epsilon)
        .map(|(i, _)| i)
        .collect()
}

/// Check stored normals against the mesh centroid.
///
/// Facets are visited in file order and the check stops at the first facet
/// whose stored normal satisfies `normal . (centroid - facet_centroid) > 0`.
/// Only stored normals are tested; winding is not. An empty soup is
/// [`NormalOrientation::Outward`].
///
/// This is a centroid heuristic: correct for convex and roughly convex
/// bodies, unreliable for strongly non-convex ones.
#[must_use]
pub fn check_normals_orientation(soup: &TriangleSoup) -> NormalOrientation {
    let Some(center) = soup.centroid() else {
        return NormalOrientation::Outward;
    };

    soup.facets()
        .iter()
        .position(|f| f.normal.dot(&(center - f.centroid())) > 0.0)
        .map_or(NormalOrientation::Outward, |first_face| {
            NormalOrientation::Inward { first_face }
        })
}

/// Duplicate vertex and face counts, returned as `(vertices, faces)`.
///
/// Vertices: per facet, three minus the number of distinct corner
/// positions, summed. Positions shared between facets are the normal state
/// of a soup and are not counted. Faces: facets minus distinct ordered
/// vertex triples, so `(a, b, c)` and `(b, c, a)` are different faces.
#[must_use]
pub fn check_duplicates(soup: &TriangleSoup) -> (usize, usize) {
    let duplicate_vertices = soup
        .facets()
        .iter()
        .map(|f| repeated_corners(f.vertex_keys()))
        .sum();
    let unique_faces = soup
        .facets()
        .iter()
        .map(mesh_types::Facet::vertex_keys)
        .collect::<HashSet<[VertexKey; 3]>>()
        .len();
    (duplicate_vertices, soup.face_count() - unique_faces)
}

fn repeated_corners([a, b, c]: [VertexKey; 3]) -> usize {
    usize::from(b == a) + usize::from(c == a || c == b)
}

/// Whether the bounding-box extents are not all equal.
///
/// Divides each extent by the X extent and compares against one. A zero X
/// extent makes the ratios non-finite, which counts as non-uniform. An empty
/// soup is not flagged.
#[must_use]
pub fn check_non_uniform_scaling(soup: &TriangleSoup, tolerance: &ScalingTolerance) -> bool {
    if soup.is_empty() {
        return false;
    }
    let ratios = soup.bounds().extent_ratios();
    !ratios.iter().all(|&r| tolerance.accepts(r))
}
