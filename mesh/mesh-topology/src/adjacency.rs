//! Edge incidence for triangle soups.
//!
//! Edges are identified by the exact coordinates of their endpoints, so two
//! facets share an edge only when they repeat both endpoints bit for bit.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use mesh_types::{EdgeKey, TriangleSoup};

/// Maps every undirected edge to the facets that use it.
///
/// Incidence count is the number of facet-edge occurrences, so a facet with
/// two identical vertices contributes a collapsed edge `(p, p)` like any
/// other.
///
/// # Example
///
/// ```
/// use mesh_topology::EdgeIncidence;
/// use mesh_types::TriangleSoup;
///
/// let cube = TriangleSoup::unit_cube();
/// let incidence = EdgeIncidence::build(&cube);
///
/// assert_eq!(incidence.edge_count(), 18);
/// assert!(incidence.is_manifold());
/// assert!(incidence.is_watertight());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeIncidence {
    edge_to_faces: HashMap<EdgeKey, Vec<usize>>,
}

impl EdgeIncidence {
    /// Build the incidence map from every facet's three edges.
    #[must_use]
    pub fn build(soup: &TriangleSoup) -> Self {
        let mut edge_to_faces: HashMap<EdgeKey, Vec<usize>> =
            HashMap::with_capacity(soup.face_count() * 3 / 2);

        for (face_idx, facet) in soup.facets().iter().enumerate() {
            for edge in facet.edge_keys() {
                edge_to_faces.entry(edge).or_default().push(face_idx);
            }
        }

        Self { edge_to_faces }
    }

    /// Number of facet-edge occurrences of `edge`; zero if absent.
    #[must_use]
    pub fn count(&self, edge: &EdgeKey) -> usize {
        self.edge_to_faces.get(edge).map_or(0, Vec::len)
    }

    /// Facets using `edge`, in file order.
    #[must_use]
    pub fn faces_for_edge(&self, edge: &EdgeKey) -> &[usize] {
        self.edge_to_faces.get(edge).map_or(&[][..], Vec::as_slice)
    }

    /// Edges used by more than two facets, with their incidence counts.
    #[must_use]
    pub fn non_manifold_edges(&self) -> BTreeMap<EdgeKey, usize> {
        self.edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() > 2)
            .map(|(&edge, faces)| (edge, faces.len()))
            .collect()
    }

    /// Edges used by exactly one facet, sorted.
    ///
    /// These bound the holes in the surface.
    #[must_use]
    pub fn boundary_edges(&self) -> Vec<EdgeKey> {
        let mut edges: Vec<EdgeKey> = self
            .edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(&edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Number of edges with incidence greater than two.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_to_faces
            .values()
            .filter(|faces| faces.len() > 2)
            .count()
    }

    /// Number of edges with incidence one.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_faces
            .values()
            .filter(|faces| faces.len() == 1)
            .count()
    }

    /// Whether no edge is used by more than two facets.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() <= 2)
    }

    /// Whether no edge is used by exactly one facet.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() != 1)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{Facet, Point3, VertexKey};

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Facet {
        Facet::from_vertices([a.into(), b.into(), c.into()])
    }

    fn key(p: [f64; 3]) -> VertexKey {
        VertexKey::new(&Point3::from(p))
    }

    #[test]
    fn single_triangle_is_all_boundary() {
        let soup: TriangleSoup = [tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])]
            .into_iter()
            .collect();
        let inc = EdgeIncidence::build(&soup);

        assert_eq!(inc.edge_count(), 3);
        assert_eq!(inc.boundary_edge_count(), 3);
        assert!(inc.is_manifold());
        assert!(!inc.is_watertight());
    }

    #[test]
    fn shared_edge_has_two_faces() {
        let soup: TriangleSoup = [
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            tri([1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
        ]
        .into_iter()
        .collect();
        let inc = EdgeIncidence::build(&soup);

        let shared = EdgeKey::new(key([1.0, 0.0, 0.0]), key([0.0, 1.0, 0.0]));
        assert_eq!(inc.count(&shared), 2);
        assert_eq!(inc.faces_for_edge(&shared), &[0, 1]);
        assert_eq!(inc.boundary_edge_count(), 4);
    }

    #[test]
    fn fan_of_three_is_non_manifold() {
        let soup: TriangleSoup = [
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
            tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ]
        .into_iter()
        .collect();
        let inc = EdgeIncidence::build(&soup);

        let spine = EdgeKey::new(key([0.0, 0.0, 0.0]), key([1.0, 0.0, 0.0]));
        let bad = inc.non_manifold_edges();
        assert_eq!(bad.len(), 1);
        assert_eq!(bad.get(&spine), Some(&3));
        assert!(!inc.is_manifold());
    }

    #[test]
    fn collapsed_edge_is_counted() {
        let soup: TriangleSoup = [tri([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0])]
            .into_iter()
            .collect();
        let inc = EdgeIncidence::build(&soup);

        let collapsed = EdgeKey::new(key([0.0, 0.0, 0.0]), key([0.0, 0.0, 0.0]));
        assert_eq!(inc.count(&collapsed), 1);
        // (p, q) appears twice, so only the collapsed edge is a boundary edge.
        assert_eq!(inc.boundary_edges(), vec![collapsed]);
    }

    #[test]
    fn empty_soup_is_trivially_closed() {
        let inc = EdgeIncidence::build(&TriangleSoup::new());
        assert_eq!(inc.edge_count(), 0);
        assert!(inc.is_manifold());
        assert!(inc.is_watertight());
    }
}
