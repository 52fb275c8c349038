//! Connected bodies of a triangle soup.
//!
//! Two vertices are connected when some facet uses both. A body is a
//! connected component of that graph; isolated vertices cannot occur since
//! every vertex belongs to a facet.

use hashbrown::HashMap;
use mesh_types::{TriangleSoup, VertexKey};

/// Undirected vertex adjacency built from facet edges.
///
/// Vertices are interned to dense indices in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct VertexGraph {
    index: HashMap<VertexKey, usize>,
    neighbors: Vec<Vec<usize>>,
}

impl VertexGraph {
    /// Build the graph from every facet's three edges.
    #[must_use]
    pub fn build(soup: &TriangleSoup) -> Self {
        let mut graph = Self::default();
        for facet in soup {
            let [a, b, c] = facet.vertex_keys().map(|k| graph.intern(k));
            graph.link(a, b);
            graph.link(b, c);
            graph.link(c, a);
        }
        graph
    }

    fn intern(&mut self, key: VertexKey) -> usize {
        let next = self.neighbors.len();
        let idx = *self.index.entry(key).or_insert(next);
        if idx == next {
            self.neighbors.push(Vec::new());
        }
        idx
    }

    fn link(&mut self, a: usize, b: usize) {
        if a != b {
            self.neighbors[a].push(b);
            self.neighbors[b].push(a);
        }
    }

    /// Label every vertex with its component, numbered from zero.
    ///
    /// Uses an explicit stack, so depth is bounded by heap size rather than
    /// thread stack size.
    #[must_use]
    pub fn component_labels(&self) -> Vec<usize> {
        let mut labels = vec![usize::MAX; self.neighbors.len()];
        let mut next_label = 0;
        let mut stack = Vec::new();

        for start in 0..self.neighbors.len() {
            if labels[start] != usize::MAX {
                continue;
            }
            labels[start] = next_label;
            stack.push(start);

            while let Some(v) = stack.pop() {
                for &n in &self.neighbors[v] {
                    if labels[n] == usize::MAX {
                        labels[n] = next_label;
                        stack.push(n);
                    }
                }
            }
            next_label += 1;
        }

        labels
    }

    /// Component analysis over the whole graph.
    #[must_use]
    pub fn components(&self) -> ComponentAnalysis {
        let labels = self.component_labels();
        let count = labels.iter().max().map_or(0, |&m| m + 1);
        let mut vertex_counts = vec![0; count];
        for &label in &labels {
            vertex_counts[label] += 1;
        }
        ComponentAnalysis {
            component_count: count,
            vertex_counts,
        }
    }
}

/// Result of connected-component analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentAnalysis {
    /// Number of connected bodies.
    pub component_count: usize,
    /// Distinct vertices in each body, indexed by component label.
    pub vertex_counts: Vec<usize>,
}

/// Find the connected bodies of a soup.
///
/// # Example
///
/// ```
/// use mesh_topology::find_connected_components;
/// use mesh_types::{TriangleSoup, Vector3};
///
/// let mut soup = TriangleSoup::unit_cube();
/// soup.extend(TriangleSoup::unit_cube().translated(Vector3::new(5.0, 0.0, 0.0)).facets().iter().copied());
///
/// let analysis = find_connected_components(&soup);
/// assert_eq!(analysis.component_count, 2);
/// assert_eq!(analysis.vertex_counts, vec![8, 8]);
/// ```
#[must_use]
pub fn find_connected_components(soup: &TriangleSoup) -> ComponentAnalysis {
    VertexGraph::build(soup).components()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::{Facet, Point3, Vector3};

    #[test]
    fn empty_soup_has_no_bodies() {
        let analysis = find_connected_components(&TriangleSoup::new());
        assert_eq!(analysis.component_count, 0);
        assert!(analysis.vertex_counts.is_empty());
    }

    #[test]
    fn cube_is_one_body() {
        let analysis = find_connected_components(&TriangleSoup::unit_cube());
        assert_eq!(analysis.component_count, 1);
        assert_eq!(analysis.vertex_counts, vec![8]);
    }

    #[test]
    fn touching_at_a_vertex_is_one_body() {
        // Shares the corner (1, 1, 1) with the unit cube.
        let mut soup = TriangleSoup::unit_cube();
        soup.extend(TriangleSoup::unit_cube().translated(Vector3::new(1.0, 1.0, 1.0)).facets().iter().copied());
        let analysis = find_connected_components(&soup);
        assert_eq!(analysis.component_count, 1);
        assert_eq!(analysis.vertex_counts, vec![15]);
    }

    #[test]
    fn nearly_touching_is_two_bodies() {
        let mut soup = TriangleSoup::unit_cube();
        soup.extend(TriangleSoup::unit_cube().translated(Vector3::new(1.0 + 1e-12, 0.0, 0.0)).facets().iter().copied());
        assert_eq!(find_connected_components(&soup).component_count, 2);
    }

    #[test]
    fn fully_collapsed_facet_is_its_own_body() {
        let p = Point3::new(9.0, 9.0, 9.0);
        let mut soup = TriangleSoup::unit_cube();
        soup.push(Facet::new(Vector3::zeros(), [p, p, p]));
        let graph = VertexGraph::build(&soup);
        assert_eq!(graph.components().vertex_counts, vec![8, 1]);
    }
}
