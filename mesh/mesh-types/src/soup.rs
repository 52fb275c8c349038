//! Triangle soup: the in-memory form of an STL surface.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, Facet, VertexKey};

/// An ordered sequence of facets.
///
/// Each facet owns copies of its vertex coordinates, so a vertex shared by
/// six triangles appears six times. The implied vertex set and edge set are
/// derived on demand and never stored.
///
/// The soup is not mutated by any analysis; build it once and share it by
/// reference.
///
/// # Example
///
/// ```
/// use mesh_types::TriangleSoup;
///
/// let cube = TriangleSoup::unit_cube();
/// assert_eq!(cube.face_count(), 12);
/// assert_eq!(cube.vertex_count(), 36);
/// assert_eq!(cube.unique_vertex_count(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    facets: Vec<Facet>,
}

impl TriangleSoup {
    /// Create an empty soup.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { facets: Vec::new() }
    }

    /// Create an empty soup with room for `face_count` facets.
    #[inline]
    #[must_use]
    pub fn with_capacity(face_count: usize) -> Self {
        Self {
            facets: Vec::with_capacity(face_count),
        }
    }

    /// Append a facet.
    #[inline]
    pub fn push(&mut self, facet: Facet) {
        self.facets.push(facet);
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.facets.len()
    }

    /// Number of vertex occurrences (`3 x face_count`).
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.facets.len() * 3
    }

    /// Whether the soup has no facets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// The facets in file order.
    #[inline]
    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Flattened vertex view: every vertex occurrence, facet by facet.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.facets.iter().flat_map(|f| f.vertices.iter())
    }

    /// Number of distinct vertex positions.
    #[must_use]
    pub fn unique_vertex_count(&self) -> usize {
        self.vertices()
            .map(VertexKey::new)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Mean of all vertex occurrences, or `None` for an empty soup.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: vertex counts beyond 2^52 are unsupported
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.vertices().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.vertex_count() as f64))
    }

    /// Axis-aligned bounding box of all vertices.
    ///
    /// Empty for an empty soup.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices())
    }

    /// The soup rotated 180 degrees about Z (`x -> -x`, `y -> -y`).
    ///
    /// Normals are rotated with the vertices.
    #[must_use]
    pub fn rotated_180_z(&self) -> Self {
        self.facets
            .iter()
            .map(|f| {
                f.map(
                    |p| Point3::new(-p.x, -p.y, p.z),
                    |n| Vector3::new(-n.x, -n.y, n.z),
                )
            })
            .collect()
    }

    /// The soup moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        self.facets
            .iter()
            .map(|f| f.map(|p| p + offset, |n| *n))
            .collect()
    }

    /// The soup scaled per axis about the origin.
    ///
    /// Stored normals are left as they are.
    #[must_use]
    pub fn scaled(&self, factors: Vector3<f64>) -> Self {
        self.facets
            .iter()
            .map(|f| f.map(|p| Point3::from(p.coords.component_mul(&factors)), |n| *n))
            .collect()
    }

    /// A closed unit cube on `[0, 1]^3`, 12 facets, outward normals,
    /// counter-clockwise winding seen from outside.
    #[must_use]
    pub fn unit_cube() -> Self {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces: [[usize; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        faces
            .iter()
            .map(|&[a, b, c]| Facet::from_vertices([corners[a], corners[b], corners[c]]))
            .collect()
    }
}

impl From<Vec<Facet>> for TriangleSoup {
    fn from(facets: Vec<Facet>) -> Self {
        Self { facets }
    }
}

impl FromIterator<Facet> for TriangleSoup {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        Self {
            facets: iter.into_iter().collect(),
        }
    }
}

impl Extend<Facet> for TriangleSoup {
    fn extend<I: IntoIterator<Item = Facet>>(&mut self, iter: I) {
        self.facets.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TriangleSoup {
    type Item = &'a Facet;
    type IntoIter = std::slice::Iter<'a, Facet>;

    fn into_iter(self) -> Self::IntoIter {
        self.facets.iter()
    }
}
