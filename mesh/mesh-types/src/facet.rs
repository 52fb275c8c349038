//! Facet type: one STL triangle.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EdgeKey, VertexKey};

/// A triangle with its own vertex positions and the normal stored in the file.
///
/// The normal is kept exactly as read. It is never recomputed or
/// renormalized; orientation checks compare it against the geometry.
///
/// Winding is `v0 -> v1 -> v2`.
///
/// # Example
///
/// ```
/// use mesh_types::{Facet, Point3, Vector3};
///
/// let facet = Facet::new(
///     Vector3::z(),
///     [
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
/// );
///
/// assert!((facet.area() - 0.5).abs() < 1e-10);
/// assert!(facet.geometric_normal().z > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Normal as stored in the file.
    pub normal: Vector3<f64>,
    /// Vertex positions in winding order.
    pub vertices: [Point3<f64>; 3],
}

impl Facet {
    /// Create a facet from a stored normal and three vertices.
    #[inline]
    #[must_use]
    pub const fn new(normal: Vector3<f64>, vertices: [Point3<f64>; 3]) -> Self {
        Self { normal, vertices }
    }

    /// Create a facet whose stored normal is the unit geometric normal.
    ///
    /// Degenerate triangles get a zero normal, the usual STL convention.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Facet, Point3};
    ///
    /// let f = Facet::from_vertices([
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    /// ]);
    /// assert!((f.normal.z + 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn from_vertices(vertices: [Point3<f64>; 3]) -> Self {
        let mut facet = Self::new(Vector3::zeros(), vertices);
        facet.normal = facet
            .geometric_normal()
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);
        facet
    }

    /// `cross(v1 - v0, v2 - v0)`: unnormalized, magnitude is twice the area.
    #[inline]
    #[must_use]
    pub fn geometric_normal(&self) -> Vector3<f64> {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.geometric_normal().norm() * 0.5
    }

    /// Mean of the three vertices.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let [v0, v1, v2] = self.vertices;
        Point3::from((v0.coords + v1.coords + v2.coords) / 3.0)
    }

    /// Structural keys of the three vertices.
    #[must_use]
    pub fn vertex_keys(&self) -> [VertexKey; 3] {
        self.vertices.map(|v| VertexKey::new(&v))
    }

    /// Canonical keys of the three edges: `v0v1`, `v1v2`, `v2v0`.
    #[must_use]
    pub fn edge_keys(&self) -> [EdgeKey; 3] {
        let [a, b, c] = self.vertex_keys();
        [EdgeKey::new(a, b), EdgeKey::new(b, c), EdgeKey::new(c, a)]
    }

    /// The facet mapped through `f` on every vertex, normal through `g`.
    #[must_use]
    pub fn map(
        &self,
        f: impl Fn(&Point3<f64>) -> Point3<f64>,
        g: impl Fn(&Vector3<f64>) -> Vector3<f64>,
    ) -> Self {
        Self {
            normal: g(&self.normal),
            vertices: self.vertices.map(|v| f(&v)),
        }
    }
}
