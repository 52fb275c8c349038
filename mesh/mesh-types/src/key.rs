//! Structural vertex and edge keys.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A hashable, totally ordered key for a vertex position.
///
/// Two positions produce the same key exactly when their coordinates are
/// bitwise equal, with `-0.0` folded onto `0.0` so that numerically equal
/// coordinates collide. No tolerance is applied: vertices that differ in the
/// last bit are distinct.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, VertexKey};
///
/// let a = VertexKey::new(&Point3::new(1.0, -0.0, 2.5));
/// let b = VertexKey::new(&Point3::new(1.0, 0.0, 2.5));
/// assert_eq!(a, b);
/// assert_eq!(a.position(), Point3::new(1.0, 0.0, 2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexKey([u64; 3]);

impl VertexKey {
    /// Build the key for a position.
    #[must_use]
    pub fn new(position: &Point3<f64>) -> Self {
        Self([
            coordinate_bits(position.x),
            coordinate_bits(position.y),
            coordinate_bits(position.z),
        ])
    }

    /// Recover the position this key was built from.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        Point3::new(
            f64::from_bits(self.0[0]),
            f64::from_bits(self.0[1]),
            f64::from_bits(self.0[2]),
        )
    }
}

impl From<&Point3<f64>> for VertexKey {
    fn from(position: &Point3<f64>) -> Self {
        Self::new(position)
    }
}

#[inline]
#[allow(clippy::float_cmp)]
fn coordinate_bits(value: f64) -> u64 {
    // -0.0 == 0.0 numerically; give both the same bits.
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// An unordered pair of vertex keys.
///
/// The endpoints are stored in ascending key order, so both orientations of
/// the same geometric edge map to one key.
///
/// # Example
///
/// ```
/// use mesh_types::{EdgeKey, Point3, VertexKey};
///
/// let a = VertexKey::new(&Point3::new(0.0, 0.0, 0.0));
/// let b = VertexKey::new(&Point3::new(1.0, 0.0, 0.0));
/// assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeKey {
    lo: VertexKey,
    hi: VertexKey,
}

impl EdgeKey {
    /// Build a canonical edge from two endpoints in either order.
    #[must_use]
    pub fn new(a: VertexKey, b: VertexKey) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The two endpoints, smaller key first.
    #[must_use]
    pub const fn endpoints(&self) -> (VertexKey, VertexKey) {
        (self.lo, self.hi)
    }

    /// Whether both endpoints are the same vertex.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.lo == self.hi
    }

    /// Euclidean length of the edge.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.hi.position() - self.lo.position()).norm()
    }
}
