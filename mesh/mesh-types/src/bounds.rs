//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 5.0, 3.0),
///     Point3::new(-2.0, 8.0, 1.0),
/// ];
///
/// let aabb = Aabb::from_points(points.iter());
/// assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
/// assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners; the corners are sorted per axis.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// An empty box (min > max), the identity for [`Aabb::expand_to_include`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point; empty if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Whether min > max on any axis.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Each extent divided by the X extent.
    ///
    /// `(1, 1, 1)` for a cube. A zero X extent yields non-finite ratios.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(Point3::origin(), Point3::new(2.0, 4.0, 1.0));
    /// let r = aabb.extent_ratios();
    /// assert_eq!((r.x, r.y, r.z), (1.0, 2.0, 0.5));
    /// ```
    #[must_use]
    pub fn extent_ratios(&self) -> Vector3<f64> {
        let size = self.size();
        size / size.x
    }

    /// Grow the box to include `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
