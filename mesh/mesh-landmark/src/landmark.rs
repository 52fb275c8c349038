//! Landmark roles and landmark sets.

use std::fmt;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LandmarkError, LandmarkResult};

/// Anatomical role of a landmark point.
///
/// Each role has a fixed file name in the landmark store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LandmarkRole {
    /// The end nearer the body's center; for a femur, the head.
    Proximal,
    /// The far end of the bone.
    Distal,
    /// Shaft midpoint (vertex centroid).
    Middle,
}

impl LandmarkRole {
    /// All roles, in storage order.
    pub const ALL: [Self; 3] = [Self::Proximal, Self::Distal, Self::Middle];

    /// Canonical file name for this role.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Proximal => "RPOss.txt",
            Self::Distal => "RDOss.txt",
            Self::Middle => "RMShaft.txt",
        }
    }

    /// Role for an exact file name match.
    ///
    /// # Errors
    ///
    /// Returns [`LandmarkError::UnrecognizedFileName`] for any other name.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_landmark::LandmarkRole;
    ///
    /// assert_eq!(LandmarkRole::from_file_name("RMShaft.txt").ok(), Some(LandmarkRole::Middle));
    /// assert!(LandmarkRole::from_file_name("rmshaft.txt").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> LandmarkResult<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.file_name() == name)
            .ok_or_else(|| LandmarkError::UnrecognizedFileName {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for LandmarkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proximal => write!(f, "proximal"),
            Self::Distal => write!(f, "distal"),
            Self::Middle => write!(f, "middle"),
        }
    }
}

/// Three anatomical points describing a long bone's axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LandmarkSet {
    /// Proximal end (femoral head center estimate).
    pub proximal: Point3<f64>,
    /// Distal end.
    pub distal: Point3<f64>,
    /// Shaft midpoint.
    pub middle: Point3<f64>,
    /// Whether X and Y have been negated (180 degree turn about Z).
    pub rotated: bool,
}

impl LandmarkSet {
    /// Create a set in the unrotated convention.
    #[must_use]
    pub const fn new(proximal: Point3<f64>, distal: Point3<f64>, middle: Point3<f64>) -> Self {
        Self {
            proximal,
            distal,
            middle,
            rotated: false,
        }
    }

    /// All three points at the origin.
    #[must_use]
    pub fn origin() -> Self {
        Self::new(Point3::origin(), Point3::origin(), Point3::origin())
    }

    /// Point for `role`.
    #[must_use]
    pub const fn get(&self, role: LandmarkRole) -> Point3<f64> {
        match role {
            LandmarkRole::Proximal => self.proximal,
            LandmarkRole::Distal => self.distal,
            LandmarkRole::Middle => self.middle,
        }
    }

    /// Replace the point for `role`.
    pub fn set(&mut self, role: LandmarkRole, point: Point3<f64>) {
        match role {
            LandmarkRole::Proximal => self.proximal = point,
            LandmarkRole::Distal => self.distal = point,
            LandmarkRole::Middle => self.middle = point,
        }
    }

    /// `(role, point)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkRole, Point3<f64>)> + '_ {
        LandmarkRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Vector from proximal to distal.
    #[must_use]
    pub fn axis(&self) -> Vector3<f64> {
        self.distal - self.proximal
    }

    /// The set turned 180 degrees about Z: `x -> -x`, `y -> -y`.
    ///
    /// Toggles [`LandmarkSet::rotated`]; applying it twice restores the set.
    #[must_use]
    pub fn rotated_180_z(&self) -> Self {
        let turn = |p: Point3<f64>| Point3::new(-p.x, -p.y, p.z);
        Self {
            proximal: turn(self.proximal),
            distal: turn(self.distal),
            middle: turn(self.middle),
            rotated: !self.rotated,
        }
    }
}
