//! Extraction parameters.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`extract_axis`](crate::extract_axis).
///
/// # Example
///
/// ```
/// use mesh_landmark::ExtractionParams;
/// use nalgebra::Vector3;
///
/// let params = ExtractionParams::new()
///     .with_rotated(true)
///     .with_proximal_direction(Vector3::z());
///
/// assert!(params.rotated);
/// assert_eq!(params.head_offset_percent, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractionParams {
    /// Femoral head offset as a percentage of the proximal-distal distance
    /// (default: 5).
    pub head_offset_percent: f64,
    /// Outward extension of both ends as a percentage of bone length
    /// (default: 2).
    pub extension_percent: f64,
    /// Negate X and Y of the result (default: false).
    pub rotated: bool,
    /// Anatomical prior: the proximal end is the one furthest along this
    /// direction. `None` keeps the raw eigenvector sign.
    pub proximal_direction: Option<Vector3<f64>>,
}

impl ExtractionParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the femoral head offset percentage.
    #[must_use]
    pub const fn with_head_offset_percent(mut self, percent: f64) -> Self {
        self.head_offset_percent = percent;
        self
    }

    /// Sets the axis extension percentage.
    #[must_use]
    pub const fn with_extension_percent(mut self, percent: f64) -> Self {
        self.extension_percent = percent;
        self
    }

    /// Sets the rotated coordinate convention.
    #[must_use]
    pub const fn with_rotated(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    /// Sets the proximal orientation prior.
    #[must_use]
    pub const fn with_proximal_direction(mut self, direction: Vector3<f64>) -> Self {
        self.proximal_direction = Some(direction);
        self
    }
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            head_offset_percent: 5.0,
            extension_percent: 2.0,
            rotated: false,
            proximal_direction: None,
        }
    }
}
