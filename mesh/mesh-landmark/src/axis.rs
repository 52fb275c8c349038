//! Shaft-axis geometry: bone length, principal axis, head refinement and
//! axis extension.
//!
//! Every function here works on a plain vertex slice and reports failure as
//! a [`LandmarkError`]; [`crate::extract_axis`] decides how to recover.

use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use tracing::debug;

use crate::{LandmarkError, LandmarkResult};

/// Two-pass farthest-point estimate of a point cloud's diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneLength {
    /// Distance between the two endpoints.
    pub length: f64,
    /// Point farthest from the seed vertex.
    pub first: Point3<f64>,
    /// Point farthest from `first`.
    pub second: Point3<f64>,
}

/// Estimate bone length.
///
/// Seeds at the first vertex, walks to the vertex farthest from it, then
/// to the vertex farthest from that one. Ties keep the earliest vertex.
/// Exact for many elongated shapes, a lower bound in general.
///
/// # Errors
///
/// Returns [`LandmarkError::EmptyPointCloud`] if `points` is empty.
///
/// # Example
///
/// ```
/// use mesh_landmark::bone_length;
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 10.0),
///     Point3::new(1.0, 0.0, 5.0),
/// ];
/// let estimate = bone_length(&points).unwrap();
/// assert!((estimate.length - 10.0).abs() < 1e-12);
/// ```
pub fn bone_length(points: &[Point3<f64>]) -> LandmarkResult<BoneLength> {
    let seed = points.first().ok_or(LandmarkError::EmptyPointCloud)?;
    let (first, _) = farthest_from(seed, points);
    let (second, length) = farthest_from(&first, points);
    Ok(BoneLength {
        length,
        first,
        second,
    })
}

fn farthest_from(origin: &Point3<f64>, points: &[Point3<f64>]) -> (Point3<f64>, f64) {
    let mut best = *origin;
    let mut best_distance = 0.0;
    for p in points {
        let d = nalgebra::distance(origin, p);
        if d > best_distance {
            best_distance = d;
            best = *p;
        }
    }
    (best, best_distance)
}

/// Result of PCA computation on a point cloud.
///
/// Contains the principal axes sorted by variance (largest first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcaResult {
    /// The centroid of the point cloud.
    pub centroid: Point3<f64>,
    /// Principal axes (unit eigenvectors), sorted by eigenvalue descending.
    pub axes: [Vector3<f64>; 3],
    /// Eigenvalues (variances) along each axis, sorted descending.
    pub eigenvalues: [f64; 3],
}

impl PcaResult {
    /// Direction of maximum variance: the shaft axis.
    ///
    /// The sign is whatever the eigensolver returned.
    #[must_use]
    pub const fn primary_axis(&self) -> Vector3<f64> {
        self.axes[0]
    }

    /// Ratio of the second to the first eigenvalue; small for elongated
    /// clouds, near one when the shaft axis is poorly defined.
    #[must_use]
    pub fn elongation_ratio(&self) -> f64 {
        if self.eigenvalues[0] <= 0.0 {
            return 1.0;
        }
        self.eigenvalues[1] / self.eigenvalues[0]
    }
}

/// Compute PCA on a slice of points.
///
/// # Errors
///
/// Returns [`LandmarkError::InsufficientPoints`] for fewer than 3 points,
/// and [`LandmarkError::PcaFailed`] if the covariance is not finite or the
/// cloud has no spread.
#[allow(clippy::cast_precision_loss)]
// Precision loss: point counts beyond 2^52 are unsupported
pub fn principal_axes(points: &[Point3<f64>]) -> LandmarkResult<PcaResult> {
    if points.len() < 3 {
        return Err(LandmarkError::InsufficientPoints {
            required: 3,
            actual: points.len(),
        });
    }

    let count = points.len() as f64;
    let centroid = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / count);

    let mut covariance = Matrix3::zeros();
    for p in points {
        let d = p - centroid;
        covariance += d * d.transpose();
    }
    covariance /= count;

    if covariance.iter().any(|c| !c.is_finite()) {
        return Err(LandmarkError::PcaFailed {
            reason: "covariance matrix is not finite".to_string(),
        });
    }

    let eigen = SymmetricEigen::new(covariance);
    let eigenvalues = eigen.eigenvalues;
    let eigenvectors = eigen.eigenvectors;

    let mut indices = [0usize, 1, 2];
    indices.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    if eigenvalues[indices[0]] <= 0.0 {
        return Err(LandmarkError::PcaFailed {
            reason: "point cloud has no spread".to_string(),
        });
    }

    Ok(PcaResult {
        centroid,
        axes: indices.map(|i| eigenvectors.column(i).into_owned()),
        eigenvalues: indices.map(|i| eigenvalues[i]),
    })
}

/// Extremal points of a cloud along an axis, as `(proximal, distal)`.
///
/// Proximal is the point with the smallest projection onto `axis` relative
/// to `centroid`, distal the largest; ties keep the earliest point. With
/// `prior`, `axis` is first flipped if needed so that proximal is the end
/// lying furthest along `prior`.
///
/// # Errors
///
/// Returns [`LandmarkError::EmptyPointCloud`] if `points` is empty.
pub fn axis_extremes(
    points: &[Point3<f64>],
    centroid: &Point3<f64>,
    axis: &Vector3<f64>,
    prior: Option<&Vector3<f64>>,
) -> LandmarkResult<(Point3<f64>, Point3<f64>)> {
    if points.is_empty() {
        return Err(LandmarkError::EmptyPointCloud);
    }

    let axis = match prior.map(|p| axis.dot(p)) {
        Some(alignment) if alignment > 0.0 => -axis,
        Some(alignment) if alignment < 0.0 => *axis,
        Some(_) => {
            debug!("orientation prior is perpendicular to the axis; keeping eigenvector sign");
            *axis
        }
        None => {
            debug!("no orientation prior; proximal/distal follow the eigenvector sign");
            *axis
        }
    };

    let mut proximal = (f64::INFINITY, points[0]);
    let mut distal = (f64::NEG_INFINITY, points[0]);
    for p in points {
        let t = (p - centroid).dot(&axis);
        if t < proximal.0 {
            proximal = (t, *p);
        }
        if t > distal.0 {
            distal = (t, *p);
        }
    }

    Ok((proximal.1, distal.1))
}

/// Nudge the proximal point toward the femoral head center.
///
/// With `shaft = proximal - distal` and `to_centroid = centroid - proximal`,
/// the offset direction is `normalize((shaft x to_centroid) x shaft)`, the
/// component of `to_centroid` perpendicular to the shaft. The result is
/// `proximal - direction * |shaft| * percent / 100`.
///
/// # Errors
///
/// Returns [`LandmarkError::DegenerateGeometry`] if the centroid lies on the
/// shaft line or proximal equals distal, so no perpendicular exists.
pub fn refine_femoral_head(
    proximal: &Point3<f64>,
    distal: &Point3<f64>,
    centroid: &Point3<f64>,
    percent: f64,
) -> LandmarkResult<Point3<f64>> {
    let shaft = proximal - distal;
    let to_centroid = centroid - proximal;
    let distance = shaft.norm() * (percent / 100.0);

    let perpendicular = shaft.cross(&to_centroid);
    let direction = perpendicular
        .cross(&shaft)
        .try_normalize(0.0)
        .ok_or_else(|| LandmarkError::degenerate("centroid lies on the shaft axis"))?;

    Ok(proximal - direction * distance)
}

/// Push both ends outward along the proximal-to-distal direction by
/// `length * percent / 100`. Returns `(proximal, distal)`.
///
/// # Errors
///
/// Returns [`LandmarkError::DegenerateGeometry`] if proximal equals distal.
///
/// # Example
///
/// ```
/// use mesh_landmark::extend_axis;
/// use nalgebra::Point3;
///
/// let (p, d) = extend_axis(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(0.0, 0.0, 100.0),
///     100.0,
///     2.0,
/// )
/// .unwrap();
/// assert!((p.z + 2.0).abs() < 1e-12);
/// assert!((d.z - 102.0).abs() < 1e-12);
/// ```
pub fn extend_axis(
    proximal: &Point3<f64>,
    distal: &Point3<f64>,
    length: f64,
    percent: f64,
) -> LandmarkResult<(Point3<f64>, Point3<f64>)> {
    let direction = (distal - proximal)
        .try_normalize(0.0)
        .ok_or_else(|| LandmarkError::degenerate("proximal and distal coincide"))?;
    let extension = direction * (length * (percent / 100.0));
    Ok((proximal - extension, distal + extension))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rod() -> Vec<Point3<f64>> {
        (0..=10)
            .flat_map(|i| {
                let z = f64::from(i) * 10.0;
                [Point3::new(1.0, 0.0, z), Point3::new(-1.0, 0.0, z), Point3::new(0.0, 1.0, z)]
            })
            .collect()
    }

    #[test]
    fn length_of_rod() {
        let estimate = bone_length(&rod()).unwrap();
        assert_relative_eq!(estimate.length, (100.0_f64 * 100.0 + 4.0).sqrt(), epsilon = 1e-12);
        assert_eq!(estimate.first.z, 100.0);
        assert_eq!(estimate.second.z, 0.0);
    }

    #[test]
    fn length_of_single_point_is_zero() {
        let estimate = bone_length(&[Point3::new(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(estimate.length, 0.0);
        assert!(matches!(bone_length(&[]), Err(LandmarkError::EmptyPointCloud)));
    }

    #[test]
    fn pca_finds_rod_axis() {
        let pca = principal_axes(&rod()).unwrap();
        assert_relative_eq!(pca.primary_axis().z.abs(), 1.0, epsilon = 1e-9);
        assert!(pca.eigenvalues[0] >= pca.eigenvalues[1]);
        assert!(pca.eigenvalues[1] >= pca.eigenvalues[2]);
        assert!(pca.elongation_ratio() < 0.01);
        assert_relative_eq!(pca.centroid.z, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn pca_rejects_small_and_flat_clouds() {
        let two = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(matches!(
            principal_axes(&two),
            Err(LandmarkError::InsufficientPoints { required: 3, actual: 2 })
        ));
        let same = [Point3::new(1.0, 1.0, 1.0); 4];
        assert!(matches!(principal_axes(&same), Err(LandmarkError::PcaFailed { .. })));
    }

    #[test]
    fn prior_fixes_which_end_is_proximal() {
        let points = rod();
        let centroid = Point3::new(0.0, 0.0, 50.0);
        for axis in [Vector3::z(), -Vector3::z()] {
            let (p, d) = axis_extremes(&points, &centroid, &axis, Some(&Vector3::z())).unwrap();
            assert_eq!(p.z, 100.0);
            assert_eq!(d.z, 0.0);
        }
    }

    #[test]
    fn without_prior_sign_decides() {
        let points = rod();
        let centroid = Point3::new(0.0, 0.0, 50.0);
        let (p, _) = axis_extremes(&points, &centroid, &Vector3::z(), None).unwrap();
        let (q, _) = axis_extremes(&points, &centroid, &-Vector3::z(), None).unwrap();
        assert_eq!(p.z, 0.0);
        assert_eq!(q.z, 100.0);
    }

    #[test]
    fn head_moves_away_from_centroid_side() {
        // Centroid sits at +x of the shaft; the head estimate moves to -x.
        let refined = refine_femoral_head(
            &Point3::new(0.0, 0.0, 100.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(3.0, 0.0, 50.0),
            5.0,
        )
        .unwrap();
        assert_relative_eq!(refined.coords, Vector3::new(-5.0, 0.0, 100.0), epsilon = 1e-12);
    }

    #[test]
    fn head_on_axis_is_degenerate() {
        let err = refine_femoral_head(
            &Point3::new(0.0, 0.0, 100.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 50.0),
            5.0,
        )
        .unwrap_err();
        assert!(matches!(err, LandmarkError::DegenerateGeometry { .. }));
    }

    #[test]
    fn extension_is_along_normalized_axis() {
        let proximal = Point3::new(1.0, 2.0, 3.0);
        let distal = Point3::new(4.0, 6.0, 3.0);
        let (p, d) = extend_axis(&proximal, &distal, 50.0, 2.0).unwrap();
        assert_relative_eq!(nalgebra::distance(&p, &proximal), 1.0, epsilon = 1e-12);
        assert_relative_eq!(nalgebra::distance(&d, &distal), 1.0, epsilon = 1e-12);
        assert_relative_eq!(nalgebra::distance(&p, &d), 7.0, epsilon = 1e-12);
        assert!(extend_axis(&proximal, &proximal, 50.0, 2.0).is_err());
    }
}
