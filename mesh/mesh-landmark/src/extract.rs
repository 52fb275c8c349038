//! Best-effort landmark extraction from a bone surface.

use mesh_types::TriangleSoup;
use nalgebra::Point3;
use tracing::{info, info_span, warn};

use crate::axis::{
    BoneLength, axis_extremes, bone_length, extend_axis, principal_axes, refine_femoral_head,
};
use crate::{ExtractionParams, LandmarkSet};

/// Derive proximal, distal and middle landmarks from a surface.
///
/// Steps, over every vertex occurrence of the soup:
///
/// 1. Estimate bone length by two-pass farthest-point search.
/// 2. PCA of the vertex cloud; the extremes along the primary axis become
///    proximal and distal, the centroid becomes middle.
/// 3. Refine proximal toward the femoral head.
/// 4. Extend both ends outward by [`ExtractionParams::extension_percent`]
///    of the bone length.
/// 5. Negate X and Y if [`ExtractionParams::rotated`] is set.
///
/// Never fails. A step that fails is logged at `warn` and the values from
/// the step before it are kept. If PCA fails, the farthest-point pair from
/// step 1 stands in for the axis extremes. An empty soup yields all three
/// points at the origin.
///
/// # Example
///
/// ```
/// use mesh_landmark::{ExtractionParams, extract_axis};
/// use mesh_types::{TriangleSoup, Vector3};
///
/// // A 1 x 1 x 10 box standing on the XY plane
/// let bone = TriangleSoup::unit_cube().scaled(Vector3::new(1.0, 1.0, 10.0));
/// let params = ExtractionParams::new().with_proximal_direction(Vector3::z());
///
/// let landmarks = extract_axis(&bone, &params);
/// assert!(landmarks.proximal.z > 10.0);
/// assert!(landmarks.distal.z < 0.0);
/// ```
#[must_use]
pub fn extract_axis(soup: &TriangleSoup, params: &ExtractionParams) -> LandmarkSet {
    let points: Vec<Point3<f64>> = soup.vertices().copied().collect();
    let _span = info_span!("extract_axis", vertices = points.len()).entered();

    let Some(centroid) = soup.centroid() else {
        warn!("mesh has no vertices; landmarks default to the origin");
        return orient(LandmarkSet::origin(), params);
    };

    let length = bone_length(&points)
        .inspect_err(|e| warn!("Error calculating bone length: {e}"))
        .ok();

    let (mut proximal, mut distal, middle) = match principal_axes(&points).and_then(|pca| {
        axis_extremes(
            &points,
            &pca.centroid,
            &pca.primary_axis(),
            params.proximal_direction.as_ref(),
        )
        .map(|(p, d)| (p, d, pca.centroid))
    }) {
        Ok(extremes) => extremes,
        Err(e) => {
            warn!("Error finding shaft axis: {e}; using the farthest-point pair");
            let (p, d) = length.map_or((centroid, centroid), |l| farthest_pair(&l, params));
            (p, d, centroid)
        }
    };

    match refine_femoral_head(&proximal, &distal, &middle, params.head_offset_percent) {
        Ok(refined) => proximal = refined,
        Err(e) => warn!("Error estimating femoral head location: {e}"),
    }

    match length.map(|l| extend_axis(&proximal, &distal, l.length, params.extension_percent)) {
        Some(Ok((p, d))) => {
            proximal = p;
            distal = d;
        }
        Some(Err(e)) => warn!("Error estimating extended locations: {e}"),
        None => warn!("Skipping axis extension: bone length unavailable"),
    }

    let landmarks = orient(LandmarkSet::new(proximal, distal, middle), params);
    info!(
        proximal = ?landmarks.proximal.coords.as_slice(),
        distal = ?landmarks.distal.coords.as_slice(),
        middle = ?landmarks.middle.coords.as_slice(),
        rotated = landmarks.rotated,
        "landmarks extracted"
    );
    landmarks
}

fn orient(set: LandmarkSet, params: &ExtractionParams) -> LandmarkSet {
    if params.rotated {
        set.rotated_180_z()
    } else {
        set
    }
}

/// Farthest-point endpoints as `(proximal, distal)`, ordered by the prior if
/// there is one.
fn farthest_pair(length: &BoneLength, params: &ExtractionParams) -> (Point3<f64>, Point3<f64>) {
    match params.proximal_direction {
        Some(prior) if (length.first - length.second).dot(&prior) < 0.0 => {
            (length.second, length.first)
        }
        _ => (length.first, length.second),
    }
}
