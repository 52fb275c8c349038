//! Geometric properties of the shaft-axis construction.
//!
//! Run with: cargo test -p mesh-landmark --test axis_properties

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use mesh_landmark::{
    ExtractionParams, axis_extremes, bone_length, extend_axis, extract_axis, principal_axes,
};
use mesh_types::{Facet, TriangleSoup};
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;

/// Points on an axis-aligned ellipsoid with semi-axes `(a, b, c)`, sampled
/// on a latitude-longitude grid.
fn ellipsoid_cloud(a: f64, b: f64, c: f64, center: Vector3<f64>) -> Vec<Point3<f64>> {
    let mut points = Vec::new();
    for i in 0..=16 {
        let theta = std::f64::consts::PI * f64::from(i) / 16.0;
        for j in 0..24 {
            let phi = std::f64::consts::TAU * f64::from(j) / 24.0;
            points.push(Point3::new(
                a * theta.cos(),
                b * theta.sin() * phi.cos(),
                c * theta.sin() * phi.sin(),
            ) + center);
        }
    }
    points
}

/// The same grid, triangulated into a closed soup.
fn ellipsoid_soup(a: f64, b: f64, c: f64) -> TriangleSoup {
    let ring = |i: u32, j: u32| {
        let theta = std::f64::consts::PI * f64::from(i) / 16.0;
        let phi = std::f64::consts::TAU * f64::from(j % 24) / 24.0;
        Point3::new(a * theta.cos(), b * theta.sin() * phi.cos(), c * theta.sin() * phi.sin())
    };
    let mut soup = TriangleSoup::new();
    for i in 0..16 {
        for j in 0..24 {
            soup.push(Facet::from_vertices([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1)]));
            soup.push(Facet::from_vertices([ring(i, j), ring(i + 1, j + 1), ring(i, j + 1)]));
        }
    }
    soup
}

proptest! {
    /// The primary axis of an X-elongated ellipsoid is X, up to sign.
    #[test]
    fn pca_axis_follows_long_semi_axis(
        a in 20.0..200.0f64,
        b_frac in 0.05..0.4f64,
        c_frac in 0.05..0.4f64,
        offset in prop::array::uniform3(-500.0..500.0f64),
    ) {
        let points = ellipsoid_cloud(a, a * b_frac, a * c_frac, Vector3::from(offset));
        let pca = principal_axes(&points).unwrap();

        // Within 0.1 degree, sign-agnostic.
        let cos_angle = pca.primary_axis().dot(&Vector3::x()).abs();
        prop_assert!(cos_angle > (0.1_f64).to_radians().cos());
    }

    /// Extended ends move outward by exactly `L * pct / 100` along the axis.
    #[test]
    fn extension_distance(
        p in prop::array::uniform3(-100.0..100.0f64),
        d in prop::array::uniform3(-100.0..100.0f64),
        length in 1.0..500.0f64,
        percent in 0.0..10.0f64,
    ) {
        let proximal = Point3::from(p);
        let distal = Point3::from(d);
        prop_assume!(nalgebra::distance(&proximal, &distal) > 1e-3);

        let (ext_p, ext_d) = extend_axis(&proximal, &distal, length, percent).unwrap();
        let expected = length * percent / 100.0;
        let axis = (distal - proximal).normalize();

        prop_assert!((nalgebra::distance(&ext_p, &proximal) - expected).abs() < 1e-9);
        prop_assert!((nalgebra::distance(&ext_d, &distal) - expected).abs() < 1e-9);
        // Outward: proximal moves against the axis, distal with it.
        prop_assert!((ext_p - proximal).dot(&axis) <= 0.0);
        prop_assert!((ext_d - distal).dot(&axis) >= 0.0);
    }

    /// The farthest-point estimate never exceeds the true diameter.
    #[test]
    fn bone_length_is_a_lower_bound(
        points in prop::collection::vec(
            prop::array::uniform3(-50.0..50.0f64).prop_map(Point3::from),
            1..40,
        ),
    ) {
        let estimate = bone_length(&points).unwrap();
        let mut diameter = 0.0_f64;
        for p in &points {
            for q in &points {
                diameter = diameter.max(nalgebra::distance(p, q));
            }
        }
        prop_assert!(estimate.length <= diameter + 1e-12);
        let span = nalgebra::distance(&estimate.first, &estimate.second);
        prop_assert!((span - estimate.length).abs() < 1e-12);
    }
}

#[test]
fn ellipsoid_extremes_are_the_poles() {
    let points = ellipsoid_cloud(100.0, 10.0, 8.0, Vector3::zeros());
    let pca = principal_axes(&points).unwrap();
    let (p, d) =
        axis_extremes(&points, &pca.centroid, &pca.primary_axis(), Some(&Vector3::x())).unwrap();

    assert_relative_eq!(p.x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(d.x, -100.0, epsilon = 1e-9);
}

#[test]
fn ellipsoid_landmarks() {
    let soup = ellipsoid_soup(100.0, 10.0, 8.0);
    // The centroid sits on the shaft line, so the head offset direction is
    // undefined for this shape.
    let params = ExtractionParams::new()
        .with_proximal_direction(Vector3::x())
        .with_head_offset_percent(0.0);
    let set = extract_axis(&soup, &params);

    // Bone length along the poles is 200; 2% extension is 4 on each side.
    assert!(set.proximal.x > 100.0);
    assert!(set.distal.x < -100.0);
    assert_relative_eq!(set.distal.x, -104.0, epsilon = 1e-6);
    assert!(set.middle.coords.norm() < 5.0);

    let flipped = extract_axis(&soup, &params.with_rotated(true));
    assert!(flipped.rotated);
    assert_relative_eq!(flipped.distal.x, 104.0, epsilon = 1e-6);
}
