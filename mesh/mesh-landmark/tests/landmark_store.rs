//! Landmark files written to and read from a scratch directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use approx::assert_relative_eq;
use mesh_landmark::{
    LandmarkError, LandmarkRole, LandmarkSet, load_landmark_dir, read_landmark_file,
    write_landmark, write_landmark_set,
};
use nalgebra::Point3;
use tempfile::TempDir;

fn sample_set() -> LandmarkSet {
    LandmarkSet::new(
        Point3::new(1.0, 2.0, 300.0),
        Point3::new(-1.5, 0.25, -12.0),
        Point3::new(0.0, 1.0, 150.0),
    )
}

#[test]
fn proximal_round_trip_within_1e9() {
    let dir = TempDir::new().unwrap();
    let point = Point3::new(1.234_567_890_1, -2.0, 0.0);

    let path = write_landmark(LandmarkRole::Proximal, &point, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "RPOss.txt");

    let (role, read) = read_landmark_file(&path).unwrap();
    assert_eq!(role, LandmarkRole::Proximal);
    assert_relative_eq!(read.coords, point.coords, epsilon = 1e-9);
}

#[test]
fn unexpected_file_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unexpected.txt");
    fs::write(&path, "1,2,3\n").unwrap();

    let err = read_landmark_file(&path).unwrap_err();
    assert!(matches!(
        err,
        LandmarkError::UnrecognizedFileName { ref name } if name == "unexpected.txt"
    ));
}

#[test]
fn legacy_one_value_per_line_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("RDOss.txt");
    fs::write(&path, "1.0000000000e+01\n-2.5\n3\n").unwrap();

    let (role, point) = read_landmark_file(&path).unwrap();
    assert_eq!(role, LandmarkRole::Distal);
    assert_eq!(point, Point3::new(10.0, -2.5, 3.0));
}

#[test]
fn malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("RMShaft.txt");
    fs::write(&path, "1,2\n").unwrap();

    assert!(matches!(
        read_landmark_file(&path),
        Err(LandmarkError::MalformedLandmarkFile { .. })
    ));
}

#[test]
fn set_round_trip_through_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("landmarks");
    let set = sample_set();

    write_landmark_set(&set, &out).unwrap();
    for role in LandmarkRole::ALL {
        assert!(out.join(role.file_name()).is_file());
    }

    let loaded = load_landmark_dir(&out).unwrap().unwrap();
    for (role, point) in set.iter() {
        assert_relative_eq!(loaded.get(role).coords, point.coords, epsilon = 1e-9);
    }
    assert!(!loaded.rotated);
}

#[test]
fn missing_or_empty_directory_means_no_override() {
    let dir = TempDir::new().unwrap();
    assert!(load_landmark_dir(dir.path().join("absent")).unwrap().is_none());
    assert!(load_landmark_dir(dir.path()).unwrap().is_none());
}

#[test]
fn incomplete_directory_falls_back() {
    let dir = TempDir::new().unwrap();
    write_landmark(LandmarkRole::Middle, &Point3::new(0.0, 0.0, 1.0), dir.path()).unwrap();
    write_landmark(LandmarkRole::Distal, &Point3::new(0.0, 0.0, 0.0), dir.path()).unwrap();

    assert!(load_landmark_dir(dir.path()).unwrap().is_none());
}

#[test]
fn unreadable_role_file_falls_back() {
    let dir = TempDir::new().unwrap();
    write_landmark_set(&sample_set(), dir.path()).unwrap();
    fs::write(dir.path().join("RPOss.txt"), "not a number\n").unwrap();

    assert!(load_landmark_dir(dir.path()).unwrap().is_none());
}

#[test]
fn stray_file_in_directory_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    write_landmark_set(&sample_set(), dir.path()).unwrap();
    fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();

    assert!(matches!(
        load_landmark_dir(dir.path()),
        Err(LandmarkError::UnrecognizedFileName { .. })
    ));
}
