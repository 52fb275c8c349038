//! Landmark files on disk.
//!
//! One file per role, named by [`LandmarkRole::file_name`]. Files hold a
//! single point either as comma-separated values on one line, or (older
//! files) one coordinate per line. When a file holds several points, either
//! on separate lines or run together on one line, the first one is used.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use tracing::{debug, info, warn};

use crate::{LandmarkError, LandmarkResult, LandmarkRole, LandmarkSet};

/// Read one landmark file.
///
/// The role comes from the exact file name and is checked before the file
/// is opened.
///
/// # Errors
///
/// - [`LandmarkError::UnrecognizedFileName`] if the name matches no role
/// - [`LandmarkError::Io`] if the file cannot be read
/// - [`LandmarkError::ParseFloat`] if a value is not a number
/// - [`LandmarkError::MalformedLandmarkFile`] if no complete point is found
pub fn read_landmark_file<P: AsRef<Path>>(path: P) -> LandmarkResult<(LandmarkRole, Point3<f64>)> {
    let path = path.as_ref();
    let role = LandmarkRole::from_file_name(&file_name_of(path))?;

    let text = fs::read_to_string(path)?;
    let point = parse_landmark(&text).map_err(|e| match e {
        ParseFailure::Malformed(reason) => LandmarkError::malformed(path, reason),
        ParseFailure::Float(e) => LandmarkError::ParseFloat(e),
    })?;

    debug!("read {role} landmark from {}", path.display());
    Ok((role, point))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

enum ParseFailure {
    Malformed(String),
    Float(std::num::ParseFloatError),
}

impl From<std::num::ParseFloatError> for ParseFailure {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::Float(e)
    }
}

fn parse_landmark(text: &str) -> Result<Point3<f64>, ParseFailure> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let Some(first) = lines.first() else {
        return Err(ParseFailure::Malformed("file is empty".to_string()));
    };

    let rows: Vec<Vec<f64>> = if first.contains(',') {
        lines
            .iter()
            .map(|line| {
                line.split(',')
                    .map(|v| v.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?
    } else {
        let values = lines
            .iter()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        values.chunks(3).map(<[f64]>::to_vec).collect()
    };

    // A row longer than one point holds consecutive points.
    match rows.first().and_then(|row| row.chunks(3).next()) {
        Some(&[x, y, z]) => Ok(Point3::new(x, y, z)),
        Some(row) => Err(ParseFailure::Malformed(format!(
            "expected 3 values per point, found {}",
            row.len()
        ))),
        None => Err(ParseFailure::Malformed("no point found".to_string())),
    }
}

/// Write one landmark to `dir` under its role's file name.
///
/// The point is written as `x,y,z` with 10 decimal places. Returns the path
/// written.
///
/// # Errors
///
/// Returns [`LandmarkError::Io`] if the file cannot be written.
pub fn write_landmark<P: AsRef<Path>>(
    role: LandmarkRole,
    point: &Point3<f64>,
    dir: P,
) -> LandmarkResult<PathBuf> {
    let path = dir.as_ref().join(role.file_name());
    fs::write(&path, format_landmark(point))?;
    debug!("wrote {role} landmark to {}", path.display());
    Ok(path)
}

fn format_landmark(point: &Point3<f64>) -> String {
    format!("{:.10},{:.10},{:.10}\n", point.x, point.y, point.z)
}

/// Write all three landmarks to `dir`, creating it if needed.
///
/// The `rotated` flag is not stored; points are written as they are.
///
/// # Errors
///
/// Returns [`LandmarkError::Io`] if the directory or a file cannot be
/// written.
pub fn write_landmark_set<P: AsRef<Path>>(set: &LandmarkSet, dir: P) -> LandmarkResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for (role, point) in set.iter() {
        write_landmark(role, &point, dir)?;
    }
    info!("saved landmarks to {}", dir.display());
    Ok(())
}

/// Load a landmark set from a directory of role files.
///
/// Returns `Ok(None)` when there is nothing to override extraction with:
/// the directory is missing or empty, or some role file is missing or
/// unreadable. Subdirectories are ignored.
///
/// # Errors
///
/// Returns [`LandmarkError::UnrecognizedFileName`] if the directory holds a
/// file whose name matches no role, and [`LandmarkError::Io`] if the
/// directory exists but cannot be listed.
pub fn load_landmark_dir<P: AsRef<Path>>(dir: P) -> LandmarkResult<Option<LandmarkSet>> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no landmark directory at {}", dir.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        debug!("landmark directory {} is empty", dir.display());
        return Ok(None);
    }

    // Reject unknown names before reading anything.
    for path in &files {
        LandmarkRole::from_file_name(&file_name_of(path))?;
    }

    let mut set = LandmarkSet::origin();
    let mut found = [false; 3];
    for path in &files {
        match read_landmark_file(path) {
            Ok((role, point)) => {
                set.set(role, point);
                found[role as usize] = true;
            }
            Err(e) => warn!("Error reading landmark file {}: {e}", path.display()),
        }
    }

    if let Some(missing) = LandmarkRole::ALL.into_iter().find(|r| !found[*r as usize]) {
        warn!(
            "landmark directory {} has no usable {missing} landmark; landmarks will be extracted",
            dir.display()
        );
        return Ok(None);
    }

    info!("loaded landmarks from {}", dir.display());
    Ok(Some(set))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<Point3<f64>> {
        parse_landmark(text).ok()
    }

    #[test]
    fn comma_line() {
        assert_eq!(parse("1.5,-2,3e2\n"), Some(Point3::new(1.5, -2.0, 300.0)));
        assert_eq!(parse(" 1.5 , -2 , 3 "), Some(Point3::new(1.5, -2.0, 3.0)));
    }

    #[test]
    fn one_value_per_line() {
        assert_eq!(parse("1.0\n2.0\n3.0\n"), Some(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn first_row_wins() {
        assert_eq!(parse("1,2,3\n4,5,6\n"), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse("1\n2\n3\n4\n5\n6\n"), Some(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn long_comma_row_is_split_into_points() {
        assert_eq!(parse("1,2,3,4,5,6\n"), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse("7,8,9,10,11,12\n1,2,3\n"), Some(Point3::new(7.0, 8.0, 9.0)));
        assert!(matches!(parse_landmark("1,2\n3,4,5\n"), Err(ParseFailure::Malformed(_))));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("\n1,2,3\n\n"), Some(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn malformed_content() {
        assert!(matches!(parse_landmark(""), Err(ParseFailure::Malformed(_))));
        assert!(matches!(parse_landmark("1,2\n"), Err(ParseFailure::Malformed(_))));
        assert!(matches!(parse_landmark("1\n2\n"), Err(ParseFailure::Malformed(_))));
        assert!(matches!(parse_landmark("1,x,3\n"), Err(ParseFailure::Float(_))));
    }

    #[test]
    fn format_has_ten_decimals() {
        let text = format_landmark(&Point3::new(12.345_678_901_2, -4.5, 100.000_000_000_1));
        assert_eq!(text, "12.3456789012,-4.5000000000,100.0000000001\n");
    }
}
