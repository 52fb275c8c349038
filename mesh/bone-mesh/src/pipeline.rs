//! Run-level pipeline.
//!
//! A run inspects a bone STL (sniff, load, analyze) and then resolves its
//! landmarks, preferring a stored landmark directory over extraction. The
//! resolved landmarks are then written to the output directory; a failed
//! write is logged and does not discard them.

use std::fmt;
use std::path::{Path, PathBuf};

use mesh_io::{StlFormat, classify, load_stl_as};
use mesh_landmark::{
    ExtractionParams, LandmarkSet, extract_axis, load_landmark_dir, write_landmark_set,
};
use mesh_topology::{DiagnosticReport, ValidationOptions, analyze_with_options};
use mesh_types::TriangleSoup;
use tracing::{error, info, info_span};

use crate::PipelineResult;

/// A loaded surface together with its diagnostics.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Encoding the sniffer chose.
    pub format: StlFormat,
    /// The loaded facets.
    pub soup: TriangleSoup,
    /// Topology findings for `soup`.
    pub report: DiagnosticReport,
}

/// Sniff, load and analyze an STL file.
///
/// The report is logged before it is returned. Defects never fail the call;
/// check [`DiagnosticReport::has_blocking_errors`] before meshing.
///
/// # Errors
///
/// Returns [`PipelineError::Io`](crate::PipelineError::Io) if the file is
/// missing, malformed, or holds no triangles.
///
/// # Example
///
/// ```no_run
/// use bone_mesh::{ValidationOptions, inspect_stl};
///
/// let inspection = inspect_stl("femur.stl", &ValidationOptions::default()).unwrap();
/// if inspection.report.has_blocking_errors() {
///     eprintln!("{}", inspection.report);
/// }
/// ```
pub fn inspect_stl<P: AsRef<Path>>(
    path: P,
    options: &ValidationOptions,
) -> PipelineResult<Inspection> {
    let path = path.as_ref();
    let _span = info_span!("inspect_stl", path = %path.display()).entered();

    let format = classify(path);
    let soup = load_stl_as(path, format)?;
    let report = analyze_with_options(&soup, options);
    report.log();

    Ok(Inspection {
        format,
        soup,
        report,
    })
}

/// Where a resolved landmark set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkSource {
    /// Read from a landmark directory.
    Store,
    /// Derived from the surface.
    Extracted,
}

impl fmt::Display for LandmarkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => write!(f, "read from files"),
            Self::Extracted => write!(f, "found using auto landmark function"),
        }
    }
}

/// Landmarks chosen for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLandmarks {
    /// The three points.
    pub set: LandmarkSet,
    /// Where [`ResolvedLandmarks::set`] came from.
    pub source: LandmarkSource,
    /// Directory the role files were written to, `None` if saving failed.
    pub saved_to: Option<PathBuf>,
}

/// Resolve landmarks for `soup` and save them to `output_dir`.
///
/// When `landmark_dir` holds a complete set of role files those points are
/// used as they are; `params` then has no effect. Otherwise the landmarks
/// are extracted from `soup`. Either way all three role files are written to
/// `output_dir`, which is created if needed. A failed write is logged at
/// `error` level and leaves [`ResolvedLandmarks::saved_to`] empty.
///
/// # Errors
///
/// Returns [`PipelineError::Landmark`](crate::PipelineError::Landmark) if
/// `landmark_dir` holds a file with an unrecognized name.
pub fn resolve_landmarks(
    soup: &TriangleSoup,
    landmark_dir: Option<&Path>,
    output_dir: &Path,
    params: &ExtractionParams,
) -> PipelineResult<ResolvedLandmarks> {
    let stored = match landmark_dir {
        Some(dir) => load_landmark_dir(dir)?,
        None => None,
    };

    let (set, source) = match stored {
        Some(set) => (set, LandmarkSource::Store),
        None => (extract_axis(soup, params), LandmarkSource::Extracted),
    };
    info!("Landmarks {source}");

    let saved_to = match write_landmark_set(&set, output_dir) {
        Ok(()) => Some(output_dir.to_path_buf()),
        Err(e) => {
            error!("Could not save landmarks to {}: {e}", output_dir.display());
            None
        }
    };

    Ok(ResolvedLandmarks {
        set,
        source,
        saved_to,
    })
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Loaded surface and its diagnostics.
    pub inspection: Inspection,
    /// Resolved landmarks and where they were saved.
    pub landmarks: ResolvedLandmarks,
}

/// [`inspect_stl`] followed by [`resolve_landmarks`].
///
/// Landmarks are resolved even when the report has blocking errors.
///
/// # Errors
///
/// Any error from [`inspect_stl`] or [`resolve_landmarks`].
pub fn run<P: AsRef<Path>>(
    stl_path: P,
    landmark_dir: Option<&Path>,
    output_dir: &Path,
    options: &ValidationOptions,
    params: &ExtractionParams,
) -> PipelineResult<RunOutput> {
    let inspection = inspect_stl(stl_path, options)?;
    let landmarks = resolve_landmarks(&inspection.soup, landmark_dir, output_dir, params)?;
    Ok(RunOutput {
        inspection,
        landmarks,
    })
}
