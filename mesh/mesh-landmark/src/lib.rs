//! Anatomical landmarks for long-bone surfaces.
//!
//! This crate derives a bone's coordinate frame from its surface alone and
//! stores it on disk:
//! - **Extraction** - [`extract_axis`] finds proximal, distal and middle
//!   points from farthest-point length, PCA, a femoral head offset and an
//!   outward extension
//! - **Storage** - one text file per [`LandmarkRole`], readable in both the
//!   comma and one-value-per-line layouts
//!
//! Extraction is best-effort and never fails; storage reports errors, and
//! an unrecognized landmark file name is always a hard error.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero GUI dependencies. Every function is a
//! pure function of its arguments; the coordinate convention is passed in
//! through [`ExtractionParams`].
//!
//! # Example
//!
//! ```no_run
//! use mesh_landmark::{ExtractionParams, extract_axis, load_landmark_dir, write_landmark_set};
//! use mesh_types::TriangleSoup;
//!
//! # let femur = TriangleSoup::unit_cube();
//! let landmarks = match load_landmark_dir("landmarks").unwrap() {
//!     Some(stored) => stored,
//!     None => extract_axis(&femur, &ExtractionParams::default()),
//! };
//! write_landmark_set(&landmarks, "output").unwrap();
//! ```
//!
//! # Proximal and Distal
//!
//! PCA yields an axis without a direction, so which end is called proximal
//! follows the eigenvector sign unless
//! [`ExtractionParams::proximal_direction`] supplies an anatomical prior.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod axis;
mod error;
mod extract;
mod landmark;
mod params;
mod store;

pub use axis::{
    BoneLength, PcaResult, axis_extremes, bone_length, extend_axis, principal_axes,
    refine_femoral_head,
};
pub use error::{LandmarkError, LandmarkResult};
pub use extract::extract_axis;
pub use landmark::{LandmarkRole, LandmarkSet};
pub use params::ExtractionParams;
pub use store::{load_landmark_dir, read_landmark_file, write_landmark, write_landmark_set};
