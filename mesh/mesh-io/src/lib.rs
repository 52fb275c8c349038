//! STL file I/O for bone surface analysis.
//!
//! This crate loads STL surfaces into a [`TriangleSoup`](mesh_types::TriangleSoup)
//! and writes them back:
//!
//! - [`classify`] sniffs the encoding (ASCII or binary) from the header and
//!   the declared triangle count
//! - [`load_stl`] sniffs, then decodes; [`load_stl_as`] skips the sniffer
//! - [`save_stl`] / [`write_stl`] encode either variant, storing normals as given
//!
//! # Layer 0 Crate
//!
//! Zero GUI dependencies; safe to call from a worker thread.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{classify, load_stl, StlFormat};
//!
//! let format = classify("femur.stl");
//! let soup = load_stl("femur.stl").unwrap();
//! println!("{format}: {} facets", soup.face_count());
//! ```
//!
//! A failed load never yields a partial mesh: callers get an [`IoError`] and
//! must not run topology or landmark analysis for that file.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod sniff;
mod stl;

pub use error::{IoError, IoResult};
pub use sniff::{StlFormat, classify, classify_reader};
pub use stl::{load_stl, load_stl_as, read_stl, save_stl, write_stl};
