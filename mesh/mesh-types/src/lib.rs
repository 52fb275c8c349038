//! Core mesh types for bone surface analysis.
//!
//! This crate provides the foundational types for triangle-soup processing:
//!
//! - [`Facet`] - A triangle with its own vertex copies and the stored normal
//! - [`TriangleSoup`] - An ordered sequence of facets, exactly as read from STL
//! - [`VertexKey`] / [`EdgeKey`] - Bit-exact coordinate keys used for adjacency
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI dependencies**. It can be used from
//! CLI tools, worker threads of a desktop host, or servers.
//!
//! # Vertex Identity
//!
//! STL repeats vertex coordinates per face and the soup keeps it that way:
//! no deduplication happens on load. Wherever two occurrences must be
//! recognised as "the same vertex", a [`VertexKey`] is built from the exact
//! coordinate bits, so equality is structural.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`; segmented
//! bone surfaces are conventionally in millimeters.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Facet, Point3, TriangleSoup, Vector3};
//!
//! let mut soup = TriangleSoup::new();
//! soup.push(Facet::new(
//!     Vector3::z(),
//!     [
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//! ));
//!
//! assert_eq!(soup.face_count(), 1);
//! assert_eq!(soup.vertices().count(), 3);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod facet;
mod key;
mod soup;

pub use bounds::Aabb;
pub use facet::Facet;
pub use key::{EdgeKey, VertexKey};
pub use soup::TriangleSoup;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
