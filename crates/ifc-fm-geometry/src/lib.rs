// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-FM Geometry - placements and bounding-volume centroids
//!
//! Resolves placement chains to `nalgebra` transforms and computes the
//! axis-aligned bounds of body representations without meshing them.
//!
//! # Example
//!
//! ```ignore
//! use ifc_fm_geometry::ShapeIterator;
//!
//! for shape in ShapeIterator::new(model.as_ref(), spaces) {
//!     println!("{} -> {:?}", shape.guid, shape.centroid);
//! }
//! ```

pub mod bounds;
pub mod error;
pub mod placement;
pub mod shapes;

pub use bounds::{Aabb, BoundsCollector};
pub use error::{Error, Result};
pub use placement::PlacementResolver;
pub use shapes::{shape_centroid, ResolvedShape, ShapeIterator};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
