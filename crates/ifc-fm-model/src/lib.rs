// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-FM Model - Trait definitions and shared types for facility-data extraction
//!
//! This crate provides the abstractions the loader and the resolution pipeline
//! agree on. A parser backend implements the traits; the pipeline only sees
//! the trait objects.
//!
//! # Architecture
//!
//! - [`IfcParser`] - Entry point for loading IFC content
//! - [`IfcModel`] - Read-only access to one loaded document
//! - [`EntityResolver`] - Entity lookup and reference resolution
//! - [`ContainmentQuery`] - Containment and decomposition edges
//! - [`ProductCatalog`] - Typed product records (GUID, name, placement)
//!
//! # Example
//!
//! ```ignore
//! use ifc_fm_model::{IfcModel, IfcType};
//!
//! let model = ifc_fm_parser::parse_bytes(&bytes)?;
//! for space in model.products().products_of_type(&IfcType::IfcSpace) {
//!     println!("{} {:?}", space.guid, space.name);
//! }
//! ```

pub mod containment;
pub mod error;
pub mod product;
pub mod resolver;
pub mod traits;
pub mod types;

pub use containment::*;
pub use error::*;
pub use product::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;
