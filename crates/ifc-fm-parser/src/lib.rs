// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-FM Parser - In-memory IFC/STEP loader
//!
//! This crate loads an IFC (STEP) document from a string or byte buffer and
//! exposes it through the traits defined in `ifc-fm-model`.
//!
//! # Features
//!
//! - **Fast tokenization** using `nom` combinators
//! - **SIMD-accelerated scanning** using `memchr`
//! - **Lazy entity decoding** with an `Arc` cache
//! - **Typed products** whose GUID, name and direct placement are read at load time
//! - **Containment index** over IfcRelContainedInSpatialStructure, IfcRelAggregates and IfcRelNests
//!
//! # Example
//!
//! ```ignore
//! use ifc_fm_model::IfcType;
//!
//! let model = ifc_fm_parser::parse_bytes(&body)?;
//! for sensor in model.products().products_of_type(&IfcType::IfcSensor) {
//!     println!("{} at {}", sensor.guid, sensor.placement);
//! }
//! ```

mod containment;
mod model;
mod products;
mod resolver;
mod scanner;
mod tokenizer;
mod units;

pub use containment::ContainmentIndex;
pub use model::ParsedModel;
pub use products::ProductTable;
pub use resolver::ResolverImpl;
pub use scanner::{parse_header, EntityScanner, HeaderInfo};
pub use tokenizer::{decode_step_string, parse_entity, Token};
pub use units::extract_unit_scale;

use ifc_fm_model::{IfcModel, IfcParser, Result};
use std::sync::Arc;

/// Main STEP/IFC parser implementing `IfcParser` trait
///
/// Every model it returns has its containment and decomposition indexed.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepParser;

impl IfcParser for StepParser {
    fn parse(&self, content: &str) -> Result<Arc<dyn IfcModel>> {
        ParsedModel::parse(content).map(|m| Arc::new(m) as Arc<dyn IfcModel>)
    }
}

/// Quick parse function for simple use cases
pub fn parse(content: &str) -> Result<Arc<dyn IfcModel>> {
    StepParser.parse(content)
}

/// Parse an in-memory document buffer
pub fn parse_bytes(bytes: &[u8]) -> Result<Arc<dyn IfcModel>> {
    StepParser.parse_bytes(bytes)
}
