// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-FM Core - facility data extraction
//!
//! Turns a loaded IFC model into facility-management records:
//!
//! - **Sensors** keyed by GUID with their containing space and direct
//!   placement ([`process`])
//! - **Inventories** of the elements contained in every space ([`inventory`])
//! - **Synthetic sensors** at the centroid of every space, for models that
//!   carry none ([`generate_sensors`])
//!
//! Each call works on its own in-memory model and returns its result; no
//! state survives between calls.
//!
//! # Example
//!
//! ```ignore
//! let model = ifc_fm_core::load(&body)?;
//! let report = ifc_fm_core::process(model.as_ref(), &Default::default())?;
//! for (guid, sensor) in &report.sensors {
//!     println!("{guid}: {} in {:?}", sensor.name, sensor.space);
//! }
//! ```

pub mod assemble;
pub mod container;
pub mod error;
pub mod generate;
pub mod inventory;
pub mod placement;
pub mod schema;
pub mod select;

pub use assemble::{
    inventory, process, sensor_name, ExtractOptions, SensorFailure, SensorRecord, SensorReport,
};
pub use container::{resolve_container, ContainerPolicy};
pub use error::{ExtractError, Result};
pub use generate::{
    compress_guid, generate_sensors, new_ifc_guid, write_sensors_json, GeneratedSensor,
    GeneratorConfig,
};
pub use inventory::{build_inventory, Inventory, InventoryElement, InventoryRecord};
pub use placement::extract_location;
pub use schema::{sensor_type, SchemaFamily};
pub use select::{elements, select_by_type, select_by_type_name, spaces};

use ifc_fm_model::IfcModel;
use std::sync::Arc;

/// Load a complete IFC document from memory
pub fn load(bytes: &[u8]) -> Result<Arc<dyn IfcModel>> {
    Ok(ifc_fm_parser::parse_bytes(bytes)?)
}
