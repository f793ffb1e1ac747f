// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed product records populated while a document is loaded
//!
//! Every entity whose type specializes `IfcProduct` gets a [`Product`] with
//! its identity and its direct placement resolved up front, so consumers
//! never chase `ObjectPlacement.RelativePlacement.Location` through the
//! untyped attribute graph.

use crate::{EntityId, IfcType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location vector of a direct placement, in file units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components in order
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Outcome of reading a product's direct placement during load
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementSlot {
    /// The chain resolved to three finite coordinates
    Resolved(Location),
    /// The product has no ObjectPlacement
    Absent,
    /// The chain exists but is broken; the message says where
    Malformed(String),
}

impl fmt::Display for PlacementSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementSlot::Resolved(loc) => write!(f, "({}, {}, {})", loc.x, loc.y, loc.z),
            PlacementSlot::Absent => write!(f, "no object placement"),
            PlacementSlot::Malformed(reason) => write!(f, "{reason}"),
        }
    }
}

/// A rooted, placeable entity (IfcProduct and its subtypes)
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    /// Entity ID
    pub id: EntityId,
    /// GlobalId (attribute 0)
    pub guid: String,
    /// Declared entity type
    pub ifc_type: IfcType,
    /// Name (attribute 2), if set
    pub name: Option<String>,
    /// ObjectPlacement reference (attribute 5)
    pub object_placement: Option<EntityId>,
    /// Representation reference (attribute 6)
    pub representation: Option<EntityId>,
    /// Direct placement resolved at load time
    pub placement: PlacementSlot,
}

/// Typed product lookup
///
/// Implementations index products by entity ID and by GUID. Iteration order
/// is file order.
pub trait ProductCatalog: Send + Sync {
    /// Get a product by entity ID
    fn product(&self, id: EntityId) -> Option<&Product>;

    /// Get a product by GlobalId
    fn by_guid(&self, guid: &str) -> Option<&Product>;

    /// All products in file order
    fn all(&self) -> &[Product];

    /// Products whose type equals or specializes `ifc_type`, in file order
    fn products_of_type(&self, ifc_type: &IfcType) -> Vec<&Product> {
        self.all()
            .iter()
            .filter(|p| p.ifc_type.is_subtype_of(ifc_type))
            .collect()
    }

    /// Number of products
    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
