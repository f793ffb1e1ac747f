// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up and resolving IFC entities

use crate::{AttributeValue, DecodedEntity, EntityId, IfcType};
use std::sync::Arc;

/// Entity lookup and reference resolution
///
/// Implementations should provide O(1) lookup by entity ID.
///
/// # Example
///
/// ```ignore
/// use ifc_fm_model::{EntityResolver, EntityId};
///
/// fn placement_of(resolver: &dyn EntityResolver, id: EntityId) {
///     if let Some(product) = resolver.get(id) {
///         // ObjectPlacement is attribute 5 on every IfcProduct
///         if let Some(placement) = product.get(5).and_then(|a| resolver.resolve_ref(a)) {
///             println!("placement: {:?}", placement.ifc_type);
///         }
///     }
/// }
/// ```
pub trait EntityResolver: Send + Sync {
    /// Get entity by ID
    ///
    /// Returns the decoded entity if it exists, wrapped in an Arc for
    /// efficient sharing.
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>>;

    /// Resolve an entity reference from an attribute value
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<Arc<DecodedEntity>> {
        match attr {
            AttributeValue::EntityRef(id) => self.get(*id),
            _ => None,
        }
    }

    /// Resolve a list of entity references, skipping anything unresolvable
    fn resolve_ref_list(&self, attr: &AttributeValue) -> Vec<Arc<DecodedEntity>> {
        match attr {
            AttributeValue::List(items) => items
                .iter()
                .filter_map(|item| self.resolve_ref(item))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get all entities of exactly this type, in file order
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>>;

    /// Find entities by type name string (case-insensitive)
    fn find_by_type_name(&self, type_name: &str) -> Vec<Arc<DecodedEntity>> {
        self.entities_by_type(&IfcType::parse(type_name))
    }

    /// Count entities of exactly this type
    fn count_by_type(&self, ifc_type: &IfcType) -> usize;

    /// Get all entity IDs in the model
    fn all_ids(&self) -> Vec<EntityId>;

    /// Get total entity count
    fn entity_count(&self) -> usize {
        self.all_ids().len()
    }
}
