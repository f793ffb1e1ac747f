// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed product table with direct placements resolved at load time

use crate::resolver::ResolverImpl;
use ifc_fm_model::{
    AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcType, Location, PlacementSlot,
    Product, ProductCatalog,
};
use rustc_hash::FxHashMap;

/// Every IfcProduct in the document, in file order
pub struct ProductTable {
    products: Vec<Product>,
    by_id: FxHashMap<EntityId, usize>,
    by_guid: FxHashMap<String, usize>,
}

impl ProductTable {
    /// Decode every product-typed entity and resolve its placement
    pub fn build(resolver: &ResolverImpl) -> Self {
        let mut table = Self::empty();

        for id in resolver.ids_where(IfcType::is_product) {
            let Some(entity) = resolver.get(id) else {
                continue;
            };
            let Some(product) = read_product(&entity, resolver) else {
                log::warn!("{} ({}) has no GlobalId, skipping", id, entity.ifc_type);
                continue;
            };

            let slot = table.products.len();
            if table.by_guid.contains_key(&product.guid) {
                log::warn!(
                    "GlobalId {} is used more than once, {} is not indexed by GUID",
                    product.guid,
                    id
                );
            } else {
                table.by_guid.insert(product.guid.clone(), slot);
            }
            table.by_id.insert(id, slot);
            table.products.push(product);
        }

        log::debug!("Loaded {} products", table.products.len());
        table
    }

    fn empty() -> Self {
        Self {
            products: Vec::new(),
            by_id: FxHashMap::default(),
            by_guid: FxHashMap::default(),
        }
    }
}

impl ProductCatalog for ProductTable {
    fn product(&self, id: EntityId) -> Option<&Product> {
        self.by_id.get(&id).map(|&i| &self.products[i])
    }

    fn by_guid(&self, guid: &str) -> Option<&Product> {
        self.by_guid.get(guid).map(|&i| &self.products[i])
    }

    fn all(&self) -> &[Product] {
        &self.products
    }
}

/// IfcProduct layout: GlobalId 0, Name 2, ObjectPlacement 5, Representation 6
fn read_product(entity: &DecodedEntity, resolver: &dyn EntityResolver) -> Option<Product> {
    let guid = entity.global_id().filter(|g| !g.is_empty())?.to_string();

    Some(Product {
        id: entity.id,
        guid,
        ifc_type: entity.ifc_type.clone(),
        name: entity.get_string(2).map(str::to_string),
        object_placement: entity.get_ref(5),
        representation: entity.get_ref(6),
        placement: read_placement(entity, resolver),
    })
}

/// Follow ObjectPlacement -> RelativePlacement -> Location -> Coordinates
fn read_placement(entity: &DecodedEntity, resolver: &dyn EntityResolver) -> PlacementSlot {
    let placement_id = match entity.get(5) {
        None | Some(AttributeValue::Null) => return PlacementSlot::Absent,
        Some(AttributeValue::EntityRef(id)) => *id,
        Some(other) => {
            return PlacementSlot::Malformed(format!("ObjectPlacement is not a reference: {other:?}"))
        }
    };

    match resolve_location(placement_id, resolver) {
        Ok(location) => PlacementSlot::Resolved(location),
        Err(reason) => PlacementSlot::Malformed(reason),
    }
}

fn resolve_location(
    placement_id: EntityId,
    resolver: &dyn EntityResolver,
) -> std::result::Result<Location, String> {
    let placement = resolver
        .get(placement_id)
        .ok_or_else(|| format!("ObjectPlacement {placement_id} does not exist"))?;
    if placement.ifc_type != IfcType::IfcLocalPlacement {
        return Err(format!(
            "ObjectPlacement {placement_id} is {}, not IfcLocalPlacement",
            placement.ifc_type.schema_name()
        ));
    }

    // IFCLOCALPLACEMENT(PlacementRelTo, RelativePlacement)
    let axis_id = placement
        .get_ref(1)
        .ok_or_else(|| format!("{placement_id} has no RelativePlacement"))?;
    let axis = resolver
        .get(axis_id)
        .ok_or_else(|| format!("RelativePlacement {axis_id} does not exist"))?;

    // IFCAXIS2PLACEMENT3D(Location, Axis, RefDirection)
    let point_id = axis
        .get_ref(0)
        .ok_or_else(|| format!("{axis_id} has no Location"))?;
    let point = resolver
        .get(point_id)
        .filter(|p| p.ifc_type == IfcType::IfcCartesianPoint)
        .ok_or_else(|| format!("Location {point_id} is not an IfcCartesianPoint"))?;

    let coords = point
        .get_list(0)
        .ok_or_else(|| format!("{point_id} has no Coordinates"))?;
    if coords.len() < 3 {
        return Err(format!(
            "{point_id} has {} coordinates, expected 3",
            coords.len()
        ));
    }

    let mut xyz = [0.0; 3];
    for (slot, value) in xyz.iter_mut().zip(coords) {
        *slot = value
            .as_float()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("{point_id} has a non-numeric coordinate"))?;
    }

    Ok(Location::new(xyz[0], xyz[1], xyz[2]))
}
