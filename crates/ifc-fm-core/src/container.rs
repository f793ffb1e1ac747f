// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Enclosing spatial structure of a product

use ifc_fm_model::{EntityId, IfcModel, IfcType, Product};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Which containers count as a result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerPolicy {
    /// Nearest spatial structure of any kind (space, storey, building...)
    #[default]
    AnySpatial,
    /// Only an IfcSpace; anything else resolves to no container
    SpaceOnly,
}

/// Resolve the spatial structure that contains `product`
///
/// Looks up the product's IfcRelContainedInSpatialStructure. A product
/// without one that is part of an aggregate or nested in a host inherits
/// the container of that whole. Never fails: `None` means uncontained.
pub fn resolve_container<'m>(
    model: &'m dyn IfcModel,
    product: &Product,
    policy: ContainerPolicy,
) -> Option<&'m Product> {
    let containment = model.containment();
    let mut visited: FxHashSet<EntityId> = FxHashSet::default();
    let mut current = product.id;

    let structure = loop {
        if !visited.insert(current) {
            log::debug!("Decomposition cycle at {} while resolving {}", current, product.guid);
            return None;
        }
        if let Some(structure) = containment.containing_structure(current) {
            break structure;
        }
        current = containment.decomposing_parent(current)?;
    };

    let Some(container) = model.products().product(structure) else {
        log::debug!("Container {} of {} is not a product", structure, product.guid);
        return None;
    };

    match policy {
        ContainerPolicy::AnySpatial => Some(container),
        ContainerPolicy::SpaceOnly => {
            Some(container).filter(|c| c.ifc_type.is_subtype_of(&IfcType::IfcSpace))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_fm_model::ProductCatalog;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCBUILDINGSTOREY('0Pq9tnDn1FSwnbTUeDZJ2f',$,'Level 1',$,$,$,$,$,.ELEMENT.,0.);
#2=IFCSPACE('1Pq9tnDn1FSwnbTUeDZJ2f',$,'Room A',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#3=IFCSENSOR('2Pq9tnDn1FSwnbTUeDZJ2f',$,'In room',$,$,$,$,$,.TEMPERATURESENSOR.);
#4=IFCSENSOR('3Pq9tnDn1FSwnbTUeDZJ2f',$,'On storey',$,$,$,$,$,.TEMPERATURESENSOR.);
#5=IFCSENSOR('4Pq9tnDn1FSwnbTUeDZJ2f',$,'Loose',$,$,$,$,$,.TEMPERATURESENSOR.);
#6=IFCUNITARYCONTROLELEMENT('5Pq9tnDn1FSwnbTUeDZJ2f',$,'Panel',$,$,$,$,$,$);
#7=IFCSENSOR('6Pq9tnDn1FSwnbTUeDZJ2f',$,'In panel',$,$,$,$,$,.TEMPERATURESENSOR.);
#8=IFCSENSOR('7Pq9tnDn1FSwnbTUeDZJ2f',$,'Cycle A',$,$,$,$,$,.TEMPERATURESENSOR.);
#9=IFCSENSOR('8Pq9tnDn1FSwnbTUeDZJ2f',$,'Cycle B',$,$,$,$,$,.TEMPERATURESENSOR.);
#20=IFCRELCONTAINEDINSPATIALSTRUCTURE('9Pq9tnDn1FSwnbTUeDZJ2f',$,$,$,(#3,#6),#2);
#21=IFCRELCONTAINEDINSPATIALSTRUCTURE('APq9tnDn1FSwnbTUeDZJ2f',$,$,$,(#4),#1);
#22=IFCRELNESTS('BPq9tnDn1FSwnbTUeDZJ2f',$,$,$,#6,(#7));
#23=IFCRELAGGREGATES('CPq9tnDn1FSwnbTUeDZJ2f',$,$,$,#8,(#9));
#24=IFCRELAGGREGATES('DPq9tnDn1FSwnbTUeDZJ2f',$,$,$,#9,(#8));
ENDSEC;
END-ISO-10303-21;
"#;

    fn container_name(id: u32, policy: ContainerPolicy) -> Option<String> {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let product = model.products().product(EntityId(id)).unwrap().clone();
        resolve_container(model.as_ref(), &product, policy).and_then(|c| c.name.clone())
    }

    #[test]
    fn test_direct_containment() {
        assert_eq!(container_name(3, ContainerPolicy::AnySpatial).as_deref(), Some("Room A"));
        assert_eq!(container_name(3, ContainerPolicy::SpaceOnly).as_deref(), Some("Room A"));
    }

    #[test]
    fn test_policy_filters_non_space_structures() {
        assert_eq!(container_name(4, ContainerPolicy::AnySpatial).as_deref(), Some("Level 1"));
        assert_eq!(container_name(4, ContainerPolicy::SpaceOnly), None);
    }

    #[test]
    fn test_nested_element_inherits_host_container() {
        assert_eq!(container_name(7, ContainerPolicy::AnySpatial).as_deref(), Some("Room A"));
    }

    #[test]
    fn test_uncontained_and_cyclic() {
        assert_eq!(container_name(5, ContainerPolicy::AnySpatial), None);
        assert_eq!(container_name(8, ContainerPolicy::AnySpatial), None);
    }
}
