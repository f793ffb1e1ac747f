// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-space element inventory

use crate::select;
use ifc_fm_model::{IfcModel, IfcType, Product};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Space GUID -> inventory, ordered by GUID
pub type Inventory = BTreeMap<String, InventoryRecord>;

/// Elements contained in one space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub space_guid: String,
    pub space_name: Option<String>,
    pub elements: Vec<InventoryElement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryElement {
    pub guid: String,
    /// Declared entity type, schema-cased (e.g. `IfcWall`)
    #[serde(rename = "type")]
    pub element_type: String,
    pub name: Option<String>,
}

impl InventoryRecord {
    fn empty(space: &Product) -> Self {
        Self {
            space_guid: space.guid.clone(),
            space_name: space.name.clone(),
            elements: Vec::new(),
        }
    }
}

impl From<&Product> for InventoryElement {
    fn from(product: &Product) -> Self {
        Self {
            guid: product.guid.clone(),
            element_type: product.ifc_type.schema_name().to_string(),
            name: product.name.clone(),
        }
    }
}

/// Build the inventory of every space
///
/// Every space gets a record, contained or not. Containment edges are then
/// walked in file order; only edges relating to a space count, and only
/// IfcElement participants are listed. An element listed once is not listed
/// again by a later edge.
pub fn build_inventory(model: &dyn IfcModel) -> Inventory {
    let products = model.products();

    let mut inventory: Inventory = select::spaces(model)
        .into_iter()
        .map(|space| (space.guid.clone(), InventoryRecord::empty(space)))
        .collect();

    let mut listed: FxHashSet<&str> = FxHashSet::default();

    for edge in model.containment().edges() {
        let Some(relating) = edge.relating else {
            log::debug!("{} has no relating structure", edge.relationship);
            continue;
        };
        let Some(space) = products
            .product(relating)
            .filter(|p| p.ifc_type.is_subtype_of(&IfcType::IfcSpace))
        else {
            log::debug!("{} does not relate to a space", edge.relationship);
            continue;
        };

        let record = inventory
            .entry(space.guid.clone())
            .or_insert_with(|| InventoryRecord::empty(space));

        for &element_id in &edge.related {
            let Some(element) = products.product(element_id).filter(|p| p.ifc_type.is_element())
            else {
                match model.resolver().get(element_id).map(|e| e.ifc_type.clone()) {
                    Some(IfcType::Unknown(keyword)) => log::warn!(
                        "{} in {} has unrecognized type {}, not listed",
                        element_id,
                        edge.relationship,
                        keyword
                    ),
                    _ => log::debug!(
                        "{} in {} is not an element, skipping",
                        element_id,
                        edge.relationship
                    ),
                }
                continue;
            };
            if !listed.insert(element.guid.as_str()) {
                log::debug!("{} is already listed in another space", element.guid);
                continue;
            }
            record.elements.push(InventoryElement::from(element));
        }
    }

    log::info!(
        "Inventory: {} spaces, {} elements",
        inventory.len(),
        listed.len()
    );

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCBUILDINGSTOREY('0t$7a2Wf50tP0V7ycX1Rdh',$,'Level',$,$,$,$,$,.ELEMENT.,0.);
#2=IFCSPACE('1t$7a2Wf50tP0V7ycX1Rdh',$,'Hall',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#3=IFCWALL('2t$7a2Wf50tP0V7ycX1Rdh',$,'W1',$,$,$,$,$,$);
#4=IFCDOOR('3t$7a2Wf50tP0V7ycX1Rdh',$,$,$,$,$,$,$,$,$,$,$,$);
#5=IFCANNOTATION('4t$7a2Wf50tP0V7ycX1Rdh',$,'Note',$,$,$,$);
#6=IFCSLAB('5t$7a2Wf50tP0V7ycX1Rdh',$,'Floor',$,$,$,$,$,$);
#10=IFCRELCONTAINEDINSPATIALSTRUCTURE('6t$7a2Wf50tP0V7ycX1Rdh',$,$,$,(#3,#5,#4,#99),#2);
#11=IFCRELCONTAINEDINSPATIALSTRUCTURE('7t$7a2Wf50tP0V7ycX1Rdh',$,$,$,(#6),#1);
#12=IFCRELCONTAINEDINSPATIALSTRUCTURE('8t$7a2Wf50tP0V7ycX1Rdh',$,$,$,(#3),#2);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_space_inventory() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let inventory = build_inventory(model.as_ref());

        assert_eq!(inventory.len(), 1);
        let hall = &inventory["1t$7a2Wf50tP0V7ycX1Rdh"];
        assert_eq!(hall.space_name.as_deref(), Some("Hall"));

        let listed: Vec<_> = hall
            .elements
            .iter()
            .map(|e| (e.element_type.as_str(), e.name.as_deref()))
            .collect();
        assert_eq!(listed, vec![("IfcWall", Some("W1")), ("IfcDoor", None)]);
    }

    #[test]
    fn test_standard_case_and_distribution_subtypes_are_listed() {
        let model = ifc_fm_parser::parse(
            r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCSPACE('S1',$,'Plant',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#2=IFCWALL('E1',$,$,$,$,$,$,$,$);
#3=IFCDOORSTANDARDCASE('E2',$,$,$,$,$,$,$,$,$,$,$,$);
#4=IFCLAMP('E3',$,$,$,$,$,$,$,$);
#5=IFCPIPEFITTING('E4',$,$,$,$,$,$,$,$);
#6=IFCSLABSTANDARDCASE('E5',$,$,$,$,$,$,$,$);
#7=IFCFLOWMETER('E6',$,$,$,$,$,$,$,$);
#8=IFCELECTRICAPPLIANCE('E7',$,$,$,$,$,$,$,$);
#10=IFCRELCONTAINEDINSPATIALSTRUCTURE('R1',$,$,$,(#2,#3,#4,#5,#6,#7,#8),#1);
ENDSEC;
END-ISO-10303-21;
"#,
        )
        .unwrap();
        let inventory = build_inventory(model.as_ref());

        let listed: Vec<_> = inventory["S1"]
            .elements
            .iter()
            .map(|e| e.element_type.as_str())
            .collect();
        assert_eq!(
            listed,
            vec![
                "IfcWall",
                "IfcDoorStandardCase",
                "IfcLamp",
                "IfcPipeFitting",
                "IfcSlabStandardCase",
                "IfcFlowMeter",
                "IfcElectricAppliance",
            ]
        );
    }

    #[test]
    fn test_element_in_two_spaces_is_listed_under_the_first() {
        let model = ifc_fm_parser::parse(
            r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCSPACE('S1',$,'North',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#2=IFCSPACE('S2',$,'South',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#3=IFCWALL('W1',$,'Shared',$,$,$,$,$,$);
#4=IFCWALL('W2',$,'Own',$,$,$,$,$,$);
#10=IFCRELCONTAINEDINSPATIALSTRUCTURE('R1',$,$,$,(#3),#2);
#11=IFCRELCONTAINEDINSPATIALSTRUCTURE('R2',$,$,$,(#3,#4),#1);
ENDSEC;
END-ISO-10303-21;
"#,
        )
        .unwrap();
        let inventory = build_inventory(model.as_ref());

        let guids = |space: &str| -> Vec<String> {
            inventory[space].elements.iter().map(|e| e.guid.clone()).collect()
        };
        assert_eq!(guids("S2"), vec!["W1"]);
        assert_eq!(guids("S1"), vec!["W2"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let json = serde_json::to_value(build_inventory(model.as_ref())).unwrap();
        let hall = &json["1t$7a2Wf50tP0V7ycX1Rdh"];
        assert_eq!(hall["spaceGuid"], "1t$7a2Wf50tP0V7ycX1Rdh");
        assert_eq!(hall["spaceName"], "Hall");
        assert_eq!(hall["elements"][0]["type"], "IfcWall");
        assert!(hall["elements"][1]["name"].is_null());
    }
}
