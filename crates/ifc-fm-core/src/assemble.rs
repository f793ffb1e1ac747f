// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor and inventory results for a loaded model
//!
//! [`process`] chains the schema normalizer, the selector, the spatial
//! resolver and the placement extractor into one keyed sensor map.

use crate::container::{resolve_container, ContainerPolicy};
use crate::error::{ExtractError, Result};
use crate::inventory::{build_inventory, Inventory};
use crate::placement::extract_location;
use crate::schema;
use crate::select::select_by_type;
use ifc_fm_model::{IfcModel, Product};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for [`process`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Which containers count as the sensor's space. The default,
    /// [`ContainerPolicy::AnySpatial`], may yield a storey or building.
    pub container_policy: ContainerPolicy,
    /// Abort on the first sensor without a usable placement
    pub strict_placement: bool,
}

impl ExtractOptions {
    pub fn with_policy(mut self, policy: ContainerPolicy) -> Self {
        self.container_policy = policy;
        self
    }

    pub fn with_strict_placement(mut self, strict: bool) -> Self {
        self.strict_placement = strict;
        self
    }
}

/// One located sensor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub name: String,
    pub guid: String,
    /// GUID of the containing spatial structure
    ///
    /// Only guaranteed to be an IfcSpace under [`ContainerPolicy::SpaceOnly`];
    /// otherwise it is the nearest container of any kind, which may be a
    /// storey, building or site.
    pub space: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A sensor left out of the result, and why
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorFailure {
    pub guid: String,
    pub reason: String,
}

/// Output of [`process`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    /// Sensor GUID -> record
    pub sensors: BTreeMap<String, SensorRecord>,
    pub failures: Vec<SensorFailure>,
}

/// Locate every sensor of the model
pub fn process(model: &dyn IfcModel, options: &ExtractOptions) -> Result<SensorReport> {
    let sensor_type = schema::sensor_type(model)?;
    let candidates = select_by_type(model, &sensor_type);

    let mut report = SensorReport::default();

    for sensor in candidates {
        let location = match extract_location(sensor) {
            Ok(location) => location,
            Err(e) if options.strict_placement => return Err(e),
            Err(e) => {
                log::warn!("{e}");
                report.failures.push(failure(sensor, e));
                continue;
            }
        };

        let container = resolve_container(model, sensor, options.container_policy);

        report.sensors.insert(
            sensor.guid.clone(),
            SensorRecord {
                name: sensor_name(container, sensor),
                guid: sensor.guid.clone(),
                space: container.map(|c| c.guid.clone()),
                x: location.x,
                y: location.y,
                z: location.z,
            },
        );
    }

    log::info!(
        "Located {} {} sensors, {} failed",
        report.sensors.len(),
        sensor_type.schema_name(),
        report.failures.len()
    );

    Ok(report)
}

/// Elements per space, see [`build_inventory`]
pub fn inventory(model: &dyn IfcModel) -> Inventory {
    build_inventory(model)
}

/// Display name of a sensor
///
/// `"<container> - <sensor>"` when both names exist, otherwise whichever
/// name exists, otherwise the sensor GUID.
pub fn sensor_name(container: Option<&Product>, sensor: &Product) -> String {
    let container_name = container.and_then(|c| c.name.as_deref());
    match (container_name, sensor.name.as_deref()) {
        (Some(space), Some(name)) => format!("{space} - {name}"),
        (None, Some(name)) => name.to_string(),
        (Some(space), None) => space.to_string(),
        (None, None) => sensor.guid.clone(),
    }
}

fn failure(sensor: &Product, error: ExtractError) -> SensorFailure {
    let reason = match error {
        ExtractError::UnresolvablePlacement { reason, .. } => reason,
        other => other.to_string(),
    };
    SensorFailure {
        guid: sensor.guid.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_fm_model::{EntityId, IfcType, PlacementSlot};

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCBUILDINGSTOREY('0s$7a2Wf50tP0V7ycX1Rdh',$,'Level 1',$,$,$,$,$,.ELEMENT.,0.);
#2=IFCSPACE('1s$7a2Wf50tP0V7ycX1Rdh',$,'Lab',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#10=IFCCARTESIANPOINT((1.,2.,3.));
#11=IFCAXIS2PLACEMENT3D(#10,$,$);
#12=IFCLOCALPLACEMENT($,#11);
#13=IFCCARTESIANPOINT((4.,5.));
#14=IFCAXIS2PLACEMENT3D(#13,$,$);
#15=IFCLOCALPLACEMENT($,#14);
#20=IFCSENSOR('2s$7a2Wf50tP0V7ycX1Rdh',$,'CO2',$,$,#12,$,$,.CO2SENSOR.);
#21=IFCSENSOR('3s$7a2Wf50tP0V7ycX1Rdh',$,'Flat',$,$,#15,$,$,.CO2SENSOR.);
#22=IFCSENSOR('4s$7a2Wf50tP0V7ycX1Rdh',$,'Hall',$,$,#12,$,$,.TEMPERATURESENSOR.);
#30=IFCRELCONTAINEDINSPATIALSTRUCTURE('5s$7a2Wf50tP0V7ycX1Rdh',$,$,$,(#20,#21),#2);
#31=IFCRELCONTAINEDINSPATIALSTRUCTURE('6s$7a2Wf50tP0V7ycX1Rdh',$,$,$,(#22),#1);
ENDSEC;
END-ISO-10303-21;
"#;

    fn product(guid: &str, name: Option<&str>) -> Product {
        Product {
            id: EntityId(1),
            guid: guid.to_string(),
            ifc_type: IfcType::IfcSpace,
            name: name.map(str::to_string),
            object_placement: None,
            representation: None,
            placement: PlacementSlot::Absent,
        }
    }

    #[test]
    fn test_sensor_name_fallbacks() {
        let room = product("R", Some("Room A"));
        let unnamed_room = product("U", None);
        let sensor = product("S", Some("T1"));
        let anonymous = product("A", None);

        assert_eq!(sensor_name(Some(&room), &sensor), "Room A - T1");
        assert_eq!(sensor_name(Some(&unnamed_room), &sensor), "T1");
        assert_eq!(sensor_name(None, &sensor), "T1");
        assert_eq!(sensor_name(Some(&room), &anonymous), "Room A");
        assert_eq!(sensor_name(None, &anonymous), "A");
    }

    #[test]
    fn test_failures_do_not_suppress_other_sensors() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let report = process(model.as_ref(), &ExtractOptions::default()).unwrap();

        assert_eq!(report.sensors.len(), 2);
        let co2 = &report.sensors["2s$7a2Wf50tP0V7ycX1Rdh"];
        assert_eq!(co2.name, "Lab - CO2");
        assert_eq!(co2.space.as_deref(), Some("1s$7a2Wf50tP0V7ycX1Rdh"));
        assert_eq!((co2.x, co2.y, co2.z), (1.0, 2.0, 3.0));

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].guid, "3s$7a2Wf50tP0V7ycX1Rdh");
    }

    #[test]
    fn test_strict_placement_aborts() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let options = ExtractOptions::default().with_strict_placement(true);
        assert!(matches!(
            process(model.as_ref(), &options),
            Err(ExtractError::UnresolvablePlacement { .. })
        ));
    }

    #[test]
    fn test_space_only_policy() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();

        let any = process(model.as_ref(), &ExtractOptions::default()).unwrap();
        let hall = &any.sensors["4s$7a2Wf50tP0V7ycX1Rdh"];
        assert_eq!(hall.space.as_deref(), Some("0s$7a2Wf50tP0V7ycX1Rdh"));
        assert_eq!(hall.name, "Level 1 - Hall");

        let options = ExtractOptions::default().with_policy(ContainerPolicy::SpaceOnly);
        let spaces_only = process(model.as_ref(), &options).unwrap();
        let hall = &spaces_only.sensors["4s$7a2Wf50tP0V7ycX1Rdh"];
        assert_eq!(hall.space, None);
        assert_eq!(hall.name, "Hall");
    }
}
