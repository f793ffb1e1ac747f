// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length unit scale extraction
//!
//! Only the offline generator converts to metres; sensor coordinates are
//! reported in file units.

use ifc_fm_model::{AttributeValue, DecodedEntity, EntityResolver, IfcType};

/// Length unit of the first IfcProject, as a factor to metres
///
/// Returns 1.0 if no length unit is declared.
pub fn extract_unit_scale(resolver: &dyn EntityResolver) -> f64 {
    let Some(project) = resolver.entities_by_type(&IfcType::IfcProject).into_iter().next() else {
        return 1.0;
    };

    // IfcProject.UnitsInContext -> IfcUnitAssignment.Units
    let units = project
        .get_ref(8)
        .and_then(|id| resolver.get(id))
        .filter(|assignment| assignment.ifc_type == IfcType::IfcUnitAssignment)
        .and_then(|assignment| assignment.get_refs(0))
        .unwrap_or_default();

    units
        .into_iter()
        .filter_map(|id| resolver.get(id))
        .find_map(|unit| length_unit_scale(&unit, resolver, 0))
        .unwrap_or(1.0)
}

/// Scale of an IfcSIUnit or IfcConversionBasedUnit, if it is a length unit
fn length_unit_scale(unit: &DecodedEntity, resolver: &dyn EntityResolver, depth: u8) -> Option<f64> {
    if unit.get_enum(1)? != "LENGTHUNIT" {
        return None;
    }

    match unit.ifc_type {
        // IFCSIUNIT(*, UnitType, Prefix, Name)
        IfcType::IfcSIUnit => {
            if unit.get_enum(3)? != "METRE" {
                return None;
            }
            Some(unit.get_enum(2).map_or(1.0, si_prefix))
        }
        // IFCCONVERSIONBASEDUNIT(Dimensions, UnitType, Name, ConversionFactor)
        IfcType::IfcConversionBasedUnit if depth < 4 => {
            let factor = resolver.get(unit.get_ref(3)?)?;
            if factor.ifc_type != IfcType::IfcMeasureWithUnit {
                return None;
            }
            let value = measure_value(factor.get(0)?)?;
            let base = factor
                .get_ref(1)
                .and_then(|id| resolver.get(id))
                .and_then(|base| length_unit_scale(&base, resolver, depth + 1))
                .unwrap_or(1.0);
            Some(value * base)
        }
        _ => None,
    }
}

fn si_prefix(prefix: &str) -> f64 {
    match prefix {
        "EXA" => 1e18,
        "PETA" => 1e15,
        "TERA" => 1e12,
        "GIGA" => 1e9,
        "MEGA" => 1e6,
        "KILO" => 1e3,
        "HECTO" => 1e2,
        "DECA" => 1e1,
        "DECI" => 1e-1,
        "CENTI" => 1e-2,
        "MILLI" => 1e-3,
        "MICRO" => 1e-6,
        "NANO" => 1e-9,
        "PICO" => 1e-12,
        "FEMTO" => 1e-15,
        "ATTO" => 1e-18,
        _ => 1.0,
    }
}

fn measure_value(attr: &AttributeValue) -> Option<f64> {
    match attr {
        AttributeValue::Float(f) => Some(*f),
        AttributeValue::Integer(i) => Some(*i as f64),
        AttributeValue::TypedValue(_, args) => args.first().and_then(measure_value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverImpl;

    fn scale_of(data: &str) -> f64 {
        let content = format!("ISO-10303-21;\nHEADER;\nENDSEC;\nDATA;\n{data}\nENDSEC;\n");
        let resolver = ResolverImpl::from_content(content).unwrap();
        extract_unit_scale(&resolver)
    }

    #[test]
    fn test_millimetres() {
        let scale = scale_of(
            "#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,#2);\n\
             #2=IFCUNITASSIGNMENT((#4,#3));\n\
             #3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);\n\
             #4=IFCSIUNIT(*,.AREAUNIT.,$,.SQUARE_METRE.);",
        );
        assert!((scale - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_feet() {
        let scale = scale_of(
            "#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,#2);\n\
             #2=IFCUNITASSIGNMENT((#3));\n\
             #3=IFCCONVERSIONBASEDUNIT(#5,.LENGTHUNIT.,'FOOT',#4);\n\
             #4=IFCMEASUREWITHUNIT(IFCLENGTHMEASURE(0.3048),#6);\n\
             #5=IFCDIMENSIONALEXPONENTS(1,0,0,0,0,0,0);\n\
             #6=IFCSIUNIT(*,.LENGTHUNIT.,$,.METRE.);",
        );
        assert!((scale - 0.3048).abs() < 1e-12);
    }

    #[test]
    fn test_defaults_to_metres() {
        assert_eq!(scale_of("#1=IFCWALL('0YvctVUKr0kugbFTf53O9L',$,$,$,$,$,$,$);"), 1.0);
        assert_eq!(scale_of("#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,$);"), 1.0);
    }
}
