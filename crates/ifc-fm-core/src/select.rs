// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product selection by entity type

use ifc_fm_model::{IfcModel, IfcType, Product};
use rustc_hash::FxHashSet;

/// Products whose type equals or specializes `ifc_type`
///
/// File order, one product per GUID (the first occurrence wins).
pub fn select_by_type<'m>(model: &'m dyn IfcModel, ifc_type: &IfcType) -> Vec<&'m Product> {
    let mut seen = FxHashSet::default();
    model
        .products()
        .products_of_type(ifc_type)
        .into_iter()
        .filter(|p| seen.insert(p.guid.as_str()))
        .collect()
}

/// Same as [`select_by_type`], with a case-insensitive type name
pub fn select_by_type_name<'m>(model: &'m dyn IfcModel, type_name: &str) -> Vec<&'m Product> {
    select_by_type(model, &IfcType::parse(type_name))
}

/// Every IfcSpace
pub fn spaces(model: &dyn IfcModel) -> Vec<&Product> {
    select_by_type(model, &IfcType::IfcSpace)
}

/// Every IfcElement specialization
pub fn elements(model: &dyn IfcModel) -> Vec<&Product> {
    select_by_type(model, &IfcType::IfcElement)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCSPACE('0k3L3uQ5r8Ye1gR1j9d0aA',$,'A',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#2=IFCSENSOR('1k3L3uQ5r8Ye1gR1j9d0aA',$,'T1',$,$,$,$,$,.TEMPERATURESENSOR.);
#3=IFCCONTROLLER('2k3L3uQ5r8Ye1gR1j9d0aA',$,'C1',$,$,$,$,$,$);
#4=IFCWALLSTANDARDCASE('3k3L3uQ5r8Ye1gR1j9d0aA',$,'W1',$,$,$,$,$,$);
#5=IFCSENSOR('1k3L3uQ5r8Ye1gR1j9d0aA',$,'T1 copy',$,$,$,$,$,.TEMPERATURESENSOR.);
#6=IFCDISTRIBUTIONCONTROLELEMENT('4k3L3uQ5r8Ye1gR1j9d0aA',$,'D1',$,$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
"#;

    fn guids(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.guid.as_str()).collect()
    }

    #[test]
    fn test_exact_type_deduplicated() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        assert_eq!(
            guids(select_by_type(model.as_ref(), &IfcType::IfcSensor)),
            vec!["1k3L3uQ5r8Ye1gR1j9d0aA"]
        );
    }

    #[test]
    fn test_supertype_selects_specializations() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let names: Vec<_> = select_by_type_name(model.as_ref(), "IfcDistributionControlElement")
            .into_iter()
            .filter_map(|p| p.name.as_deref())
            .collect();
        assert_eq!(names, vec!["T1", "C1", "D1"]);
    }

    #[test]
    fn test_fixed_enumerations() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        assert_eq!(spaces(model.as_ref()).len(), 1);
        // Spaces are spatial structure, not elements
        assert_eq!(elements(model.as_ref()).len(), 4);
    }

    #[test]
    fn test_no_match_is_empty() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        assert!(select_by_type_name(model.as_ref(), "IFCDOOR").is_empty());
        assert!(select_by_type_name(model.as_ref(), "IFCNOTATHING").is_empty());
    }
}
