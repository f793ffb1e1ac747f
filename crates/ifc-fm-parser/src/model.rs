// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParsedModel - Main IFC model implementation

use crate::containment::ContainmentIndex;
use crate::products::ProductTable;
use crate::resolver::ResolverImpl;
use crate::scanner::parse_header;
use crate::units::extract_unit_scale;

use ifc_fm_model::{
    ContainmentQuery, EntityResolver, IfcModel, ModelMetadata, ProductCatalog, Result,
};

/// Parsed IFC model implementing the `IfcModel` trait
///
/// Owns the document text and every index built over it, containment
/// included. Nothing in here changes after [`ParsedModel::parse`] returns.
pub struct ParsedModel {
    resolver: ResolverImpl,
    containment: ContainmentIndex,
    products: ProductTable,
    /// Unit scale (file units to metres)
    unit_scale: f64,
    metadata: ModelMetadata,
}

impl ParsedModel {
    /// Parse IFC content and create a model
    pub fn parse(content: &str) -> Result<Self> {
        let header = parse_header(content);
        let metadata = ModelMetadata {
            schema_version: header.schema_version,
            originating_system: header.originating_system,
            preprocessor_version: header.preprocessor_version,
            file_name: header.file_name,
            author: header.author,
            organization: header.organization,
            timestamp: header.timestamp,
        };

        let resolver = ResolverImpl::from_content(content.to_string())?;

        let unit_scale = extract_unit_scale(&resolver);
        let containment = ContainmentIndex::build(&resolver);

        let products = ProductTable::build(&resolver);

        log::info!(
            "Loaded {} model: {} entities, {} products, unit scale {}",
            if metadata.schema_version.is_empty() {
                "unversioned"
            } else {
                metadata.schema_version.as_str()
            },
            resolver.entity_count(),
            products.len(),
            unit_scale
        );

        Ok(Self {
            resolver,
            containment,
            products,
            unit_scale,
            metadata,
        })
    }
}

impl IfcModel for ParsedModel {
    fn resolver(&self) -> &dyn EntityResolver {
        &self.resolver
    }

    fn containment(&self) -> &dyn ContainmentQuery {
        &self.containment
    }

    fn products(&self) -> &dyn ProductCatalog {
        &self.products
    }

    fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_fm_model::{EntityId, IfcType, ParseError};

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('test.ifc','2024-01-01T00:00:00',('Author'),('Org'),'Preprocessor','App','');
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'Test Project',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
#4=IFCBUILDINGSTOREY('1YvctVUKr0kugbFTf53O9L',$,'Ground Floor',$,$,$,$,$,.ELEMENT.,0.0);
#5=IFCSPACE('2YvctVUKr0kugbFTf53O9L',$,'Room',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#6=IFCRELAGGREGATES('3YvctVUKr0kugbFTf53O9L',$,$,$,#4,(#5));
#10=IFCWALL('4YvctVUKr0kugbFTf53O9L',$,'Wall 1',$,$,$,$,$);
#11=IFCRELCONTAINEDINSPATIALSTRUCTURE('5YvctVUKr0kugbFTf53O9L',$,$,$,(#10),#5);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_parse_model() {
        let model = ParsedModel::parse(TEST_IFC).unwrap();

        assert_eq!(model.metadata().schema_version, "IFC2X3");
        assert_eq!(model.metadata().file_name.as_deref(), Some("test.ifc"));
        assert!((model.unit_scale() - 0.001).abs() < 1e-10);

        assert_eq!(model.resolver().find_by_type_name("IFCWALL").len(), 1);
        assert_eq!(model.products().len(), 3);
        assert_eq!(
            model.containment().containing_structure(EntityId(10)),
            Some(EntityId(5))
        );
        assert_eq!(
            model.containment().decomposing_parent(EntityId(5)),
            Some(EntityId(4))
        );
    }

    #[test]
    fn test_containment_edges_in_file_order() {
        let model = ParsedModel::parse(TEST_IFC).unwrap();
        let edges = model.containment().edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].relating, Some(EntityId(5)));
        assert_eq!(edges[0].related, vec![EntityId(10)]);
        assert_eq!(model.products().products_of_type(&IfcType::IfcSpace).len(), 1);
    }

    #[test]
    fn test_malformed_unicode_escape_in_name_loads() {
        let content = TEST_IFC.replace("'Wall 1'", "'\\X2\\000\u{e9}aaa\\X0\\'");
        let model = ParsedModel::parse(&content).unwrap();
        let wall = model.products().product(EntityId(10)).unwrap();
        assert_eq!(wall.name.as_deref(), Some("\\X2\\000\u{e9}aaa\\X0\\"));
    }

    #[test]
    fn test_rejects_non_step_content() {
        let err = ParsedModel::parse("{\"not\": \"ifc\"}").err();
        assert!(matches!(err, Some(ParseError::InvalidFormat(_))));
    }
}
