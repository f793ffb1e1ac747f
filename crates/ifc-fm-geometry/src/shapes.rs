// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-volume centroids of products
//!
//! The centroid of a product is the centre of the axis-aligned box around
//! its body representation in object coordinates, carried through the full
//! placement chain and scaled to metres.

use crate::bounds::{Aabb, BoundsCollector};
use crate::error::{Error, Result};
use crate::placement::PlacementResolver;
use ifc_fm_model::{EntityId, IfcModel, Product};
use nalgebra::{Matrix4, Point3};
use std::iter::FusedIterator;

/// Representation identifiers that describe the physical body
const BODY_IDENTIFIERS: &[&str] = &["Body", "Facetation"];

/// A product whose geometry produced a centroid
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedShape {
    pub id: EntityId,
    pub guid: String,
    pub name: Option<String>,
    /// Bounds in object coordinates, file units
    pub local_bounds: Aabb,
    /// World coordinates in metres
    pub centroid: Point3<f64>,
}

/// Resolve the bounding-volume centroid of one product
pub fn shape_centroid(model: &dyn IfcModel, product: &Product) -> Result<ResolvedShape> {
    let resolver = model.resolver();

    let rep_id = product
        .representation
        .ok_or(Error::NoRepresentation(product.id))?;
    let definition = resolver.get(rep_id).ok_or(Error::EntityNotFound(rep_id))?;

    // IFCPRODUCTDEFINITIONSHAPE(Name, Description, Representations)
    let shape_reps = definition
        .get(2)
        .map(|reps| resolver.resolve_ref_list(reps))
        .unwrap_or_default();
    if shape_reps.is_empty() {
        return Err(Error::NoRepresentation(product.id));
    }

    let collector = BoundsCollector::new(resolver);

    let mut bounds = Aabb::empty();
    for rep in &shape_reps {
        // IFCSHAPEREPRESENTATION(ContextOfItems, RepresentationIdentifier, ...)
        match rep.get_string(1) {
            Some(id) if !BODY_IDENTIFIERS.contains(&id) => continue,
            _ => bounds.merge(&collector.shape_representation(rep)),
        }
    }

    // A bounding box representation is the next best thing
    if bounds.is_empty() {
        for rep in shape_reps.iter().filter(|r| r.get_string(1) == Some("Box")) {
            bounds.merge(&collector.shape_representation(rep));
        }
    }

    let local = bounds.centroid().ok_or(Error::EmptyBounds(product.id))?;

    let world = match product.object_placement {
        Some(placement) => PlacementResolver::new(resolver).object_placement(placement)?,
        None => Matrix4::identity(),
    };
    let centroid = Point3::from(world.transform_point(&local).coords * model.unit_scale());

    if !(centroid.x.is_finite() && centroid.y.is_finite() && centroid.z.is_finite()) {
        return Err(Error::geometry(format!(
            "{} has a non-finite centroid",
            product.id
        )));
    }

    Ok(ResolvedShape {
        id: product.id,
        guid: product.guid.clone(),
        name: product.name.clone(),
        local_bounds: bounds,
        centroid,
    })
}

/// Finite iterator over the shapes of a fixed list of products
///
/// Owns its input and is consumed by value; it cannot be rewound. Products
/// whose geometry cannot be resolved are skipped with a warning.
pub struct ShapeIterator<'m> {
    model: &'m dyn IfcModel,
    pending: std::vec::IntoIter<Product>,
    skipped: usize,
}

impl<'m> ShapeIterator<'m> {
    pub fn new(model: &'m dyn IfcModel, products: Vec<Product>) -> Self {
        Self {
            model,
            pending: products.into_iter(),
            skipped: 0,
        }
    }

    /// Products skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for ShapeIterator<'_> {
    type Item = ResolvedShape;

    fn next(&mut self) -> Option<ResolvedShape> {
        for product in self.pending.by_ref() {
            match shape_centroid(self.model, &product) {
                Ok(shape) => return Some(shape),
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("Skipping {} ({}): {}", product.guid, product.id, e);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.pending.len()))
    }
}

impl FusedIterator for ShapeIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ifc_fm_model::{IfcType, ProductCatalog};

    // Millimetre model: a 4000 x 3000 x 2500 room placed at (10000, 20000, 3000)
    // on a storey raised by 500
    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
#10=IFCCARTESIANPOINT((0.,0.,500.));
#11=IFCAXIS2PLACEMENT3D(#10,$,$);
#12=IFCLOCALPLACEMENT($,#11);
#20=IFCCARTESIANPOINT((10000.,20000.,3000.));
#21=IFCAXIS2PLACEMENT3D(#20,$,$);
#22=IFCLOCALPLACEMENT(#12,#21);
#30=IFCCARTESIANPOINT((2000.,1500.));
#31=IFCAXIS2PLACEMENT2D(#30,$);
#32=IFCRECTANGLEPROFILEDEF(.AREA.,$,#31,4000.,3000.);
#33=IFCCARTESIANPOINT((0.,0.,0.));
#34=IFCAXIS2PLACEMENT3D(#33,$,$);
#35=IFCDIRECTION((0.,0.,1.));
#36=IFCEXTRUDEDAREASOLID(#32,#34,#35,2500.);
#37=IFCSHAPEREPRESENTATION($,'Body','SweptSolid',(#36));
#38=IFCSHAPEREPRESENTATION($,'FootPrint','Curve2D',(#99));
#39=IFCPRODUCTDEFINITIONSHAPE($,$,(#38,#37));
#40=IFCSPACE('1YvctVUKr0kugbFTf53O9L',$,'Office',$,$,#22,#39,$,.ELEMENT.,.INTERNAL.,$);
#41=IFCSPACE('2YvctVUKr0kugbFTf53O9L',$,'Void',$,$,#22,$,$,.ELEMENT.,.INTERNAL.,$);
#50=IFCBOUNDINGBOX(#33,1000.,1000.,1000.);
#51=IFCSHAPEREPRESENTATION($,'Box','BoundingBox',(#50));
#52=IFCPRODUCTDEFINITIONSHAPE($,$,(#51));
#53=IFCSPACE('3YvctVUKr0kugbFTf53O9L',$,'Boxed',$,$,$,#52,$,.ELEMENT.,.INTERNAL.,$);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_extruded_space_centroid_in_metres() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let office = model.products().by_guid("1YvctVUKr0kugbFTf53O9L").unwrap();

        let shape = shape_centroid(model.as_ref(), office).unwrap();
        assert_relative_eq!(shape.centroid, Point3::new(12.0, 21.5, 4.75), epsilon = 1e-9);
        assert_relative_eq!(shape.local_bounds.max, Point3::new(4000.0, 3000.0, 2500.0));
    }

    #[test]
    fn test_box_representation_fallback() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let boxed = model.products().by_guid("3YvctVUKr0kugbFTf53O9L").unwrap();

        let shape = shape_centroid(model.as_ref(), boxed).unwrap();
        assert_relative_eq!(shape.centroid, Point3::new(0.5, 0.5, 0.5), epsilon = 1e-9);
    }

    #[test]
    fn test_iterator_skips_spaces_without_geometry() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let spaces: Vec<Product> = model
            .products()
            .products_of_type(&IfcType::IfcSpace)
            .into_iter()
            .cloned()
            .collect();

        let mut shapes = ShapeIterator::new(model.as_ref(), spaces);
        let names: Vec<_> = shapes.by_ref().map(|s| s.name.unwrap_or_default()).collect();
        assert_eq!(names, vec!["Office", "Boxed"]);
        assert_eq!(shapes.skipped(), 1);
        assert!(shapes.next().is_none());
    }
}
