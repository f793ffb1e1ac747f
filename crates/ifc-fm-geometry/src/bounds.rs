// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounds of representation items
//!
//! Items are never meshed. Each supported item contributes the points that
//! bound it (profile corners at both ends of an extrusion, loop vertices of
//! a brep, the coordinate list of a face set), already transformed into the
//! object coordinate system of the product.

use crate::error::{Error, Result};
use crate::placement::PlacementResolver;
use ifc_fm_model::{AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcType};
use nalgebra::{Matrix4, Point2, Point3, Vector3};
use rustc_hash::FxHashSet;

/// Boolean operands and mapped items nested deeper than this are rejected
const MAX_NESTING_DEPTH: usize = 16;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Box containing nothing; the first `extend` defines it
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to include `p`; non-finite points are ignored
    pub fn extend(&mut self, p: Point3<f64>) {
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return;
        }
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
    }

    pub fn merge(&mut self, other: &Aabb) {
        if !other.is_empty() {
            self.extend(other.min);
            self.extend(other.max);
        }
    }

    /// Centre of the box, `None` when empty
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.is_empty() {
            return None;
        }
        Some(nalgebra::center(&self.min, &self.max))
    }

    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }
}

/// Collects bounding points of representation items
pub struct BoundsCollector<'a> {
    resolver: &'a dyn EntityResolver,
    placements: PlacementResolver<'a>,
}

impl<'a> BoundsCollector<'a> {
    pub fn new(resolver: &'a dyn EntityResolver) -> Self {
        Self {
            resolver,
            placements: PlacementResolver::new(resolver),
        }
    }

    /// Bounds of every item of an IfcShapeRepresentation
    ///
    /// Items that cannot be bounded are skipped and logged.
    pub fn shape_representation(&self, shape_rep: &DecodedEntity) -> Aabb {
        let mut bounds = Aabb::empty();
        self.collect_representation(shape_rep, &Matrix4::identity(), &mut bounds, 0);
        bounds
    }

    /// Bounds of a single representation item in the given frame
    pub fn item(&self, item_id: EntityId, transform: &Matrix4<f64>) -> Result<Aabb> {
        let mut bounds = Aabb::empty();
        self.collect_item(item_id, transform, &mut bounds, 0)?;
        Ok(bounds)
    }

    fn collect_representation(
        &self,
        shape_rep: &DecodedEntity,
        transform: &Matrix4<f64>,
        bounds: &mut Aabb,
        depth: usize,
    ) {
        // IFCSHAPEREPRESENTATION(ContextOfItems, RepresentationIdentifier, RepresentationType, Items)
        for item_id in shape_rep.get_refs(3).unwrap_or_default() {
            if let Err(e) = self.collect_item(item_id, transform, bounds, depth) {
                log::debug!("Skipping item {} of {}: {}", item_id, shape_rep.id, e);
            }
        }
    }

    fn collect_item(
        &self,
        item_id: EntityId,
        transform: &Matrix4<f64>,
        bounds: &mut Aabb,
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::geometry(format!("{item_id} is nested too deeply")));
        }

        let item = self
            .resolver
            .get(item_id)
            .ok_or(Error::EntityNotFound(item_id))?;

        match item.ifc_type {
            IfcType::IfcExtrudedAreaSolid => self.extruded_area_solid(&item, transform, bounds),
            IfcType::IfcFacetedBrep | IfcType::IfcFacetedBrepWithVoids => {
                self.faceted_brep(&item, transform, bounds)
            }
            IfcType::IfcTriangulatedFaceSet | IfcType::IfcPolygonalFaceSet => {
                // Coordinates (index 0) -> IfcCartesianPointList3D.CoordList
                let coords = item
                    .get_ref(0)
                    .and_then(|id| self.resolver.get(id))
                    .ok_or_else(|| Error::invalid_attribute(item_id, 0, "missing Coordinates"))?;
                for p in point_list(coords.get(0)) {
                    bounds.extend(transform.transform_point(&p));
                }
                Ok(())
            }
            IfcType::IfcBooleanResult | IfcType::IfcBooleanClippingResult => {
                // IFCBOOLEANRESULT(Operator, FirstOperand, SecondOperand)
                let first = item
                    .get_ref(1)
                    .ok_or_else(|| Error::invalid_attribute(item_id, 1, "missing FirstOperand"))?;
                self.collect_item(first, transform, bounds, depth + 1)
            }
            IfcType::IfcMappedItem => self.mapped_item(&item, transform, bounds, depth),
            IfcType::IfcBoundingBox => {
                // IFCBOUNDINGBOX(Corner, XDim, YDim, ZDim)
                let corner = item
                    .get_ref(0)
                    .and_then(|id| self.placements.cartesian_point(id))
                    .ok_or_else(|| Error::invalid_attribute(item_id, 0, "missing Corner"))?;
                let size = Vector3::new(
                    item.get_float(1).unwrap_or(0.0),
                    item.get_float(2).unwrap_or(0.0),
                    item.get_float(3).unwrap_or(0.0),
                );
                bounds.extend(transform.transform_point(&corner));
                bounds.extend(transform.transform_point(&(corner + size)));
                Ok(())
            }
            _ => Err(Error::unsupported_type(item.ifc_type.schema_name())),
        }
    }

    /// IFCEXTRUDEDAREASOLID(SweptArea, Position, ExtrudedDirection, Depth)
    fn extruded_area_solid(
        &self,
        item: &DecodedEntity,
        transform: &Matrix4<f64>,
        bounds: &mut Aabb,
    ) -> Result<()> {
        let profile_id = item
            .get_ref(0)
            .ok_or_else(|| Error::invalid_attribute(item.id, 0, "missing SweptArea"))?;
        let outline = self.profile_outline(profile_id)?;

        let position = match item.get_ref(1) {
            Some(id) => self.placements.axis_placement(id)?,
            None => Matrix4::identity(),
        };
        let direction = item
            .get_ref(2)
            .and_then(|id| self.placements.direction(id))
            .map(|d| d.normalize())
            .unwrap_or_else(Vector3::z);
        let depth = item
            .get_float(3)
            .ok_or_else(|| Error::invalid_attribute(item.id, 3, "missing Depth"))?;

        let frame = transform * position;
        let offset = direction * depth;
        for p in outline {
            let base = Point3::new(p.x, p.y, 0.0);
            bounds.extend(frame.transform_point(&base));
            bounds.extend(frame.transform_point(&(base + offset)));
        }
        Ok(())
    }

    /// Outline points of a profile definition, in the profile's own frame
    fn profile_outline(&self, profile_id: EntityId) -> Result<Vec<Point2<f64>>> {
        let profile = self
            .resolver
            .get(profile_id)
            .ok_or(Error::EntityNotFound(profile_id))?;

        match profile.ifc_type {
            // IFCRECTANGLEPROFILEDEF(ProfileType, ProfileName, Position, XDim, YDim)
            IfcType::IfcRectangleProfileDef | IfcType::IfcRectangleHollowProfileDef => {
                let (hx, hy) = match (profile.get_float(3), profile.get_float(4)) {
                    (Some(x), Some(y)) => (x / 2.0, y / 2.0),
                    _ => return Err(Error::profile(format!("{profile_id} has no dimensions"))),
                };
                let corners = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];
                self.place_profile_points(&profile, corners.iter().map(|&(x, y)| Point2::new(x, y)))
            }
            // IFCCIRCLEPROFILEDEF(ProfileType, ProfileName, Position, Radius)
            IfcType::IfcCircleProfileDef | IfcType::IfcCircleHollowProfileDef => {
                let r = profile
                    .get_float(3)
                    .ok_or_else(|| Error::profile(format!("{profile_id} has no radius")))?;
                let corners = [(-r, -r), (r, -r), (r, r), (-r, r)];
                self.place_profile_points(&profile, corners.iter().map(|&(x, y)| Point2::new(x, y)))
            }
            // IFCARBITRARYCLOSEDPROFILEDEF(ProfileType, ProfileName, OuterCurve)
            IfcType::IfcArbitraryClosedProfileDef | IfcType::IfcArbitraryProfileDefWithVoids => {
                let curve = profile
                    .get_ref(2)
                    .ok_or_else(|| Error::profile(format!("{profile_id} has no OuterCurve")))?;
                self.curve_points(curve)
            }
            _ => Err(Error::unsupported_type(profile.ifc_type.schema_name())),
        }
    }

    /// Apply a parameterized profile's optional Position (index 2)
    fn place_profile_points(
        &self,
        profile: &DecodedEntity,
        points: impl Iterator<Item = Point2<f64>>,
    ) -> Result<Vec<Point2<f64>>> {
        let position = match profile.get_ref(2) {
            Some(id) => self.placements.axis_placement(id)?,
            None => Matrix4::identity(),
        };
        Ok(points
            .map(|p| {
                let placed = position.transform_point(&Point3::new(p.x, p.y, 0.0));
                Point2::new(placed.x, placed.y)
            })
            .collect())
    }

    /// Vertices of an IfcPolyline or IfcIndexedPolyCurve
    fn curve_points(&self, curve_id: EntityId) -> Result<Vec<Point2<f64>>> {
        let curve = self
            .resolver
            .get(curve_id)
            .ok_or(Error::EntityNotFound(curve_id))?;

        let points: Vec<Point2<f64>> = match curve.ifc_type {
            // IFCPOLYLINE(Points)
            IfcType::IfcPolyline => curve
                .get_refs(0)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| self.placements.cartesian_point(id))
                .map(|p| Point2::new(p.x, p.y))
                .collect(),
            // IFCINDEXEDPOLYCURVE(Points, Segments, SelfIntersect) -> IfcCartesianPointList2D
            IfcType::IfcIndexedPolyCurve => {
                let list = curve
                    .get_ref(0)
                    .and_then(|id| self.resolver.get(id))
                    .ok_or_else(|| Error::invalid_attribute(curve_id, 0, "missing Points"))?;
                point_list(list.get(0))
                    .map(|p| Point2::new(p.x, p.y))
                    .collect()
            }
            _ => return Err(Error::unsupported_type(curve.ifc_type.schema_name())),
        };

        if points.is_empty() {
            return Err(Error::profile(format!("{curve_id} has no points")));
        }
        Ok(points)
    }

    /// IFCFACETEDBREP(Outer) -> IfcClosedShell(CfsFaces) -> IfcFace(Bounds)
    /// -> IfcFaceBound(Bound, Orientation) -> IfcPolyLoop(Polygon)
    fn faceted_brep(
        &self,
        item: &DecodedEntity,
        transform: &Matrix4<f64>,
        bounds: &mut Aabb,
    ) -> Result<()> {
        let shell = item
            .get_ref(0)
            .and_then(|id| self.resolver.get(id))
            .ok_or_else(|| Error::invalid_attribute(item.id, 0, "missing Outer shell"))?;

        let mut seen = FxHashSet::default();
        for face in self.resolver.resolve_ref_list(shell.get(0).unwrap_or(&AttributeValue::Null)) {
            for bound in self.resolver.resolve_ref_list(face.get(0).unwrap_or(&AttributeValue::Null)) {
                let Some(loop_id) = bound.get_ref(0) else {
                    continue;
                };
                let Some(poly_loop) = self.resolver.get(loop_id) else {
                    continue;
                };
                for point_id in poly_loop.get_refs(0).unwrap_or_default() {
                    // Shared vertices are referenced by many loops
                    if !seen.insert(point_id) {
                        continue;
                    }
                    if let Some(p) = self.placements.cartesian_point(point_id) {
                        bounds.extend(transform.transform_point(&p));
                    }
                }
            }
        }
        Ok(())
    }

    /// IFCMAPPEDITEM(MappingSource, MappingTarget)
    /// -> IFCREPRESENTATIONMAP(MappingOrigin, MappedRepresentation)
    fn mapped_item(
        &self,
        item: &DecodedEntity,
        transform: &Matrix4<f64>,
        bounds: &mut Aabb,
        depth: usize,
    ) -> Result<()> {
        let source = item
            .get_ref(0)
            .and_then(|id| self.resolver.get(id))
            .ok_or_else(|| Error::invalid_attribute(item.id, 0, "missing MappingSource"))?;

        let origin = match source.get_ref(0) {
            Some(id) => self.placements.axis_placement(id)?,
            None => Matrix4::identity(),
        };
        let target = match item.get_ref(1) {
            Some(id) => self.placements.transformation_operator(id)?,
            None => Matrix4::identity(),
        };

        let mapped = source
            .get_ref(1)
            .and_then(|id| self.resolver.get(id))
            .ok_or_else(|| Error::invalid_attribute(source.id, 1, "missing MappedRepresentation"))?;

        let frame = transform * target * origin;
        self.collect_representation(&mapped, &frame, bounds, depth + 1);
        Ok(())
    }
}

/// Points of a CoordList attribute (list of 2D or 3D coordinate tuples)
fn point_list(attr: Option<&AttributeValue>) -> impl Iterator<Item = Point3<f64>> + '_ {
    attr.and_then(AttributeValue::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(|tuple| {
            let coords = tuple.as_list()?;
            let x = coords.first()?.as_float()?;
            let y = coords.get(1)?.as_float()?;
            let z = coords.get(2).and_then(|v| v.as_float()).unwrap_or(0.0);
            Some(Point3::new(x, y, z))
        })
}
