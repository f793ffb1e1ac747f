// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement resolution to homogeneous transforms
//!
//! Follows IfcLocalPlacement chains through `PlacementRelTo` so the result
//! maps object coordinates to world coordinates (file units).

use crate::error::{Error, Result};
use ifc_fm_model::{EntityId, EntityResolver, IfcType};
use nalgebra::{Matrix4, Point3, Vector3};

/// Chains deeper than this are treated as cyclic
const MAX_PLACEMENT_DEPTH: usize = 64;

/// Resolves placement entities against one model
pub struct PlacementResolver<'a> {
    resolver: &'a dyn EntityResolver,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(resolver: &'a dyn EntityResolver) -> Self {
        Self { resolver }
    }

    /// World transform of an ObjectPlacement
    ///
    /// IfcLocalPlacement is composed with its `PlacementRelTo` parent,
    /// recursively. Other placement kinds (grid, linear) are unsupported.
    pub fn object_placement(&self, placement_id: EntityId) -> Result<Matrix4<f64>> {
        let mut transform = Matrix4::identity();
        let mut current = Some(placement_id);
        let mut depth = 0;

        while let Some(id) = current {
            depth += 1;
            if depth > MAX_PLACEMENT_DEPTH {
                return Err(Error::geometry(format!(
                    "placement chain from {placement_id} does not terminate"
                )));
            }

            let placement = self
                .resolver
                .get(id)
                .ok_or(Error::EntityNotFound(id))?;
            if placement.ifc_type != IfcType::IfcLocalPlacement {
                return Err(Error::unsupported_type(placement.ifc_type.schema_name()));
            }

            // IFCLOCALPLACEMENT(PlacementRelTo, RelativePlacement)
            let relative = match placement.get_ref(1) {
                Some(axis_id) => self.axis_placement(axis_id)?,
                None => Matrix4::identity(),
            };
            transform = relative * transform;
            current = placement.get_ref(0);
        }

        Ok(transform)
    }

    /// Transform of an IfcAxis2Placement3D or IfcAxis2Placement2D
    pub fn axis_placement(&self, placement_id: EntityId) -> Result<Matrix4<f64>> {
        let placement = self
            .resolver
            .get(placement_id)
            .ok_or(Error::EntityNotFound(placement_id))?;

        // IFCAXIS2PLACEMENT3D(Location, Axis, RefDirection)
        // IFCAXIS2PLACEMENT2D(Location, RefDirection)
        let (axis, ref_dir) = match placement.ifc_type {
            IfcType::IfcAxis2Placement3D => (
                placement.get_ref(1).and_then(|id| self.direction(id)),
                placement.get_ref(2).and_then(|id| self.direction(id)),
            ),
            IfcType::IfcAxis2Placement2D => {
                (None, placement.get_ref(1).and_then(|id| self.direction(id)))
            }
            _ => return Err(Error::unsupported_type(placement.ifc_type.schema_name())),
        };

        let location = placement
            .get_ref(0)
            .and_then(|id| self.cartesian_point(id))
            .ok_or_else(|| Error::invalid_attribute(placement_id, 0, "missing Location"))?;

        Ok(basis(
            location,
            axis.unwrap_or_else(Vector3::z),
            ref_dir.unwrap_or_else(Vector3::x),
        ))
    }

    /// Transform of an IfcCartesianTransformationOperator3D (or non-uniform)
    ///
    /// IFCCARTESIANTRANSFORMATIONOPERATOR3D(Axis1, Axis2, LocalOrigin, Scale, Axis3)
    /// adding (Scale2, Scale3) for the non-uniform variant.
    pub fn transformation_operator(&self, op_id: EntityId) -> Result<Matrix4<f64>> {
        let op = self.resolver.get(op_id).ok_or(Error::EntityNotFound(op_id))?;

        if !matches!(
            op.ifc_type,
            IfcType::IfcCartesianTransformationOperator3D
                | IfcType::IfcCartesianTransformationOperator3DnonUniform
        ) {
            return Err(Error::unsupported_type(op.ifc_type.schema_name()));
        }

        let origin = op
            .get_ref(2)
            .and_then(|id| self.cartesian_point(id))
            .ok_or_else(|| Error::invalid_attribute(op_id, 2, "missing LocalOrigin"))?;

        let x_axis = op.get_ref(0).and_then(|id| self.direction(id));
        let z_axis = op.get_ref(4).and_then(|id| self.direction(id));

        let scale = op.get_float(3).unwrap_or(1.0);
        let (sy, sz) = if op.ifc_type == IfcType::IfcCartesianTransformationOperator3DnonUniform {
            (
                op.get_float(5).unwrap_or(scale),
                op.get_float(6).unwrap_or(scale),
            )
        } else {
            (scale, scale)
        };

        let rotation = basis(
            origin,
            z_axis.unwrap_or_else(Vector3::z),
            x_axis.unwrap_or_else(Vector3::x),
        );
        let scaling = Matrix4::new_nonuniform_scaling(&Vector3::new(scale, sy, sz));

        Ok(rotation * scaling)
    }

    /// Coordinates of an IfcCartesianPoint (missing components are 0)
    pub fn cartesian_point(&self, point_id: EntityId) -> Option<Point3<f64>> {
        let point = self.resolver.get(point_id)?;

        if point.ifc_type != IfcType::IfcCartesianPoint {
            return None;
        }

        let coords = point.get_list(0)?;

        let x = coords.first().and_then(|v| v.as_float()).unwrap_or(0.0);
        let y = coords.get(1).and_then(|v| v.as_float()).unwrap_or(0.0);
        let z = coords.get(2).and_then(|v| v.as_float()).unwrap_or(0.0);

        Some(Point3::new(x, y, z))
    }

    /// Direction ratios of an IfcDirection (2D directions get z = 0)
    pub fn direction(&self, dir_id: EntityId) -> Option<Vector3<f64>> {
        let direction = self.resolver.get(dir_id)?;

        if direction.ifc_type != IfcType::IfcDirection {
            return None;
        }

        let ratios = direction.get_list(0)?;

        let x = ratios.first().and_then(|v| v.as_float()).unwrap_or(0.0);
        let y = ratios.get(1).and_then(|v| v.as_float()).unwrap_or(0.0);
        let z = ratios.get(2).and_then(|v| v.as_float()).unwrap_or(0.0);

        let v = Vector3::new(x, y, z);
        (v.norm() > f64::EPSILON).then_some(v)
    }
}

/// Right-handed orthonormal frame from a Z axis and an approximate X axis
fn basis(location: Point3<f64>, axis: Vector3<f64>, ref_dir: Vector3<f64>) -> Matrix4<f64> {
    let z = axis.normalize();
    // Project RefDirection onto the plane normal to Z
    let mut x = ref_dir - z * ref_dir.dot(&z);
    if x.norm() < 1e-12 {
        x = if z.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
        x -= z * x.dot(&z);
    }
    let x = x.normalize();
    let y = z.cross(&x);

    Matrix4::new(
        x.x, y.x, z.x, location.x, //
        x.y, y.y, z.y, location.y, //
        x.z, y.z, z.z, location.z, //
        0.0, 0.0, 0.0, 1.0,
    )
}
