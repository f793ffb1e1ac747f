// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema generation detection

use crate::error::{ExtractError, Result};
use ifc_fm_model::{IfcModel, IfcType};
use std::fmt;

/// Schema generations that disagree on how sensors are typed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemaFamily {
    /// IFC2X, IFC2X2, IFC2X3 and their technical corrigenda
    Legacy,
    /// IFC4 and every IFC4Xn revision
    Ifc4,
}

impl SchemaFamily {
    /// Classify a FILE_SCHEMA identifier by case-insensitive prefix
    pub fn detect(identifier: &str) -> Result<Self> {
        let id = identifier.trim();
        if id.is_empty() {
            return Err(ExtractError::MissingSchema);
        }

        let upper = id.to_ascii_uppercase();
        if upper.starts_with("IFC4") {
            Ok(SchemaFamily::Ifc4)
        } else if upper.starts_with("IFC2X") {
            Ok(SchemaFamily::Legacy)
        } else {
            Err(ExtractError::UnrecognizedSchema(id.to_string()))
        }
    }

    /// Entity type carrying sensor semantics in this generation
    pub fn sensor_type(self) -> IfcType {
        match self {
            // IFC2X3 has no IfcSensor occurrence entity
            SchemaFamily::Legacy => IfcType::IfcDistributionControlElement,
            SchemaFamily::Ifc4 => IfcType::IfcSensor,
        }
    }
}

impl fmt::Display for SchemaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaFamily::Legacy => write!(f, "IFC2X"),
            SchemaFamily::Ifc4 => write!(f, "IFC4"),
        }
    }
}

/// Sensor entity type for a loaded model
pub fn sensor_type(model: &dyn IfcModel) -> Result<IfcType> {
    let family = SchemaFamily::detect(&model.metadata().schema_version)?;
    let ty = family.sensor_type();
    log::debug!(
        "Schema '{}' is {}, sensors are {}",
        model.metadata().schema_version,
        family,
        ty.schema_name()
    );
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_identifiers() {
        for id in ["IFC2X3", "IFC2X3_TC1", "ifc2x3", "IFC2X2_FINAL", "IFC2X"] {
            assert_eq!(SchemaFamily::detect(id).unwrap(), SchemaFamily::Legacy, "{id}");
        }
        assert_eq!(
            SchemaFamily::Legacy.sensor_type(),
            IfcType::IfcDistributionControlElement
        );
    }

    #[test]
    fn test_ifc4_identifiers() {
        for id in ["IFC4", "IFC4X1", "IFC4X3_ADD2", "Ifc4x3"] {
            assert_eq!(SchemaFamily::detect(id).unwrap(), SchemaFamily::Ifc4, "{id}");
        }
        assert_eq!(SchemaFamily::Ifc4.sensor_type(), IfcType::IfcSensor);
    }

    #[test]
    fn test_missing_and_unknown() {
        assert!(matches!(SchemaFamily::detect(""), Err(ExtractError::MissingSchema)));
        assert!(matches!(SchemaFamily::detect("  "), Err(ExtractError::MissingSchema)));
        assert!(matches!(
            SchemaFamily::detect("IFC5"),
            Err(ExtractError::UnrecognizedSchema(id)) if id == "IFC5"
        ));
        assert!(matches!(
            SchemaFamily::detect("CONFIG_CONTROL_DESIGN"),
            Err(ExtractError::UnrecognizedSchema(_))
        ));
    }
}
