// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Offline sensor generation
//!
//! Places one synthetic sensor at the bounding-volume centroid of every
//! space with body geometry. The records are written as a JSON artifact for
//! a downstream loader.

use crate::error::Result;
use crate::select;
use ifc_fm_geometry::ShapeIterator;
use ifc_fm_model::{IfcModel, Product};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// IFC base-64 alphabet used by compressed GlobalIds
const GUID_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Generator settings, loadable from TOML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model the records are attached to downstream
    pub model_id: i64,
    /// Artifact path
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            output: default_output(),
        }
    }
}

fn default_model_id() -> i64 {
    1
}

fn default_output() -> PathBuf {
    PathBuf::from("sensors.json")
}

/// One synthetic sensor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSensor {
    pub guid: String,
    pub model_id: i64,
    pub name: String,
    /// GUID of the space the sensor sits in
    pub room_id: String,
    /// Metres
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One sensor per space with usable body geometry, in file order
pub fn generate_sensors(model: &dyn IfcModel, config: &GeneratorConfig) -> Vec<GeneratedSensor> {
    let spaces: Vec<Product> = select::spaces(model).into_iter().cloned().collect();
    let candidates = spaces.len();

    let mut shapes = ShapeIterator::new(model, spaces);
    let records: Vec<GeneratedSensor> = shapes
        .by_ref()
        .map(|shape| GeneratedSensor {
            guid: new_ifc_guid(),
            model_id: config.model_id,
            name: shape.name.unwrap_or_default(),
            room_id: shape.guid,
            x: shape.centroid.x,
            y: shape.centroid.y,
            z: shape.centroid.z,
        })
        .collect();

    log::info!(
        "Generated {} sensors from {} spaces ({} without geometry)",
        records.len(),
        candidates,
        shapes.skipped()
    );

    records
}

/// Fresh random GlobalId
pub fn new_ifc_guid() -> String {
    compress_guid(uuid::Uuid::new_v4().as_bytes())
}

/// Compress 16 bytes to the 22-character IFC GlobalId form
///
/// The first byte becomes two characters, each following 3-byte group four.
pub fn compress_guid(bytes: &[u8; 16]) -> String {
    let mut out = String::with_capacity(22);
    push_digits(&mut out, u32::from(bytes[0]), 2);
    for chunk in bytes[1..].chunks_exact(3) {
        let value =
            (u32::from(chunk[0]) << 16) | (u32::from(chunk[1]) << 8) | u32::from(chunk[2]);
        push_digits(&mut out, value, 4);
    }
    out
}

fn push_digits(out: &mut String, value: u32, digits: u32) {
    for i in (0..digits).rev() {
        let index = ((value >> (6 * i)) & 63) as usize;
        out.push(char::from(GUID_ALPHABET[index]));
    }
}

/// Write records as JSON with 4-space indentation
pub fn write_sensors_json<W: Write>(records: &[GeneratedSensor], writer: W) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    records.serialize(&mut ser)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCCARTESIANPOINT((0.,0.,0.));
#2=IFCAXIS2PLACEMENT3D(#1,$,$);
#3=IFCCARTESIANPOINT((5.,0.,0.));
#4=IFCAXIS2PLACEMENT3D(#3,$,$);
#5=IFCLOCALPLACEMENT($,#4);
#6=IFCCARTESIANPOINT((1.,1.));
#7=IFCAXIS2PLACEMENT2D(#6,$);
#8=IFCRECTANGLEPROFILEDEF(.AREA.,$,#7,2.,2.);
#9=IFCDIRECTION((0.,0.,1.));
#10=IFCEXTRUDEDAREASOLID(#8,#2,#9,3.);
#11=IFCSHAPEREPRESENTATION($,'Body','SweptSolid',(#10));
#12=IFCPRODUCTDEFINITIONSHAPE($,$,(#11));
#20=IFCSPACE('1g$7a2Wf50tP0V7ycX1Rdh',$,'Store',$,$,#5,#12,$,.ELEMENT.,.INTERNAL.,$);
#21=IFCSPACE('2g$7a2Wf50tP0V7ycX1Rdh',$,$,$,$,#5,#12,$,.ELEMENT.,.INTERNAL.,$);
#22=IFCSPACE('3g$7a2Wf50tP0V7ycX1Rdh',$,'Empty',$,$,#5,$,$,.ELEMENT.,.INTERNAL.,$);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_compress_guid_edges() {
        assert_eq!(compress_guid(&[0; 16]), "0000000000000000000000");
        assert_eq!(compress_guid(&[0xFF; 16]), "3$$$$$$$$$$$$$$$$$$$$$");
    }

    #[test]
    fn test_new_guid_format() {
        let guid = new_ifc_guid();
        assert_eq!(guid.len(), 22);
        assert!(guid.bytes().all(|b| GUID_ALPHABET.contains(&b)));
        assert!(matches!(guid.as_bytes()[0], b'0'..=b'3'));
    }

    #[test]
    fn test_generate_one_per_space_with_geometry() {
        let model = ifc_fm_parser::parse(TEST_IFC).unwrap();
        let config = GeneratorConfig {
            model_id: 7,
            ..Default::default()
        };
        let records = generate_sensors(model.as_ref(), &config);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Store");
        assert_eq!(records[0].room_id, "1g$7a2Wf50tP0V7ycX1Rdh");
        assert_eq!(records[0].model_id, 7);
        assert!((records[0].x - 6.0).abs() < 1e-9);
        assert!((records[0].y - 1.0).abs() < 1e-9);
        assert!((records[0].z - 1.5).abs() < 1e-9);
        assert_eq!(records[1].name, "");
        assert_ne!(records[0].guid, records[1].guid);
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let record = GeneratedSensor {
            guid: "0000000000000000000000".to_string(),
            model_id: 1,
            name: "Store".to_string(),
            room_id: "1g$7a2Wf50tP0V7ycX1Rdh".to_string(),
            x: 1.0,
            y: 2.0,
            z: 3.0,
        };
        let mut out = Vec::new();
        write_sensors_json(&[record], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[\n    {\n        \"guid\""));
    }

    #[test]
    fn test_config_fills_missing_fields() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"model_id": 3}"#).unwrap();
        assert_eq!(config.model_id, 3);
        assert_eq!(config.output, PathBuf::from("sensors.json"));
    }
}
