// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC data representation
//!
//! This module defines the fundamental types used throughout the loader and
//! the resolution pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw STEP instance number (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Declares the known IFC types together with their STEP keyword and their
/// direct supertype. Unknown keywords are kept verbatim (uppercased).
macro_rules! ifc_types {
    ($($variant:ident => $keyword:literal, $parent:expr;)*) => {
        /// IFC entity type enumeration
        ///
        /// Covers the spatial, element, relationship, placement and geometry
        /// types the extraction pipeline reads. Anything else is captured as
        /// [`IfcType::Unknown`] with its uppercased keyword.
        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum IfcType {
            $($variant,)*
            /// Unknown type - stores the uppercased STEP keyword
            Unknown(String),
        }

        impl IfcType {
            /// Parse a type name string into an IfcType (case-insensitive)
            pub fn parse(s: &str) -> Self {
                let upper = s.to_ascii_uppercase();
                match upper.as_str() {
                    $($keyword => IfcType::$variant,)*
                    _ => IfcType::Unknown(upper),
                }
            }

            /// STEP keyword as written in files (e.g., "IFCWALL")
            pub fn name(&self) -> &str {
                match self {
                    $(IfcType::$variant => $keyword,)*
                    IfcType::Unknown(s) => s,
                }
            }

            /// Schema-cased entity name (e.g., "IfcWall")
            ///
            /// Unknown types only know their keyword, which is returned as-is.
            pub fn schema_name(&self) -> &str {
                match self {
                    $(IfcType::$variant => stringify!($variant),)*
                    IfcType::Unknown(s) => s,
                }
            }

            /// Direct supertype, if it is one of the known types
            pub fn parent(&self) -> Option<IfcType> {
                match self {
                    $(IfcType::$variant => $parent,)*
                    IfcType::Unknown(_) => None,
                }
            }
        }
    };
}

ifc_types! {
    // ========================================================================
    // Roots
    // ========================================================================
    IfcProject => "IFCPROJECT", None;
    IfcProduct => "IFCPRODUCT", None;

    // ========================================================================
    // Spatial Structure
    // ========================================================================
    IfcSpatialElement => "IFCSPATIALELEMENT", Some(IfcType::IfcProduct);
    IfcSpatialStructureElement => "IFCSPATIALSTRUCTUREELEMENT", Some(IfcType::IfcSpatialElement);
    IfcSite => "IFCSITE", Some(IfcType::IfcSpatialStructureElement);
    IfcBuilding => "IFCBUILDING", Some(IfcType::IfcSpatialStructureElement);
    IfcBuildingStorey => "IFCBUILDINGSTOREY", Some(IfcType::IfcSpatialStructureElement);
    IfcSpace => "IFCSPACE", Some(IfcType::IfcSpatialStructureElement);
    IfcFacility => "IFCFACILITY", Some(IfcType::IfcSpatialStructureElement);
    IfcFacilityPart => "IFCFACILITYPART", Some(IfcType::IfcSpatialStructureElement);
    IfcRoad => "IFCROAD", Some(IfcType::IfcFacility);
    IfcBridge => "IFCBRIDGE", Some(IfcType::IfcFacility);
    IfcRailway => "IFCRAILWAY", Some(IfcType::IfcFacility);
    IfcRoadPart => "IFCROADPART", Some(IfcType::IfcFacilityPart);
    IfcBridgePart => "IFCBRIDGEPART", Some(IfcType::IfcFacilityPart);
    IfcRailwayPart => "IFCRAILWAYPART", Some(IfcType::IfcFacilityPart);
    IfcSpatialZone => "IFCSPATIALZONE", Some(IfcType::IfcSpatialElement);
    IfcExternalSpatialElement => "IFCEXTERNALSPATIALELEMENT", Some(IfcType::IfcSpatialElement);
    IfcExternalSpatialStructureElement => "IFCEXTERNALSPATIALSTRUCTUREELEMENT", Some(IfcType::IfcSpatialElement);
    IfcMarineFacility => "IFCMARINEFACILITY", Some(IfcType::IfcFacility);
    IfcMarinePart => "IFCMARINEPART", Some(IfcType::IfcFacilityPart);
    IfcFacilityPartCommon => "IFCFACILITYPARTCOMMON", Some(IfcType::IfcFacilityPart);

    // ========================================================================
    // Non-element products
    // ========================================================================
    IfcAnnotation => "IFCANNOTATION", Some(IfcType::IfcProduct);
    IfcGrid => "IFCGRID", Some(IfcType::IfcProduct);
    IfcProxy => "IFCPROXY", Some(IfcType::IfcProduct);
    IfcPort => "IFCPORT", Some(IfcType::IfcProduct);
    IfcDistributionPort => "IFCDISTRIBUTIONPORT", Some(IfcType::IfcPort);
    IfcPositioningElement => "IFCPOSITIONINGELEMENT", Some(IfcType::IfcProduct);
    IfcLinearPositioningElement => "IFCLINEARPOSITIONINGELEMENT", Some(IfcType::IfcPositioningElement);
    IfcAlignment => "IFCALIGNMENT", Some(IfcType::IfcLinearPositioningElement);
    IfcReferent => "IFCREFERENT", Some(IfcType::IfcPositioningElement);
    IfcLinearElement => "IFCLINEARELEMENT", Some(IfcType::IfcProduct);
    IfcStructuralItem => "IFCSTRUCTURALITEM", Some(IfcType::IfcProduct);
    IfcStructuralMember => "IFCSTRUCTURALMEMBER", Some(IfcType::IfcStructuralItem);
    IfcStructuralConnection => "IFCSTRUCTURALCONNECTION", Some(IfcType::IfcStructuralItem);
    IfcStructuralActivity => "IFCSTRUCTURALACTIVITY", Some(IfcType::IfcProduct);

    // ========================================================================
    // Building Elements
    // ========================================================================
    IfcElement => "IFCELEMENT", Some(IfcType::IfcProduct);
    IfcBuildingElement => "IFCBUILDINGELEMENT", Some(IfcType::IfcElement);
    IfcWall => "IFCWALL", Some(IfcType::IfcBuildingElement);
    IfcWallStandardCase => "IFCWALLSTANDARDCASE", Some(IfcType::IfcWall);
    IfcCurtainWall => "IFCCURTAINWALL", Some(IfcType::IfcBuildingElement);
    IfcSlab => "IFCSLAB", Some(IfcType::IfcBuildingElement);
    IfcRoof => "IFCROOF", Some(IfcType::IfcBuildingElement);
    IfcBeam => "IFCBEAM", Some(IfcType::IfcBuildingElement);
    IfcColumn => "IFCCOLUMN", Some(IfcType::IfcBuildingElement);
    IfcDoor => "IFCDOOR", Some(IfcType::IfcBuildingElement);
    IfcWindow => "IFCWINDOW", Some(IfcType::IfcBuildingElement);
    IfcStair => "IFCSTAIR", Some(IfcType::IfcBuildingElement);
    IfcStairFlight => "IFCSTAIRFLIGHT", Some(IfcType::IfcBuildingElement);
    IfcRamp => "IFCRAMP", Some(IfcType::IfcBuildingElement);
    IfcRampFlight => "IFCRAMPFLIGHT", Some(IfcType::IfcBuildingElement);
    IfcRailing => "IFCRAILING", Some(IfcType::IfcBuildingElement);
    IfcCovering => "IFCCOVERING", Some(IfcType::IfcBuildingElement);
    IfcPlate => "IFCPLATE", Some(IfcType::IfcBuildingElement);
    IfcMember => "IFCMEMBER", Some(IfcType::IfcBuildingElement);
    IfcFooting => "IFCFOOTING", Some(IfcType::IfcBuildingElement);
    IfcPile => "IFCPILE", Some(IfcType::IfcBuildingElement);
    IfcChimney => "IFCCHIMNEY", Some(IfcType::IfcBuildingElement);
    IfcShadingDevice => "IFCSHADINGDEVICE", Some(IfcType::IfcBuildingElement);
    IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY", Some(IfcType::IfcBuildingElement);
    // IFC4X3 name of IfcBuildingElement
    IfcBuiltElement => "IFCBUILTELEMENT", Some(IfcType::IfcElement);
    IfcBeamStandardCase => "IFCBEAMSTANDARDCASE", Some(IfcType::IfcBeam);
    IfcColumnStandardCase => "IFCCOLUMNSTANDARDCASE", Some(IfcType::IfcColumn);
    IfcDoorStandardCase => "IFCDOORSTANDARDCASE", Some(IfcType::IfcDoor);
    IfcMemberStandardCase => "IFCMEMBERSTANDARDCASE", Some(IfcType::IfcMember);
    IfcPlateStandardCase => "IFCPLATESTANDARDCASE", Some(IfcType::IfcPlate);
    IfcSlabStandardCase => "IFCSLABSTANDARDCASE", Some(IfcType::IfcSlab);
    IfcSlabElementedCase => "IFCSLABELEMENTEDCASE", Some(IfcType::IfcSlab);
    IfcWallElementedCase => "IFCWALLELEMENTEDCASE", Some(IfcType::IfcWall);
    IfcWindowStandardCase => "IFCWINDOWSTANDARDCASE", Some(IfcType::IfcWindow);
    IfcBuildingElementComponent => "IFCBUILDINGELEMENTCOMPONENT", Some(IfcType::IfcBuildingElement);
    IfcBearing => "IFCBEARING", Some(IfcType::IfcBuildingElement);
    IfcCourse => "IFCCOURSE", Some(IfcType::IfcBuildingElement);
    IfcDeepFoundation => "IFCDEEPFOUNDATION", Some(IfcType::IfcBuildingElement);
    IfcCaissonFoundation => "IFCCAISSONFOUNDATION", Some(IfcType::IfcDeepFoundation);
    IfcEarthworksElement => "IFCEARTHWORKSELEMENT", Some(IfcType::IfcBuildingElement);
    IfcEarthworksFill => "IFCEARTHWORKSFILL", Some(IfcType::IfcEarthworksElement);
    IfcReinforcedSoil => "IFCREINFORCEDSOIL", Some(IfcType::IfcEarthworksElement);
    IfcKerb => "IFCKERB", Some(IfcType::IfcBuildingElement);
    IfcMooringDevice => "IFCMOORINGDEVICE", Some(IfcType::IfcBuildingElement);
    IfcNavigationElement => "IFCNAVIGATIONELEMENT", Some(IfcType::IfcBuildingElement);
    IfcPavement => "IFCPAVEMENT", Some(IfcType::IfcBuildingElement);
    IfcRail => "IFCRAIL", Some(IfcType::IfcBuildingElement);
    IfcTrackElement => "IFCTRACKELEMENT", Some(IfcType::IfcBuildingElement);

    // ========================================================================
    // Distribution Elements
    // ========================================================================
    IfcDistributionElement => "IFCDISTRIBUTIONELEMENT", Some(IfcType::IfcElement);
    IfcDistributionFlowElement => "IFCDISTRIBUTIONFLOWELEMENT", Some(IfcType::IfcDistributionElement);
    IfcFlowTerminal => "IFCFLOWTERMINAL", Some(IfcType::IfcDistributionFlowElement);
    IfcFlowSegment => "IFCFLOWSEGMENT", Some(IfcType::IfcDistributionFlowElement);
    IfcFlowFitting => "IFCFLOWFITTING", Some(IfcType::IfcDistributionFlowElement);
    IfcFlowController => "IFCFLOWCONTROLLER", Some(IfcType::IfcDistributionFlowElement);
    IfcFlowMovingDevice => "IFCFLOWMOVINGDEVICE", Some(IfcType::IfcDistributionFlowElement);
    IfcFlowStorageDevice => "IFCFLOWSTORAGEDEVICE", Some(IfcType::IfcDistributionFlowElement);
    IfcFlowTreatmentDevice => "IFCFLOWTREATMENTDEVICE", Some(IfcType::IfcDistributionFlowElement);
    IfcEnergyConversionDevice => "IFCENERGYCONVERSIONDEVICE", Some(IfcType::IfcDistributionFlowElement);
    IfcAirTerminal => "IFCAIRTERMINAL", Some(IfcType::IfcFlowTerminal);
    IfcLightFixture => "IFCLIGHTFIXTURE", Some(IfcType::IfcFlowTerminal);
    IfcSanitaryTerminal => "IFCSANITARYTERMINAL", Some(IfcType::IfcFlowTerminal);
    IfcSpaceHeater => "IFCSPACEHEATER", Some(IfcType::IfcFlowTerminal);
    IfcOutlet => "IFCOUTLET", Some(IfcType::IfcFlowTerminal);
    IfcDuctSegment => "IFCDUCTSEGMENT", Some(IfcType::IfcFlowSegment);
    IfcPipeSegment => "IFCPIPESEGMENT", Some(IfcType::IfcFlowSegment);
    IfcCableSegment => "IFCCABLESEGMENT", Some(IfcType::IfcFlowSegment);
    IfcValve => "IFCVALVE", Some(IfcType::IfcFlowController);
    IfcDamper => "IFCDAMPER", Some(IfcType::IfcFlowController);
    IfcSwitchingDevice => "IFCSWITCHINGDEVICE", Some(IfcType::IfcFlowController);
    IfcPump => "IFCPUMP", Some(IfcType::IfcFlowMovingDevice);
    IfcFan => "IFCFAN", Some(IfcType::IfcFlowMovingDevice);
    IfcBoiler => "IFCBOILER", Some(IfcType::IfcEnergyConversionDevice);
    IfcChiller => "IFCCHILLER", Some(IfcType::IfcEnergyConversionDevice);
    IfcUnitaryEquipment => "IFCUNITARYEQUIPMENT", Some(IfcType::IfcEnergyConversionDevice);
    IfcDistributionControlElement => "IFCDISTRIBUTIONCONTROLELEMENT", Some(IfcType::IfcDistributionElement);
    IfcSensor => "IFCSENSOR", Some(IfcType::IfcDistributionControlElement);
    IfcActuator => "IFCACTUATOR", Some(IfcType::IfcDistributionControlElement);
    IfcAlarm => "IFCALARM", Some(IfcType::IfcDistributionControlElement);
    IfcController => "IFCCONTROLLER", Some(IfcType::IfcDistributionControlElement);
    IfcFlowInstrument => "IFCFLOWINSTRUMENT", Some(IfcType::IfcDistributionControlElement);
    IfcUnitaryControlElement => "IFCUNITARYCONTROLELEMENT", Some(IfcType::IfcDistributionControlElement);
    IfcProtectiveDeviceTrippingUnit => "IFCPROTECTIVEDEVICETRIPPINGUNIT", Some(IfcType::IfcDistributionControlElement);
    IfcDistributionChamberElement => "IFCDISTRIBUTIONCHAMBERELEMENT", Some(IfcType::IfcDistributionFlowElement);
    IfcAudioVisualAppliance => "IFCAUDIOVISUALAPPLIANCE", Some(IfcType::IfcFlowTerminal);
    IfcCommunicationsAppliance => "IFCCOMMUNICATIONSAPPLIANCE", Some(IfcType::IfcFlowTerminal);
    IfcElectricAppliance => "IFCELECTRICAPPLIANCE", Some(IfcType::IfcFlowTerminal);
    IfcFireSuppressionTerminal => "IFCFIRESUPPRESSIONTERMINAL", Some(IfcType::IfcFlowTerminal);
    IfcLamp => "IFCLAMP", Some(IfcType::IfcFlowTerminal);
    IfcLiquidTerminal => "IFCLIQUIDTERMINAL", Some(IfcType::IfcFlowTerminal);
    IfcMedicalDevice => "IFCMEDICALDEVICE", Some(IfcType::IfcFlowTerminal);
    IfcMobileTelecommunicationsAppliance => "IFCMOBILETELECOMMUNICATIONSAPPLIANCE", Some(IfcType::IfcFlowTerminal);
    IfcSignal => "IFCSIGNAL", Some(IfcType::IfcFlowTerminal);
    IfcStackTerminal => "IFCSTACKTERMINAL", Some(IfcType::IfcFlowTerminal);
    IfcWasteTerminal => "IFCWASTETERMINAL", Some(IfcType::IfcFlowTerminal);
    IfcCableCarrierSegment => "IFCCABLECARRIERSEGMENT", Some(IfcType::IfcFlowSegment);
    IfcConveyorSegment => "IFCCONVEYORSEGMENT", Some(IfcType::IfcFlowSegment);
    IfcCableCarrierFitting => "IFCCABLECARRIERFITTING", Some(IfcType::IfcFlowFitting);
    IfcCableFitting => "IFCCABLEFITTING", Some(IfcType::IfcFlowFitting);
    IfcDuctFitting => "IFCDUCTFITTING", Some(IfcType::IfcFlowFitting);
    IfcJunctionBox => "IFCJUNCTIONBOX", Some(IfcType::IfcFlowFitting);
    IfcPipeFitting => "IFCPIPEFITTING", Some(IfcType::IfcFlowFitting);
    IfcAirTerminalBox => "IFCAIRTERMINALBOX", Some(IfcType::IfcFlowController);
    IfcDistributionBoard => "IFCDISTRIBUTIONBOARD", Some(IfcType::IfcFlowController);
    IfcElectricDistributionBoard => "IFCELECTRICDISTRIBUTIONBOARD", Some(IfcType::IfcFlowController);
    IfcElectricTimeControl => "IFCELECTRICTIMECONTROL", Some(IfcType::IfcFlowController);
    IfcFlowMeter => "IFCFLOWMETER", Some(IfcType::IfcFlowController);
    IfcProtectiveDevice => "IFCPROTECTIVEDEVICE", Some(IfcType::IfcFlowController);
    IfcCompressor => "IFCCOMPRESSOR", Some(IfcType::IfcFlowMovingDevice);
    IfcElectricFlowStorageDevice => "IFCELECTRICFLOWSTORAGEDEVICE", Some(IfcType::IfcFlowStorageDevice);
    IfcTank => "IFCTANK", Some(IfcType::IfcFlowStorageDevice);
    IfcDuctSilencer => "IFCDUCTSILENCER", Some(IfcType::IfcFlowTreatmentDevice);
    IfcElectricFlowTreatmentDevice => "IFCELECTRICFLOWTREATMENTDEVICE", Some(IfcType::IfcFlowTreatmentDevice);
    IfcFilter => "IFCFILTER", Some(IfcType::IfcFlowTreatmentDevice);
    IfcInterceptor => "IFCINTERCEPTOR", Some(IfcType::IfcFlowTreatmentDevice);
    IfcAirToAirHeatRecovery => "IFCAIRTOAIRHEATRECOVERY", Some(IfcType::IfcEnergyConversionDevice);
    IfcBurner => "IFCBURNER", Some(IfcType::IfcEnergyConversionDevice);
    IfcCoil => "IFCCOIL", Some(IfcType::IfcEnergyConversionDevice);
    IfcCondenser => "IFCCONDENSER", Some(IfcType::IfcEnergyConversionDevice);
    IfcCooledBeam => "IFCCOOLEDBEAM", Some(IfcType::IfcEnergyConversionDevice);
    IfcCoolingTower => "IFCCOOLINGTOWER", Some(IfcType::IfcEnergyConversionDevice);
    IfcElectricGenerator => "IFCELECTRICGENERATOR", Some(IfcType::IfcEnergyConversionDevice);
    IfcElectricMotor => "IFCELECTRICMOTOR", Some(IfcType::IfcEnergyConversionDevice);
    IfcEngine => "IFCENGINE", Some(IfcType::IfcEnergyConversionDevice);
    IfcEvaporativeCooler => "IFCEVAPORATIVECOOLER", Some(IfcType::IfcEnergyConversionDevice);
    IfcEvaporator => "IFCEVAPORATOR", Some(IfcType::IfcEnergyConversionDevice);
    IfcHeatExchanger => "IFCHEATEXCHANGER", Some(IfcType::IfcEnergyConversionDevice);
    IfcHumidifier => "IFCHUMIDIFIER", Some(IfcType::IfcEnergyConversionDevice);
    IfcMotorConnection => "IFCMOTORCONNECTION", Some(IfcType::IfcEnergyConversionDevice);
    IfcSolarDevice => "IFCSOLARDEVICE", Some(IfcType::IfcEnergyConversionDevice);
    IfcTransformer => "IFCTRANSFORMER", Some(IfcType::IfcEnergyConversionDevice);
    IfcTubeBundle => "IFCTUBEBUNDLE", Some(IfcType::IfcEnergyConversionDevice);

    // ========================================================================
    // Furnishing, Features, Components
    // ========================================================================
    IfcFurnishingElement => "IFCFURNISHINGELEMENT", Some(IfcType::IfcElement);
    IfcFurniture => "IFCFURNITURE", Some(IfcType::IfcFurnishingElement);
    IfcSystemFurnitureElement => "IFCSYSTEMFURNITUREELEMENT", Some(IfcType::IfcFurnishingElement);
    IfcFeatureElement => "IFCFEATUREELEMENT", Some(IfcType::IfcElement);
    IfcFeatureElementSubtraction => "IFCFEATUREELEMENTSUBTRACTION", Some(IfcType::IfcFeatureElement);
    IfcFeatureElementAddition => "IFCFEATUREELEMENTADDITION", Some(IfcType::IfcFeatureElement);
    IfcOpeningElement => "IFCOPENINGELEMENT", Some(IfcType::IfcFeatureElementSubtraction);
    IfcOpeningStandardCase => "IFCOPENINGSTANDARDCASE", Some(IfcType::IfcOpeningElement);
    IfcVoidingFeature => "IFCVOIDINGFEATURE", Some(IfcType::IfcFeatureElementSubtraction);
    IfcProjectionElement => "IFCPROJECTIONELEMENT", Some(IfcType::IfcFeatureElementAddition);
    IfcElementComponent => "IFCELEMENTCOMPONENT", Some(IfcType::IfcElement);
    IfcBuildingElementPart => "IFCBUILDINGELEMENTPART", Some(IfcType::IfcElementComponent);
    IfcDiscreteAccessory => "IFCDISCRETEACCESSORY", Some(IfcType::IfcElementComponent);
    IfcFastener => "IFCFASTENER", Some(IfcType::IfcElementComponent);
    IfcMechanicalFastener => "IFCMECHANICALFASTENER", Some(IfcType::IfcElementComponent);
    IfcElementAssembly => "IFCELEMENTASSEMBLY", Some(IfcType::IfcElement);
    IfcTransportElement => "IFCTRANSPORTELEMENT", Some(IfcType::IfcElement);
    IfcVirtualElement => "IFCVIRTUALELEMENT", Some(IfcType::IfcElement);
    IfcGeographicElement => "IFCGEOGRAPHICELEMENT", Some(IfcType::IfcElement);
    IfcCivilElement => "IFCCIVILELEMENT", Some(IfcType::IfcElement);
    IfcSurfaceFeature => "IFCSURFACEFEATURE", Some(IfcType::IfcFeatureElement);
    IfcReinforcingElement => "IFCREINFORCINGELEMENT", Some(IfcType::IfcElementComponent);
    IfcReinforcingBar => "IFCREINFORCINGBAR", Some(IfcType::IfcReinforcingElement);
    IfcReinforcingMesh => "IFCREINFORCINGMESH", Some(IfcType::IfcReinforcingElement);
    IfcTendon => "IFCTENDON", Some(IfcType::IfcReinforcingElement);
    IfcTendonAnchor => "IFCTENDONANCHOR", Some(IfcType::IfcReinforcingElement);
    IfcTendonConduit => "IFCTENDONCONDUIT", Some(IfcType::IfcReinforcingElement);
    IfcImpactProtectionDevice => "IFCIMPACTPROTECTIONDEVICE", Some(IfcType::IfcElementComponent);
    IfcSign => "IFCSIGN", Some(IfcType::IfcElementComponent);
    IfcVibrationDamper => "IFCVIBRATIONDAMPER", Some(IfcType::IfcElementComponent);
    IfcVibrationIsolator => "IFCVIBRATIONISOLATOR", Some(IfcType::IfcElementComponent);
    // IFC2X3 only
    IfcEquipmentElement => "IFCEQUIPMENTELEMENT", Some(IfcType::IfcElement);
    IfcElectricalElement => "IFCELECTRICALELEMENT", Some(IfcType::IfcElement);
    IfcGeotechnicalElement => "IFCGEOTECHNICALELEMENT", Some(IfcType::IfcElement);
    IfcGeotechnicalAssembly => "IFCGEOTECHNICALASSEMBLY", Some(IfcType::IfcGeotechnicalElement);
    IfcBorehole => "IFCBOREHOLE", Some(IfcType::IfcGeotechnicalAssembly);
    IfcGeomodel => "IFCGEOMODEL", Some(IfcType::IfcGeotechnicalAssembly);
    IfcGeoslice => "IFCGEOSLICE", Some(IfcType::IfcGeotechnicalAssembly);
    IfcGeotechnicalStratum => "IFCGEOTECHNICALSTRATUM", Some(IfcType::IfcGeotechnicalElement);

    // ========================================================================
    // Relationships
    // ========================================================================
    IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE", None;
    IfcRelAggregates => "IFCRELAGGREGATES", None;
    IfcRelNests => "IFCRELNESTS", None;
    IfcRelReferencedInSpatialStructure => "IFCRELREFERENCEDINSPATIALSTRUCTURE", None;

    // ========================================================================
    // Placement and Transforms
    // ========================================================================
    IfcLocalPlacement => "IFCLOCALPLACEMENT", None;
    IfcAxis2Placement2D => "IFCAXIS2PLACEMENT2D", None;
    IfcAxis2Placement3D => "IFCAXIS2PLACEMENT3D", None;
    IfcCartesianPoint => "IFCCARTESIANPOINT", None;
    IfcDirection => "IFCDIRECTION", None;
    IfcCartesianPointList2D => "IFCCARTESIANPOINTLIST2D", None;
    IfcCartesianPointList3D => "IFCCARTESIANPOINTLIST3D", None;
    IfcCartesianTransformationOperator3D => "IFCCARTESIANTRANSFORMATIONOPERATOR3D", None;
    IfcCartesianTransformationOperator3DnonUniform => "IFCCARTESIANTRANSFORMATIONOPERATOR3DNONUNIFORM", Some(IfcType::IfcCartesianTransformationOperator3D);

    // ========================================================================
    // Representations and Geometry
    // ========================================================================
    IfcProductDefinitionShape => "IFCPRODUCTDEFINITIONSHAPE", None;
    IfcShapeRepresentation => "IFCSHAPEREPRESENTATION", None;
    IfcRepresentationMap => "IFCREPRESENTATIONMAP", None;
    IfcMappedItem => "IFCMAPPEDITEM", None;
    IfcExtrudedAreaSolid => "IFCEXTRUDEDAREASOLID", None;
    IfcFacetedBrep => "IFCFACETEDBREP", None;
    IfcFacetedBrepWithVoids => "IFCFACETEDBREPWITHVOIDS", Some(IfcType::IfcFacetedBrep);
    IfcClosedShell => "IFCCLOSEDSHELL", None;
    IfcFace => "IFCFACE", None;
    IfcFaceBound => "IFCFACEBOUND", None;
    IfcFaceOuterBound => "IFCFACEOUTERBOUND", Some(IfcType::IfcFaceBound);
    IfcPolyLoop => "IFCPOLYLOOP", None;
    IfcTriangulatedFaceSet => "IFCTRIANGULATEDFACESET", None;
    IfcPolygonalFaceSet => "IFCPOLYGONALFACESET", None;
    IfcBooleanResult => "IFCBOOLEANRESULT", None;
    IfcBooleanClippingResult => "IFCBOOLEANCLIPPINGRESULT", Some(IfcType::IfcBooleanResult);
    IfcBoundingBox => "IFCBOUNDINGBOX", None;
    IfcRectangleProfileDef => "IFCRECTANGLEPROFILEDEF", None;
    IfcRectangleHollowProfileDef => "IFCRECTANGLEHOLLOWPROFILEDEF", Some(IfcType::IfcRectangleProfileDef);
    IfcCircleProfileDef => "IFCCIRCLEPROFILEDEF", None;
    IfcCircleHollowProfileDef => "IFCCIRCLEHOLLOWPROFILEDEF", Some(IfcType::IfcCircleProfileDef);
    IfcArbitraryClosedProfileDef => "IFCARBITRARYCLOSEDPROFILEDEF", None;
    IfcArbitraryProfileDefWithVoids => "IFCARBITRARYPROFILEDEFWITHVOIDS", Some(IfcType::IfcArbitraryClosedProfileDef);
    IfcPolyline => "IFCPOLYLINE", None;
    IfcIndexedPolyCurve => "IFCINDEXEDPOLYCURVE", None;

    // ========================================================================
    // Units
    // ========================================================================
    IfcUnitAssignment => "IFCUNITASSIGNMENT", None;
    IfcSIUnit => "IFCSIUNIT", None;
    IfcConversionBasedUnit => "IFCCONVERSIONBASEDUNIT", None;
    IfcMeasureWithUnit => "IFCMEASUREWITHUNIT", None;
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Check whether this type equals `ancestor` or specializes it
    pub fn is_subtype_of(&self, ancestor: &IfcType) -> bool {
        let mut current = Some(self.clone());
        while let Some(ty) = current {
            if ty == *ancestor {
                return true;
            }
            current = ty.parent();
        }
        false
    }

    /// Check if this type is an IfcProduct (has placement and representation slots)
    pub fn is_product(&self) -> bool {
        self.is_subtype_of(&IfcType::IfcProduct)
    }

    /// Check if this type is a physical or logical element (IfcElement family)
    pub fn is_element(&self) -> bool {
        self.is_subtype_of(&IfcType::IfcElement)
    }

    /// Check if this type is a spatial structure element (site, building, storey, space...)
    pub fn is_spatial(&self) -> bool {
        self.is_subtype_of(&IfcType::IfcSpatialStructureElement)
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value (STEP escapes already decoded)
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Enum(s) => match s.to_uppercase().as_str() {
                "TRUE" | "T" => Some(true),
                "FALSE" | "F" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

/// Decoded IFC entity
///
/// Represents a fully decoded IFC entity with its ID, type, and attribute values.
#[derive(Clone, Debug)]
pub struct DecodedEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in order
    pub attributes: Vec<AttributeValue>,
}

impl DecodedEntity {
    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get entity reference at index
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|v| v.as_entity_ref())
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get float at index
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_float())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get enum string at index
    pub fn get_enum(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_enum())
    }

    /// Get list of entity references at index
    pub fn get_refs(&self, index: usize) -> Option<Vec<EntityId>> {
        self.get_list(index)
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
    }

    /// GlobalId of a rooted entity (attribute 0)
    pub fn global_id(&self) -> Option<&str> {
        self.get_string(0)
    }
}

/// Model metadata extracted from IFC header
#[derive(Clone, Debug, Default)]
pub struct ModelMetadata {
    /// IFC schema identifier (e.g., "IFC2X3", "IFC4", "IFC4X3_ADD2")
    pub schema_version: String,
    /// Originating system (CAD application)
    pub originating_system: Option<String>,
    /// Preprocessor version
    pub preprocessor_version: Option<String>,
    /// File name from header
    pub file_name: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Organization
    pub organization: Option<String>,
    /// Timestamp
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(IfcType::parse("IFCSENSOR"), IfcType::IfcSensor);
        assert_eq!(IfcType::parse("IfcSensor"), IfcType::IfcSensor);
        assert_eq!(
            IfcType::parse("IfcMadeUpThing"),
            IfcType::Unknown("IFCMADEUPTHING".to_string())
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(IfcType::IfcWallStandardCase.name(), "IFCWALLSTANDARDCASE");
        assert_eq!(IfcType::IfcWallStandardCase.schema_name(), "IfcWallStandardCase");
        assert_eq!(IfcType::parse("IFCFOO").schema_name(), "IFCFOO");
    }

    #[test]
    fn test_supertype_walk() {
        assert!(IfcType::IfcSensor.is_subtype_of(&IfcType::IfcDistributionControlElement));
        assert!(IfcType::IfcSensor.is_element());
        assert!(IfcType::IfcWallStandardCase.is_subtype_of(&IfcType::IfcWall));
        assert!(IfcType::IfcSpace.is_spatial());
        assert!(IfcType::IfcSpace.is_product());
        assert!(!IfcType::IfcSpace.is_element());
        assert!(!IfcType::IfcAnnotation.is_element());
        assert!(!IfcType::IfcProject.is_product());
        assert!(!IfcType::parse("IFCFOO").is_product());
    }

    #[test]
    fn test_element_families_across_schemas() {
        for keyword in [
            "IFCDOORSTANDARDCASE",
            "IFCSLABELEMENTEDCASE",
            "IFCLAMP",
            "IFCPIPEFITTING",
            "IFCDUCTFITTING",
            "IFCFLOWMETER",
            "IFCELECTRICAPPLIANCE",
            "IFCREINFORCINGBAR",
            "IFCEQUIPMENTELEMENT",
            "IFCBUILTELEMENT",
            "IFCKERB",
            "IFCBOREHOLE",
        ] {
            assert!(IfcType::parse(keyword).is_element(), "{keyword}");
        }
        assert!(IfcType::parse("IFCMARINEFACILITY").is_spatial());
        assert!(IfcType::parse("IFCALIGNMENT").is_product());
        assert!(!IfcType::parse("IFCALIGNMENT").is_element());
    }

    #[test]
    fn test_decoded_entity_accessors() {
        let entity = DecodedEntity {
            id: EntityId(7),
            ifc_type: IfcType::IfcWall,
            attributes: vec![
                AttributeValue::String("2O2Fr$t4X7Zf8NOew3FNr2".into()),
                AttributeValue::Null,
                AttributeValue::TypedValue(
                    "IFCLABEL".into(),
                    vec![AttributeValue::String("Wall".into())],
                ),
                AttributeValue::List(vec![
                    AttributeValue::EntityRef(EntityId(1)),
                    AttributeValue::Integer(3),
                ]),
            ],
        };

        assert_eq!(entity.global_id(), Some("2O2Fr$t4X7Zf8NOew3FNr2"));
        assert_eq!(entity.get_string(2), Some("Wall"));
        assert_eq!(entity.get_refs(3), Some(vec![EntityId(1)]));
        assert!(entity.get(1).is_some_and(|v| v.is_null()));
    }
}
