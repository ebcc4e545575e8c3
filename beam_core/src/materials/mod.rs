//! # Material Presets
//!
//! The small material catalogue offered by the request contract. Each preset
//! supplies an elastic modulus, a default moment of inertia for the reference
//! section, and a density. Callers that know their section override E and I
//! directly; the preset only fills what was left out.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::materials::Material;
//!
//! let steel: Material = "steel".parse().unwrap();
//! let props = steel.properties();
//! assert_eq!(props.elastic_modulus_pa, 200e9);
//! assert_eq!(steel.display_name(), "High-Strength Steel");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::model::SectionProperties;

/// Moment of inertia of the reference section shared by every preset (m⁴)
pub const REFERENCE_MOMENT_OF_INERTIA_M4: f64 = 8.33e-6;

/// Physical properties of a material preset (SI units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Modulus of elasticity E (Pa)
    pub elastic_modulus_pa: f64,
    /// Moment of inertia of the reference section I (m⁴)
    pub moment_of_inertia_m4: f64,
    /// Density (kg/m³)
    pub density_kg_m3: f64,
}

/// Material presets available to requests.
///
/// Serializes as the lowercase identifier used on the wire
/// (`"steel"`, `"carbon_fiber"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Steel,
    Concrete,
    Wood,
    Aluminum,
    CarbonFiber,
}

impl Material {
    /// All presets in catalogue order
    pub const ALL: [Material; 5] = [
        Material::Steel,
        Material::Concrete,
        Material::Wood,
        Material::Aluminum,
        Material::CarbonFiber,
    ];

    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            Material::Steel => "steel",
            Material::Concrete => "concrete",
            Material::Wood => "wood",
            Material::Aluminum => "aluminum",
            Material::CarbonFiber => "carbon_fiber",
        }
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Steel => "High-Strength Steel",
            Material::Concrete => "Reinforced Concrete",
            Material::Wood => "Structural Timber",
            Material::Aluminum => "Aerospace Aluminum",
            Material::CarbonFiber => "Carbon Fiber Composite",
        }
    }

    /// Look up the preset's properties
    pub fn properties(&self) -> MaterialProperties {
        let (elastic_modulus_pa, density_kg_m3) = match self {
            Material::Steel => (200e9, 7850.0),
            Material::Concrete => (30e9, 2400.0),
            Material::Wood => (12e9, 600.0),
            Material::Aluminum => (70e9, 2700.0),
            Material::CarbonFiber => (150e9, 1600.0),
        };
        MaterialProperties {
            elastic_modulus_pa,
            moment_of_inertia_m4: REFERENCE_MOMENT_OF_INERTIA_M4,
            density_kg_m3,
        }
    }

    /// Build section properties from this preset, replacing E and/or I
    /// when the caller supplies their own.
    pub fn section(
        &self,
        elastic_modulus_pa: Option<f64>,
        moment_of_inertia_m4: Option<f64>,
        extreme_fiber_m: Option<f64>,
    ) -> CalcResult<SectionProperties> {
        let props = self.properties();
        SectionProperties::new(
            elastic_modulus_pa.unwrap_or(props.elastic_modulus_pa),
            moment_of_inertia_m4.unwrap_or(props.moment_of_inertia_m4),
            extreme_fiber_m.unwrap_or(SectionProperties::DEFAULT_EXTREME_FIBER_M),
        )
    }

    /// Timber needs extra attention on long spans
    pub fn is_wood(&self) -> bool {
        matches!(self, Material::Wood)
    }
}

impl FromStr for Material {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.id() == needle)
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_properties() {
        let props = Material::Concrete.properties();
        assert_eq!(props.elastic_modulus_pa, 30e9);
        assert_eq!(props.density_kg_m3, 2400.0);
        assert_eq!(props.moment_of_inertia_m4, REFERENCE_MOMENT_OF_INERTIA_M4);
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("steel".parse::<Material>().unwrap(), Material::Steel);
        assert_eq!("Carbon Fiber".parse::<Material>().unwrap(), Material::CarbonFiber);
        assert_eq!("carbon-fiber".parse::<Material>().unwrap(), Material::CarbonFiber);

        let err = "unobtanium".parse::<Material>().unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_section_overrides() {
        let section = Material::Aluminum.section(None, Some(2.0e-5), None).unwrap();
        assert_eq!(section.elastic_modulus, 70e9);
        assert_eq!(section.moment_of_inertia, 2.0e-5);
        assert_eq!(section.extreme_fiber, SectionProperties::DEFAULT_EXTREME_FIBER_M);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Material::CarbonFiber).unwrap();
        assert_eq!(json, "\"carbon_fiber\"");

        let roundtrip: Material = serde_json::from_str("\"wood\"").unwrap();
        assert_eq!(roundtrip, Material::Wood);
        assert!(roundtrip.is_wood());
    }
}
