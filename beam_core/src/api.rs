//! # Request/Response Contract
//!
//! camelCase JSON in and out, matching what web front ends post:
//!
//! ```json
//! {
//!   "beamLength": 10.0,
//!   "supports": [{"position": 2.0, "type": "pin"}, {"position": 8.0, "type": "roller"}],
//!   "loads": [
//!     {"type": "concentrated", "position": 1.0, "magnitude": 50.0},
//!     {"type": "varying", "startPos": 4.0, "endPos": 7.0, "startIntensity": 0.0, "endIntensity": 20.0}
//!   ],
//!   "material": "steel"
//! }
//! ```
//!
//! [`validate_request`] collects every problem at once instead of stopping
//! at the first, and adds design recommendations. [`handle_request`]
//! validates, builds a [`BeamModel`], runs [`analyze`] and flattens the
//! result into a [`BeamResponse`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::api::{handle_request, parse_request};
//! use beam_core::calculations::AnalysisSettings;
//!
//! let request = parse_request(r#"{
//!     "beamLength": 10,
//!     "supports": [{"position": 0, "type": "pin"}, {"position": 10, "type": "roller"}],
//!     "loads": [{"type": "concentrated", "position": 5, "magnitude": 100}]
//! }"#).unwrap();
//!
//! let response = handle_request(&request, &AnalysisSettings::default()).unwrap();
//! assert!((response.reactions.r1 - 50.0).abs() < 1e-9);
//! assert!((response.reactions.r2 - 50.0).abs() < 1e-9);
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::calculations::{
    analyze, AnalysisResult, AnalysisSettings, AnalysisWarning, Assessment, Summary, MAX_RESOLUTION,
};
use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;
use crate::materials::Material;
use crate::model::{BeamModel, Support, SupportKind};

/// Shortest beam accepted at the boundary (m)
pub const MIN_BEAM_LENGTH: f64 = 0.1;
/// Longest beam accepted at the boundary (m)
pub const MAX_BEAM_LENGTH: f64 = 1000.0;
/// Largest concentrated load magnitude accepted at the boundary
pub const MAX_POINT_MAGNITUDE: f64 = 1e6;

/// Analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamRequest {
    pub beam_length: f64,
    #[serde(default)]
    pub supports: Vec<SupportSpec>,
    #[serde(default)]
    pub loads: Vec<LoadSpec>,
    /// Material preset id; steel when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Overrides the preset's E (Pa)
    #[serde(default, alias = "elastic_modulus", skip_serializing_if = "Option::is_none")]
    pub elastic_modulus: Option<f64>,
    /// Overrides the preset's I (m⁴)
    #[serde(default, alias = "moment_of_inertia", skip_serializing_if = "Option::is_none")]
    pub moment_of_inertia: Option<f64>,
    /// Distance from neutral axis to extreme fiber (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extreme_fiber: Option<f64>,
    /// Number of samples along the beam
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<usize>,
}

/// Support as posted by a client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportSpec {
    pub position: f64,
    #[serde(rename = "type", default)]
    pub kind: SupportKind,
}

/// Load as posted by a client. `distributed` and `varying` carry the same
/// fields; a uniform load simply repeats its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum LoadSpec {
    Concentrated {
        position: f64,
        magnitude: f64,
    },
    Distributed {
        start_pos: f64,
        end_pos: f64,
        start_intensity: f64,
        end_intensity: f64,
    },
    Varying {
        start_pos: f64,
        end_pos: f64,
        start_intensity: f64,
        end_intensity: f64,
    },
}

impl LoadSpec {
    /// Convert into an engine load
    pub fn to_load(&self) -> Load {
        match *self {
            LoadSpec::Concentrated { position, magnitude } => Load::point(position, magnitude),
            LoadSpec::Distributed {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            }
            | LoadSpec::Varying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            } => Load::varying(start_pos, end_pos, start_intensity, end_intensity),
        }
    }
}

impl From<&Load> for LoadSpec {
    fn from(load: &Load) -> Self {
        match *load {
            Load::Concentrated { position, magnitude } => LoadSpec::Concentrated { position, magnitude },
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            } if start_intensity == end_intensity => LoadSpec::Distributed {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            },
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            } => LoadSpec::Varying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            },
        }
    }
}

impl BeamRequest {
    /// Material preset named by the request (steel when absent)
    pub fn material(&self) -> CalcResult<Material> {
        match &self.material {
            Some(name) => name.parse(),
            None => Ok(Material::default()),
        }
    }

    /// Build a validated engine model
    pub fn to_model(&self) -> CalcResult<BeamModel> {
        let section = self
            .material()?
            .section(self.elastic_modulus, self.moment_of_inertia, self.extreme_fiber)?;
        let supports = self
            .supports
            .iter()
            .map(|s| Support::new(s.position, s.kind))
            .collect();

        let mut model = BeamModel::new(self.beam_length, supports)?.with_section(section);
        for spec in &self.loads {
            model.add_load(spec.to_load())?;
        }
        Ok(model)
    }
}

/// Outcome of [`validate_request`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub recommendations: Vec<String>,
}

fn in_beam(position: f64, length: f64) -> bool {
    position.is_finite() && (0.0..=length).contains(&position)
}

/// Check a request and collect every problem found.
///
/// Recommendations are produced even for an invalid request.
pub fn validate_request(request: &BeamRequest) -> ValidationReport {
    let mut errors = Vec::new();
    let length = request.beam_length;

    if !(length.is_finite() && (MIN_BEAM_LENGTH..=MAX_BEAM_LENGTH).contains(&length)) {
        errors.push(format!(
            "Beam length must be between {}m and {}m",
            MIN_BEAM_LENGTH, MAX_BEAM_LENGTH
        ));
    }

    match request.supports.len() {
        0 | 1 => errors.push("Minimum 2 supports required".to_string()),
        2 => {
            let (a, b) = (request.supports[0].position, request.supports[1].position);
            if (a - b).abs() <= crate::model::POSITION_TOLERANCE {
                errors.push("Supports must be at distinct positions".to_string());
            }
        }
        n => errors.push(format!("Exactly 2 supports can be analyzed, got {}", n)),
    }
    for (i, support) in request.supports.iter().enumerate() {
        if !in_beam(support.position, length) {
            errors.push(format!("Support {} position invalid", i + 1));
        }
    }

    for (i, spec) in request.loads.iter().enumerate() {
        match *spec {
            LoadSpec::Concentrated { position, magnitude } => {
                if !in_beam(position, length) || !magnitude.is_finite() || magnitude.abs() > MAX_POINT_MAGNITUDE {
                    errors.push(format!("Load {}: Invalid position or magnitude", i + 1));
                }
            }
            LoadSpec::Distributed {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            }
            | LoadSpec::Varying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            } => {
                if !(in_beam(start_pos, length) && in_beam(end_pos, length) && start_pos < end_pos) {
                    errors.push(format!("Load {}: Invalid position range", i + 1));
                }
                if !start_intensity.is_finite() || !end_intensity.is_finite() {
                    errors.push(format!("Load {}: Invalid intensity", i + 1));
                }
            }
        }
    }

    if let Err(e) = request.material() {
        errors.push(e.to_string());
    }
    let positive = |v: Option<f64>| v.map_or(true, |v| v.is_finite() && v > 0.0);
    if !positive(request.elastic_modulus) {
        errors.push("Elastic modulus must be positive".to_string());
    }
    if !positive(request.moment_of_inertia) {
        errors.push("Moment of inertia must be positive".to_string());
    }
    if !positive(request.extreme_fiber) {
        errors.push("Extreme fiber distance must be positive".to_string());
    }
    match request.resolution {
        Some(n) if n < 2 => errors.push("Resolution must be at least 2".to_string()),
        Some(n) if n > MAX_RESOLUTION => errors.push(format!("Resolution must be at most {}", MAX_RESOLUTION)),
        _ => {}
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        recommendations: design_recommendations(request),
    }
}

/// Rule-of-thumb advice on the layout
pub fn design_recommendations(request: &BeamRequest) -> Vec<String> {
    let mut recommendations = Vec::new();
    let length = request.beam_length;

    if length > 20.0 {
        recommendations.push("Consider additional supports for long spans".to_string());
    }
    if request.loads.len() > 10 {
        recommendations.push("High load count - verify structural capacity".to_string());
    }
    if matches!(request.material(), Ok(m) if m.is_wood()) && length > 10.0 {
        recommendations.push("Wood beams may require steel reinforcement for long spans".to_string());
    }
    if request.loads.is_empty() {
        recommendations.push("No loads applied - all results will be zero".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Design looks optimal".to_string());
    }
    recommendations
}

/// Parse a request from JSON
pub fn parse_request(json: &str) -> CalcResult<BeamRequest> {
    Ok(serde_json::from_str(json)?)
}

/// Reaction pair in ascending support position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionPair {
    #[serde(rename = "R1")]
    pub r1: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
}

/// Flattened analysis result.
///
/// `max_*` fields are absolute maxima; the signed extrema are in `summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamResponse {
    pub reactions: ReactionPair,
    pub x: Vec<f64>,
    pub shear: Vec<f64>,
    pub moment: Vec<f64>,
    pub deflection: Vec<f64>,
    pub stress: Vec<f64>,
    pub max_shear: f64,
    pub max_moment: f64,
    pub max_deflection: f64,
    pub max_stress: f64,
    pub summary: Summary,
    pub warnings: Vec<AnalysisWarning>,
    pub assessment: Option<Assessment>,
}

impl From<AnalysisResult> for BeamResponse {
    fn from(result: AnalysisResult) -> Self {
        BeamResponse {
            reactions: ReactionPair {
                r1: result.reaction_1,
                r2: result.reaction_2,
            },
            max_shear: result.summary.max_abs_shear().abs(),
            max_moment: result.summary.max_abs_moment().abs(),
            max_deflection: result.max_deflection.map_or(0.0, f64::abs),
            max_stress: result.max_stress.unwrap_or(0.0),
            x: result.x,
            shear: result.shear,
            moment: result.moment,
            deflection: result.deflection.unwrap_or_default(),
            stress: result.stress.unwrap_or_default(),
            summary: result.summary,
            warnings: result.warnings,
            assessment: result.assessment,
        }
    }
}

/// Validate, build and analyze a request.
///
/// An invalid request fails with `InvalidInput` whose reason joins every
/// validation message with `" | "`.
pub fn handle_request(request: &BeamRequest, settings: &AnalysisSettings) -> CalcResult<BeamResponse> {
    let report = validate_request(request);
    if !report.valid {
        return Err(CalcError::invalid_input(
            "request",
            format!("{} problem(s)", report.errors.len()),
            report.errors.join(" | "),
        ));
    }

    let model = request.to_model()?;
    let settings = match request.resolution {
        Some(n) => settings.with_resolution(n),
        None => *settings,
    };

    info!(
        "analysis started: beam {}m, {} supports, {} loads",
        request.beam_length,
        request.supports.len(),
        request.loads.len()
    );
    let result = analyze(&model, &settings)?;
    Ok(BeamResponse::from(result))
}

/// Summary of the request echoed back in the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamInfo {
    pub length: f64,
    pub material: String,
    pub supports_count: usize,
    pub loads_count: usize,
}

impl BeamInfo {
    pub fn from_request(request: &BeamRequest) -> Self {
        BeamInfo {
            length: request.beam_length,
            material: request
                .material()
                .map(|m| m.id().to_string())
                .unwrap_or_else(|_| request.material.clone().unwrap_or_default()),
            supports_count: request.supports.len(),
            loads_count: request.loads.len(),
        }
    }
}

/// Top-level response document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status: String,
    pub timestamp: String,
    pub beam_info: BeamInfo,
    pub results: BeamResponse,
}

impl ResponseEnvelope {
    /// Wrap a successful response; `timestamp` is supplied by the caller
    pub fn success(request: &BeamRequest, results: BeamResponse, timestamp: impl Into<String>) -> Self {
        ResponseEnvelope {
            status: "success".to_string(),
            timestamp: timestamp.into(),
            beam_info: BeamInfo::from_request(request),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn overhang_request() -> BeamRequest {
        parse_request(
            r#"{
                "beamLength": 10,
                "supports": [{"position": 2, "type": "pin"}, {"position": 8, "type": "roller"}],
                "loads": [
                    {"type": "concentrated", "position": 1, "magnitude": 50},
                    {"type": "concentrated", "position": 6, "magnitude": 30},
                    {"type": "concentrated", "position": 9, "magnitude": 40}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_all_load_types() {
        let request = parse_request(
            r#"{
                "beamLength": 12,
                "supports": [{"position": 3, "type": "pinned"}, {"position": 9, "type": "fixed"}],
                "loads": [
                    {"type": "distributed", "startPos": 0, "endPos": 4, "startIntensity": 5, "endIntensity": 5},
                    {"type": "varying", "startPos": 6, "endPos": 10, "startIntensity": 15, "endIntensity": 5}
                ],
                "material": "Carbon Fiber",
                "elastic_modulus": 1.5e11
            }"#,
        )
        .unwrap();

        assert_eq!(request.supports[0].kind, SupportKind::Pin);
        assert_eq!(request.supports[1].kind, SupportKind::Fixed);
        assert_eq!(request.loads[0].to_load(), Load::uniform(0.0, 4.0, 5.0));
        assert_eq!(request.loads[1].to_load(), Load::varying(6.0, 10.0, 15.0, 5.0));
        assert_eq!(request.material().unwrap(), Material::CarbonFiber);
        assert_eq!(request.elastic_modulus, Some(1.5e11));
    }

    #[test]
    fn test_support_type_defaults_to_pin() {
        let spec: SupportSpec = serde_json::from_str(r#"{"position": 4}"#).unwrap();
        assert_eq!(spec.kind, SupportKind::Pin);
    }

    #[test]
    fn test_validation_collects_every_error() {
        let request = parse_request(
            r#"{
                "beamLength": 5000,
                "supports": [{"position": -1, "type": "pin"}],
                "loads": [
                    {"type": "concentrated", "position": 1, "magnitude": 2e6},
                    {"type": "varying", "startPos": 4, "endPos": 2, "startIntensity": 1, "endIntensity": 1}
                ],
                "material": "unobtainium"
            }"#,
        )
        .unwrap();

        let report = validate_request(&request);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Beam length must be between 0.1m and 1000m",
                "Minimum 2 supports required",
                "Support 1 position invalid",
                "Load 1: Invalid position or magnitude",
                "Load 2: Invalid position range",
                "Material not found: unobtainium",
            ]
        );
    }

    #[test]
    fn test_recommendations() {
        let mut request = overhang_request();
        assert_eq!(design_recommendations(&request), vec!["Design looks optimal"]);

        request.beam_length = 25.0;
        request.material = Some("wood".to_string());
        let recs = design_recommendations(&request);
        assert!(recs.contains(&"Consider additional supports for long spans".to_string()));
        assert!(recs.contains(&"Wood beams may require steel reinforcement for long spans".to_string()));

        request.loads.clear();
        assert!(design_recommendations(&request)
            .iter()
            .any(|r| r.starts_with("No loads applied")));
    }

    #[test]
    fn test_unloaded_beam_is_valid_with_zero_results() {
        let mut request = overhang_request();
        request.loads.clear();

        let report = validate_request(&request);
        assert!(report.valid, "{:?}", report.errors);
        assert_eq!(report.recommendations, vec!["No loads applied - all results will be zero"]);

        let response = handle_request(&request, &AnalysisSettings::default()).unwrap();
        assert_eq!(response.reactions.r1, 0.0);
        assert_eq!(response.reactions.r2, 0.0);
        assert!(response.shear.iter().chain(&response.moment).all(|v| *v == 0.0));
        assert_eq!(response.max_moment, 0.0);
        assert!(response.summary.shear_zero_crossings.is_empty());
    }

    #[test]
    fn test_handle_request_overhang() {
        let response = handle_request(&overhang_request(), &AnalysisSettings::default()).unwrap();

        assert_relative_eq!(response.reactions.r1, 61.6667, epsilon = 1e-3);
        assert_relative_eq!(response.reactions.r2, 58.3333, epsilon = 1e-3);
        assert_relative_eq!(response.max_shear, 50.0, epsilon = 1e-9);
        assert_relative_eq!(response.max_moment, 50.0, epsilon = 1.0);
        assert_eq!(response.deflection.len(), response.x.len());
        assert!(response.assessment.is_some());
    }

    #[test]
    fn test_handle_request_rejects_invalid() {
        let mut request = overhang_request();
        request.supports.pop();
        let err = handle_request(&request, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("Minimum 2 supports required"));
    }

    #[test]
    fn test_request_resolution_override() {
        let mut request = overhang_request();
        request.resolution = Some(101);
        let response = handle_request(&request, &AnalysisSettings::default()).unwrap();
        assert_eq!(response.x.len(), 101);
    }

    #[test]
    fn test_oversized_resolution_is_rejected() {
        let mut request = overhang_request();
        request.resolution = Some(usize::MAX);
        let report = validate_request(&request);
        assert!(!report.valid);
        assert_eq!(report.errors, vec![format!("Resolution must be at most {}", MAX_RESOLUTION)]);

        let err = handle_request(&request, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_response_json_keys() {
        let response = handle_request(&overhang_request(), &AnalysisSettings::default()).unwrap();
        let envelope = ResponseEnvelope::success(&overhang_request(), response, "2024-01-01T00:00:00");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["beamInfo"]["material"], "steel");
        assert_eq!(json["beamInfo"]["supportsCount"], 2);
        assert!(json["results"]["reactions"]["R1"].is_number());
        assert!(json["results"]["maxShear"].is_number());

        let back: ResponseEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(back.beam_info, envelope.beam_info);
        assert_eq!(back.results.x.len(), envelope.results.x.len());
    }

    #[test]
    fn test_load_spec_from_load() {
        assert!(matches!(
            LoadSpec::from(&Load::uniform(0.0, 2.0, 3.0)),
            LoadSpec::Distributed { .. }
        ));
        assert!(matches!(
            LoadSpec::from(&Load::varying(0.0, 2.0, 0.0, 3.0)),
            LoadSpec::Varying { .. }
        ));
    }
}
