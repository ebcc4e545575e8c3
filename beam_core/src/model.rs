//! # Geometry & Load Model
//!
//! Immutable description of the beam handed to [`analyze`](crate::calculations::analyze):
//! its length, its two supports, the applied loads, and (optionally) the
//! section stiffness needed for deflection and stress.
//!
//! Everything is validated when it enters the model. The numerical core
//! relies on that and never re-checks bounds.
//!
//! ## Structure
//!
//! ```text
//! BeamModel
//! ├── beam: Beam (length)
//! ├── supports: [Support; 2] (id, position, kind) in caller order
//! ├── loads: Vec<Load>
//! └── section: Option<SectionProperties> (E, I, c)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::model::{BeamModel, Support};
//! use beam_core::loads::Load;
//!
//! let model = BeamModel::new(10.0, vec![Support::pin(2.0), Support::roller(8.0)])
//!     .unwrap()
//!     .with_load(Load::point(1.0, 50.0))
//!     .unwrap();
//!
//! assert_eq!(model.main_span(), (2.0, 8.0));
//! assert!(model.is_overhang(1.0));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;

/// Positions closer than this are treated as the same point (m)
pub const POSITION_TOLERANCE: f64 = 1e-9;

// =============================================================================
// BEAM
// =============================================================================

/// The beam axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// Total length (m)
    pub length: f64,
}

impl Beam {
    /// Create a beam, rejecting non-positive or non-finite lengths
    pub fn new(length: f64) -> CalcResult<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(CalcError::invalid_input(
                "length",
                length.to_string(),
                "Beam length must be a positive number",
            ));
        }
        Ok(Beam { length })
    }

    /// Whether `position` lies on the beam (inclusive of both ends)
    pub fn contains(&self, position: f64) -> bool {
        position.is_finite()
            && position >= -POSITION_TOLERANCE
            && position <= self.length + POSITION_TOLERANCE
    }
}

// =============================================================================
// SUPPORTS
// =============================================================================

/// Support condition.
///
/// Pin and roller each provide a single vertical reaction. `Fixed` is
/// accepted for compatibility with inputs that offer it, but the engine
/// solves it exactly like a pin and reports a warning; no moment reaction
/// is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    #[default]
    #[serde(alias = "pinned")]
    Pin,
    Roller,
    Fixed,
}

impl SupportKind {
    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Pin => "Pin",
            SupportKind::Roller => "Roller",
            SupportKind::Fixed => "Fixed",
        }
    }

    /// Whether the solver treats this support differently from what its
    /// name implies
    pub fn is_approximated(&self) -> bool {
        matches!(self, SupportKind::Fixed)
    }
}

impl std::fmt::Display for SupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A support at a point on the beam.
///
/// The `id` is the support's identity: reactions are reported against it,
/// whatever order the supports were given in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    pub id: Uuid,
    /// Distance from the left end of the beam (m)
    pub position: f64,
    pub kind: SupportKind,
}

impl Support {
    /// Create a support with a fresh id
    pub fn new(position: f64, kind: SupportKind) -> Self {
        Support {
            id: Uuid::new_v4(),
            position,
            kind,
        }
    }

    /// Create a pin support
    pub fn pin(position: f64) -> Self {
        Self::new(position, SupportKind::Pin)
    }

    /// Create a roller support
    pub fn roller(position: f64) -> Self {
        Self::new(position, SupportKind::Roller)
    }

    /// Replace the generated id with a caller-owned one
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

// =============================================================================
// SECTION
// =============================================================================

/// Cross-section stiffness used by the deflection estimator and for
/// bending stress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Modulus of elasticity E (Pa)
    pub elastic_modulus: f64,
    /// Second moment of area I (m⁴)
    pub moment_of_inertia: f64,
    /// Distance from the neutral axis to the extreme fiber c (m)
    pub extreme_fiber: f64,
}

impl SectionProperties {
    /// Extreme fiber distance assumed when the caller gives none (m)
    pub const DEFAULT_EXTREME_FIBER_M: f64 = 0.1;

    /// Create section properties; all three values must be positive
    pub fn new(elastic_modulus: f64, moment_of_inertia: f64, extreme_fiber: f64) -> CalcResult<Self> {
        for (field, value) in [
            ("elastic_modulus", elastic_modulus),
            ("moment_of_inertia", moment_of_inertia),
            ("extreme_fiber", extreme_fiber),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Section properties must be positive",
                ));
            }
        }
        Ok(SectionProperties {
            elastic_modulus,
            moment_of_inertia,
            extreme_fiber,
        })
    }

    /// Flexural rigidity EI (N·m²)
    pub fn flexural_rigidity(&self) -> f64 {
        self.elastic_modulus * self.moment_of_inertia
    }

    /// Elastic section modulus S = I / c (m³)
    pub fn section_modulus(&self) -> f64 {
        self.moment_of_inertia / self.extreme_fiber
    }
}

// =============================================================================
// BEAM MODEL
// =============================================================================

/// Validated beam description: one beam, exactly two supports, any number
/// of loads.
///
/// Fields are private so a model can only be built through the validating
/// constructors. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBeamModel", into = "RawBeamModel")]
pub struct BeamModel {
    beam: Beam,
    supports: Vec<Support>,
    loads: Vec<Load>,
    section: Option<SectionProperties>,
}

impl BeamModel {
    /// Create a model with the given length and supports and no loads.
    ///
    /// Fails with `InvalidInput` for a bad length or a support off the
    /// beam, and with `DegenerateSupport` unless there are exactly two
    /// supports at distinct positions.
    pub fn new(length: f64, supports: Vec<Support>) -> CalcResult<Self> {
        let beam = Beam::new(length)?;
        validate_supports(&beam, &supports)?;
        Ok(BeamModel {
            beam,
            supports,
            loads: Vec::new(),
            section: None,
        })
    }

    /// Add a load and return self (builder pattern)
    pub fn with_load(mut self, load: Load) -> CalcResult<Self> {
        self.add_load(load)?;
        Ok(self)
    }

    /// Set section properties and return self (builder pattern)
    pub fn with_section(mut self, section: SectionProperties) -> Self {
        self.section = Some(section);
        self
    }

    /// Add a load after checking it against the beam bounds
    pub fn add_load(&mut self, load: Load) -> CalcResult<()> {
        load.validate(&self.beam)
            .map_err(|e| e.at_load_index(self.loads.len()))?;
        self.loads.push(load);
        Ok(())
    }

    /// Replace (or clear) the section properties
    pub fn set_section(&mut self, section: Option<SectionProperties>) {
        self.section = section;
    }

    pub fn beam(&self) -> &Beam {
        &self.beam
    }

    pub fn length(&self) -> f64 {
        self.beam.length
    }

    /// Supports in caller order
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn section(&self) -> Option<&SectionProperties> {
        self.section.as_ref()
    }

    /// Main span `(a, b)` with `a < b`
    pub fn main_span(&self) -> (f64, f64) {
        let (p, q) = (self.supports[0].position, self.supports[1].position);
        if p <= q {
            (p, q)
        } else {
            (q, p)
        }
    }

    /// Whether `x` lies on an overhang (outside the main span)
    pub fn is_overhang(&self, x: f64) -> bool {
        let (a, b) = self.main_span();
        x < a - POSITION_TOLERANCE || x > b + POSITION_TOLERANCE
    }

    /// Overhang lengths `(left, right)`
    pub fn overhangs(&self) -> (f64, f64) {
        let (a, b) = self.main_span();
        (a, self.beam.length - b)
    }
}

fn validate_supports(beam: &Beam, supports: &[Support]) -> CalcResult<()> {
    if supports.len() < 2 {
        return Err(CalcError::degenerate_support(format!(
            "At least 2 supports are required for static determinacy, got {}",
            supports.len()
        )));
    }
    if supports.len() > 2 {
        return Err(CalcError::degenerate_support(format!(
            "Only two-support beams are statically determinate here, got {} supports",
            supports.len()
        )));
    }
    for (i, support) in supports.iter().enumerate() {
        if !beam.contains(support.position) {
            return Err(CalcError::invalid_input(
                format!("supports[{}].position", i),
                support.position.to_string(),
                format!("Support must lie within the beam [0, {}]", beam.length),
            ));
        }
    }
    if (supports[0].position - supports[1].position).abs() <= POSITION_TOLERANCE {
        return Err(CalcError::degenerate_support(format!(
            "Both supports are at {} - the span has zero length",
            supports[0].position
        )));
    }
    Ok(())
}

/// Unvalidated serde shape of [`BeamModel`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBeamModel {
    length: f64,
    supports: Vec<Support>,
    #[serde(default)]
    loads: Vec<Load>,
    #[serde(default)]
    section: Option<SectionProperties>,
}

impl TryFrom<RawBeamModel> for BeamModel {
    type Error = CalcError;

    fn try_from(raw: RawBeamModel) -> CalcResult<Self> {
        let mut model = BeamModel::new(raw.length, raw.supports)?;
        for load in raw.loads {
            model.add_load(load)?;
        }
        model.section = raw.section;
        Ok(model)
    }
}

impl From<BeamModel> for RawBeamModel {
    fn from(model: BeamModel) -> Self {
        RawBeamModel {
            length: model.beam.length,
            supports: model.supports,
            loads: model.loads,
            section: model.section,
        }
    }
}
