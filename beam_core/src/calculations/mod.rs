//! # Beam Statics Engine
//!
//! Each stage is a pure function over values produced by the one before:
//!
//! 1. [`loads::reduce`](crate::loads::reduce) - lump each load into a resultant
//! 2. [`reactions::solve_reactions`] - two vertical reactions from ΣF = 0, ΣM = 0
//! 3. [`field::generate_field`] - sampled shear and moment
//! 4. [`summary::summarize`] - extrema, positions and zero crossings
//! 5. [`deflection::compute_deflection`] - elastic curve and bending stress
//! 6. [`assessment::assess`] - serviceability checks
//!
//! [`analyze`] runs the whole pipeline on a validated [`BeamModel`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::{analyze, AnalysisSettings};
//! use beam_core::loads::Load;
//! use beam_core::model::{BeamModel, Support};
//!
//! let model = BeamModel::new(10.0, vec![Support::pin(2.0), Support::roller(8.0)])
//!     .unwrap()
//!     .with_load(Load::point(1.0, 50.0))
//!     .unwrap()
//!     .with_load(Load::point(6.0, 30.0))
//!     .unwrap()
//!     .with_load(Load::point(9.0, 40.0))
//!     .unwrap();
//!
//! let result = analyze(&model, &AnalysisSettings::default()).unwrap();
//! assert!((result.reaction_1 - 61.667).abs() < 1e-3);
//! assert!((result.reaction_2 - 58.333).abs() < 1e-3);
//! assert!(result.warnings.is_empty());
//! ```

pub mod assessment;
pub mod deflection;
pub mod field;
pub mod reactions;
pub mod summary;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use assessment::{assess, Assessment, Rating, Recommendation, ServiceabilityLimits};
pub use deflection::DeflectionProfile;
pub use field::InternalForceField;
pub use reactions::{Reactions, SupportReaction};
pub use summary::Summary;

use crate::errors::{CalcError, CalcResult};
use crate::loads::reduce_all;
use crate::model::BeamModel;

/// Default number of samples along the beam
pub const DEFAULT_RESOLUTION: usize = 1000;
/// Upper bound on samples per analysis
pub const MAX_RESOLUTION: usize = 1_000_000;

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Number of equally spaced samples (≥ 2)
    pub resolution: usize,
    /// Relative tolerance of the closing equilibrium check
    pub equilibrium_tolerance: f64,
    /// Produce deflection and stress when the model has a section
    pub compute_deflection: bool,
    pub limits: ServiceabilityLimits,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            resolution: DEFAULT_RESOLUTION,
            equilibrium_tolerance: 1e-6,
            compute_deflection: true,
            limits: ServiceabilityLimits::default(),
        }
    }
}

impl AnalysisSettings {
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Which closing residual failed the self-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquilibriumQuantity {
    Shear,
    Moment,
}

/// Closing residual larger than the allowed tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumWarning {
    pub quantity: EquilibriumQuantity,
    pub residual: f64,
    pub tolerance: f64,
}

/// Non-fatal condition reported alongside a result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    Equilibrium(EquilibriumWarning),
    /// A fixed support was solved as a pin (vertical reaction only)
    FixedSupportAsPin { support_id: Uuid, position: f64 },
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisWarning::Equilibrium(w) => {
                let name = match w.quantity {
                    EquilibriumQuantity::Shear => "shear",
                    EquilibriumQuantity::Moment => "moment",
                };
                write!(
                    f,
                    "Closing {} residual {:.3e} exceeds tolerance {:.3e}",
                    name, w.residual, w.tolerance
                )
            }
            AnalysisWarning::FixedSupportAsPin { position, .. } => write!(
                f,
                "Fixed support at {} was analyzed as a pin (no moment restraint)",
                position
            ),
        }
    }
}

/// Complete analysis of one beam model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Reaction at the left support (positive upward)
    pub reaction_1: f64,
    /// Reaction at the right support (positive upward)
    pub reaction_2: f64,
    /// Per-support reactions in the model's support order
    pub reactions: Reactions,
    pub x: Vec<f64>,
    pub shear: Vec<f64>,
    pub moment: Vec<f64>,
    /// Deflection (m, positive downward); present when a section was given
    pub deflection: Option<Vec<f64>>,
    pub slope: Option<Vec<f64>>,
    /// Extreme-fiber bending stress (Pa)
    pub stress: Option<Vec<f64>>,
    pub summary: Summary,
    /// Largest deflection by magnitude, signed
    pub max_deflection: Option<f64>,
    pub max_deflection_pos: Option<f64>,
    /// Largest bending stress by magnitude (Pa)
    pub max_stress: Option<f64>,
    pub warnings: Vec<AnalysisWarning>,
    pub assessment: Option<Assessment>,
}

impl AnalysisResult {
    /// Field view over the sampled arrays
    pub fn field(&self) -> InternalForceField {
        InternalForceField {
            x: self.x.clone(),
            shear: self.shear.clone(),
            moment: self.moment.clone(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the full pipeline on a validated model.
///
/// Fails only with `InvalidInput` for a resolution outside
/// `2..=MAX_RESOLUTION` or with `DegenerateSupport`; equilibrium residuals
/// and approximated supports come back as warnings.
pub fn analyze(model: &BeamModel, settings: &AnalysisSettings) -> CalcResult<AnalysisResult> {
    let beam = model.beam();
    let supports = model.supports();
    let loads = model.loads();

    let resultants = reduce_all(loads);
    let reactions = reactions::solve_reactions(beam, supports, &resultants)?;
    let field = field::generate_field(beam, supports, loads, &reactions, settings.resolution)?;

    let mut warnings = Vec::new();
    for support in supports.iter().filter(|s| s.kind.is_approximated()) {
        let warning = AnalysisWarning::FixedSupportAsPin {
            support_id: support.id,
            position: support.position,
        };
        warn!("{}", warning);
        warnings.push(warning);
    }
    for residual in field::check_equilibrium(&field, loads, &reactions, settings.equilibrium_tolerance) {
        let warning = AnalysisWarning::Equilibrium(residual);
        warn!("{}", warning);
        warnings.push(warning);
    }

    let summary = summary::summarize(&field)?;
    debug!(
        "field: {} samples, V in [{:.4}, {:.4}], M in [{:.4}, {:.4}]",
        field.len(),
        summary.min_shear,
        summary.max_shear,
        summary.min_moment,
        summary.max_moment
    );

    let (mut deflection, mut slope, mut stress) = (None, None, None);
    let (mut max_deflection, mut max_deflection_pos, mut max_stress) = (None, None, None);

    if let (true, Some(section)) = (settings.compute_deflection, model.section()) {
        let (a, b) = model.main_span();
        let profile = deflection::compute_deflection(&field, section, (a, b))?;
        let sigma = deflection::bending_stress(&field.moment, section);

        if let Some((i, v)) = profile.max_abs() {
            max_deflection = Some(v);
            max_deflection_pos = Some(field.x[i]);
        }
        max_stress = sigma.iter().map(|s| s.abs()).reduce(f64::max);

        deflection = Some(profile.deflection);
        slope = Some(profile.slope);
        stress = Some(sigma);
    }

    let (reaction_1, reaction_2) = match reactions.sorted() {
        Some((left, right)) => (left.force, right.force),
        None => return Err(CalcError::degenerate_support("Expected one reaction per support")),
    };

    let InternalForceField { x, shear, moment } = field;
    let mut result = AnalysisResult {
        reaction_1,
        reaction_2,
        reactions,
        x,
        shear,
        moment,
        deflection,
        slope,
        stress,
        summary,
        max_deflection,
        max_deflection_pos,
        max_stress,
        warnings,
        assessment: None,
    };
    result.assessment = assessment::assess(&result, beam, &settings.limits);
    Ok(result)
}
