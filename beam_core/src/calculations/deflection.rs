//! Deflection and Bending Stress
//!
//! Elastic curve by double integration of curvature. With deflection `v`
//! positive downward and sagging moment positive:
//!
//! ```text
//! v''(x) = -M(x) / EI
//! θ(x)   = ∫ -M/EI dx + C1
//! v(x)   = ∫ θ dx + C1·x + C0
//! ```
//!
//! `C0` and `C1` come from `v = 0` at both supports, which makes the curve
//! valid over the overhangs as well as the main span. Bending stress at the
//! extreme fiber is `σ = M·c / I`.

use serde::{Deserialize, Serialize};

use super::field::{cumulative_trapezoid, interpolate, InternalForceField};
use crate::errors::{CalcError, CalcResult};
use crate::model::SectionProperties;

/// Elastic curve sampled at the field's positions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeflectionProfile {
    /// Deflection (m, positive downward)
    pub deflection: Vec<f64>,
    /// Slope dv/dx (rad)
    pub slope: Vec<f64>,
}

impl DeflectionProfile {
    /// Largest deflection by magnitude and the index where it occurs.
    ///
    /// The signed value is returned; ties go to the first occurrence.
    pub fn max_abs(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.deflection.iter().enumerate() {
            match best {
                Some((_, b)) if v.abs() <= b.abs() => {}
                _ => best = Some((i, v)),
            }
        }
        best
    }
}

/// Integrate the moment diagram twice, pinning the curve at `supports`.
///
/// `supports` holds the two support positions in any order.
pub fn compute_deflection(
    field: &InternalForceField,
    section: &SectionProperties,
    supports: (f64, f64),
) -> CalcResult<DeflectionProfile> {
    if field.is_empty() || field.moment.len() != field.x.len() {
        return Err(CalcError::EmptyField);
    }
    let ei = section.flexural_rigidity();
    if !(ei.is_finite() && ei > 0.0) {
        return Err(CalcError::invalid_input(
            "flexural_rigidity",
            ei.to_string(),
            "EI must be a positive finite number",
        ));
    }

    let (a, b) = if supports.0 <= supports.1 {
        supports
    } else {
        (supports.1, supports.0)
    };

    let curvature: Vec<f64> = field.moment.iter().map(|m| -m / ei).collect();
    let raw_slope = cumulative_trapezoid(&field.x, &curvature);
    let raw_deflection = cumulative_trapezoid(&field.x, &raw_slope);

    let (va, vb) = match (
        interpolate(&field.x, &raw_deflection, a),
        interpolate(&field.x, &raw_deflection, b),
    ) {
        (Some(va), Some(vb)) => (va, vb),
        _ => {
            return Err(CalcError::degenerate_support(format!(
                "Supports at {} and {} fall outside the sampled beam",
                a, b
            )))
        }
    };
    if b - a <= 0.0 {
        return Err(CalcError::degenerate_support("Both supports share one position"));
    }

    // Rigid-body correction so that v(a) = v(b) = 0
    let c1 = -(vb - va) / (b - a);
    let c0 = -va - c1 * a;

    let deflection = field
        .x
        .iter()
        .zip(&raw_deflection)
        .map(|(&x, &v)| v + c1 * x + c0)
        .collect();
    let slope = raw_slope.iter().map(|&t| t + c1).collect();

    Ok(DeflectionProfile { deflection, slope })
}

/// Extreme-fiber bending stress `σ = M·c / I` at every sample (Pa)
pub fn bending_stress(moment: &[f64], section: &SectionProperties) -> Vec<f64> {
    let factor = section.extreme_fiber / section.moment_of_inertia;
    moment.iter().map(|m| m * factor).collect()
}
