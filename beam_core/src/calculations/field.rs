//! Internal-Force Field Generator
//!
//! Sweeps the beam axis at a fixed number of equally spaced samples.
//!
//! - **Shear** at `x` by superposition: every reaction at or left of `x`
//!   adds `+R`, every point load at or left of `x` subtracts its magnitude,
//!   and every distributed load subtracts only the part of it lying left of
//!   `x`. Distributed loads are never lumped here, so shear varies smoothly
//!   across them.
//! - **Moment** by cumulative trapezoidal quadrature of shear
//!   (`dM/dx = V`), starting from `M(0) = 0`.
//!
//! ## Sign Convention
//! - Positive shear: net upward force on the part left of the section
//! - Positive moment: sagging (tension on the bottom fiber)

use serde::{Deserialize, Serialize};

use super::reactions::Reactions;
use super::{EquilibriumQuantity, EquilibriumWarning, MAX_RESOLUTION};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{partial_resultant, Load};
use crate::model::{Beam, Support, POSITION_TOLERANCE};

/// Sampled shear and moment along the beam. All three vectors are
/// index-aligned and ordered by ascending `x`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InternalForceField {
    pub x: Vec<f64>,
    pub shear: Vec<f64>,
    pub moment: Vec<f64>,
}

impl InternalForceField {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Distance between consecutive samples
    pub fn spacing(&self) -> f64 {
        if self.x.len() < 2 {
            0.0
        } else {
            self.x[1] - self.x[0]
        }
    }

    /// Shear at the right end; zero for a beam in equilibrium
    pub fn closing_shear(&self) -> f64 {
        self.shear.last().copied().unwrap_or(0.0)
    }

    /// Moment at the right end; zero when no end moment is applied
    pub fn closing_moment(&self) -> f64 {
        self.moment.last().copied().unwrap_or(0.0)
    }
}

/// Equally spaced samples over `[0, length]`, both ends included
pub fn sample_positions(length: f64, resolution: usize) -> Vec<f64> {
    let last = (resolution - 1) as f64;
    (0..resolution)
        .map(|i| length * i as f64 / last)
        .collect()
}

/// Shear at a single section by superposition of reactions and loads
pub fn shear_at(x: f64, reactions: &Reactions, loads: &[Load]) -> f64 {
    let from_reactions: f64 = reactions
        .supports
        .iter()
        .filter(|r| r.position <= x + POSITION_TOLERANCE)
        .map(|r| r.force)
        .sum();
    let from_loads: f64 = loads.iter().map(|l| partial_resultant(l, x).magnitude).sum();
    from_reactions - from_loads
}

/// Generate the shear and moment field.
///
/// `resolution` is the number of samples, between 2 and [`MAX_RESOLUTION`]. The
/// supports are only used to check that `reactions` belong to them.
pub fn generate_field(
    beam: &Beam,
    supports: &[Support],
    loads: &[Load],
    reactions: &Reactions,
    resolution: usize,
) -> CalcResult<InternalForceField> {
    if resolution < 2 {
        return Err(CalcError::invalid_input(
            "resolution",
            resolution.to_string(),
            "At least 2 samples are needed to span the beam",
        ));
    }
    if resolution > MAX_RESOLUTION {
        return Err(CalcError::invalid_input(
            "resolution",
            resolution.to_string(),
            format!("At most {} samples are allowed", MAX_RESOLUTION),
        ));
    }
    if supports.len() != reactions.supports.len()
        || supports
            .iter()
            .any(|s| reactions.for_support(s.id).is_none())
    {
        return Err(CalcError::degenerate_support(
            "Reactions were solved for a different set of supports",
        ));
    }

    let x = sample_positions(beam.length, resolution);
    let shear: Vec<f64> = x.iter().map(|&xi| shear_at(xi, reactions, loads)).collect();

    let mut moment = Vec::with_capacity(resolution);
    moment.push(0.0);
    for i in 1..resolution {
        let dx = x[i] - x[i - 1];
        moment.push(moment[i - 1] + (shear[i - 1] + shear[i]) / 2.0 * dx);
    }

    Ok(InternalForceField { x, shear, moment })
}

/// Closing-residual self-check.
///
/// Shear at the right end must vanish to within `tolerance · ΣF`, where `ΣF`
/// sums the magnitudes of every load and reaction. Moment at the right end
/// must vanish to within `ΣF · (tolerance · L + Δx)`: the trapezoid rule
/// smears each shear step over one sample interval, which leaves up to
/// half a step times `Δx` in the closing moment.
pub fn check_equilibrium(
    field: &InternalForceField,
    loads: &[Load],
    reactions: &Reactions,
    tolerance: f64,
) -> Vec<EquilibriumWarning> {
    let scale: f64 = loads.iter().map(|l| l.resultant().magnitude.abs()).sum::<f64>()
        + reactions.supports.iter().map(|r| r.force.abs()).sum::<f64>();
    let length = field.x.last().copied().unwrap_or(0.0);

    let checks = [
        (EquilibriumQuantity::Shear, field.closing_shear(), tolerance * scale),
        (
            EquilibriumQuantity::Moment,
            field.closing_moment(),
            scale * (tolerance * length + field.spacing()),
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, residual, limit)| residual.abs() > limit.max(f64::EPSILON))
        .map(|(quantity, residual, limit)| EquilibriumWarning {
            quantity,
            residual,
            tolerance: limit,
        })
        .collect()
}

/// Cumulative trapezoidal integral of `y` over `x`, starting at zero
pub(crate) fn cumulative_trapezoid(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(x.len());
    if x.is_empty() {
        return out;
    }
    out.push(0.0);
    for i in 1..x.len() {
        out.push(out[i - 1] + (y[i - 1] + y[i]) / 2.0 * (x[i] - x[i - 1]));
    }
    out
}

/// Linear interpolation on ascending `xs`; `None` outside the sampled range
pub(crate) fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let first = xs[0];
    let last = xs[xs.len() - 1];
    if x < first - POSITION_TOLERANCE || x > last + POSITION_TOLERANCE {
        return None;
    }
    if xs.len() == 1 {
        return Some(ys[0]);
    }
    // Index of the first sample strictly greater than x, clamped into range
    let upper = xs.partition_point(|&xi| xi <= x).clamp(1, xs.len() - 1);
    let (x0, x1) = (xs[upper - 1], xs[upper]);
    let (y0, y1) = (ys[upper - 1], ys[upper]);
    let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    Some(y0 + (y1 - y0) * t)
}
