//! Load Reducer
//!
//! Lumps each load into a single statically equivalent force for the
//! reaction solver. The field generator does not use these; it integrates
//! distributed loads piece by piece (see [`Load::applied_up_to`]).

use serde::{Deserialize, Serialize};

use super::Load;
use crate::errors::CalcResult;
use crate::model::Beam;

/// Statically equivalent force of a load.
///
/// `couple` is zero for every load with a non-zero net force. A linearly
/// varying load whose intensities cancel (`w1 = -w2`) has no net force but
/// still turns the beam; that pure moment (clockwise positive, same sense
/// as a downward force right of the reference point) is carried here so the
/// moment equation stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resultant {
    /// Net force (positive downward)
    pub magnitude: f64,
    /// Line of action (m from the left end)
    pub centroid: f64,
    /// Residual pure moment
    #[serde(default)]
    pub couple: f64,
}

impl Resultant {
    /// Resultant of a point force
    pub fn point(position: f64, magnitude: f64) -> Self {
        Resultant {
            magnitude,
            centroid: position,
            couple: 0.0,
        }
    }

    /// Moment of this resultant about `point`
    pub fn moment_about(&self, point: f64) -> f64 {
        self.magnitude * (self.centroid - point) + self.couple
    }
}

impl Load {
    /// Resultant of this load.
    ///
    /// For a varying load of length `L` with end intensities `w1`, `w2`:
    /// - magnitude = (w1 + w2) / 2 · L
    /// - centroid offset from start = L/3 · (w1 + 2·w2) / (w1 + w2)
    pub fn resultant(&self) -> Resultant {
        match *self {
            Load::Concentrated { position, magnitude } => Resultant::point(position, magnitude),
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity: w1,
                end_intensity: w2,
            } => {
                let length = end_pos - start_pos;
                let magnitude = (w1 + w2) / 2.0 * length;
                let scale = w1.abs() + w2.abs();

                if scale == 0.0 {
                    return Resultant::point(start_pos + length / 2.0, 0.0);
                }

                if (w1 + w2).abs() <= 1e-12 * scale {
                    // Net force cancels; keep the first moment about the
                    // midpoint as a couple: L²(w1 + 2·w2)/6 - F·L/2
                    let first_moment = length * length * (w1 + 2.0 * w2) / 6.0;
                    return Resultant {
                        magnitude,
                        centroid: start_pos + length / 2.0,
                        couple: first_moment - magnitude * length / 2.0,
                    };
                }

                let offset = length / 3.0 * (w1 + 2.0 * w2) / (w1 + w2);
                Resultant {
                    magnitude,
                    centroid: start_pos + offset,
                    couple: 0.0,
                }
            }
        }
    }
}

/// Reduce a load to its resultant after checking it against the beam.
///
/// Fails with `InvalidLoad` when `end_pos <= start_pos` or a position lies
/// outside the beam.
pub fn reduce(load: &Load, beam: &Beam) -> CalcResult<Resultant> {
    load.validate(beam)?;
    Ok(load.resultant())
}

/// Reduce every load of an already validated model
pub fn reduce_all(loads: &[Load]) -> Vec<Resultant> {
    loads.iter().map(Load::resultant).collect()
}

/// Resultant of the part of `load` lying in `[0, x]`.
///
/// A concentrated load is included whole once `x` reaches it. A varying
/// load is cut at `x` and the remaining piece is itself a linearly varying
/// load, so its magnitude equals [`Load::applied_up_to`].
pub fn partial_resultant(load: &Load, x: f64) -> Resultant {
    match *load {
        Load::Concentrated { position, .. } => Resultant::point(position, load.applied_up_to(x)),
        Load::UniformlyVarying {
            start_pos,
            end_pos,
            start_intensity,
            ..
        } => {
            if x <= start_pos {
                return Resultant::point(start_pos, 0.0);
            }
            let cut = x.min(end_pos);
            Load::varying(start_pos, cut, start_intensity, load.intensity_at(cut)).resultant()
        }
    }
}
