//! # Loads
//!
//! Applied loads as a closed tagged union, plus the reducer that lumps each
//! load into a statically equivalent [`Resultant`].
//!
//! ## Sign Convention
//! - Positive magnitude / intensity: downward
//! - Positions measured from the left end of the beam (m)
//!
//! ## Load Shapes
//!
//! A [`Load::UniformlyVarying`] covers every linear distribution:
//!
//! | start / end intensity | shape |
//! |---|---|
//! | `w, w` | uniform |
//! | `0, w` or `w, 0` | triangular |
//! | `w1, w2` | trapezoidal |
//!
//! ## Example
//!
//! ```rust
//! use beam_core::loads::{Load, LoadShape};
//!
//! let tri = Load::varying(0.0, 4.0, 0.0, 20.0);
//! assert_eq!(tri.shape(), LoadShape::Triangular);
//!
//! let r = tri.resultant();
//! assert_eq!(r.magnitude, 40.0);
//! assert!((r.centroid - 8.0 / 3.0).abs() < 1e-12);
//! ```

pub mod resultant;

pub use resultant::{partial_resultant, reduce, reduce_all, Resultant};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::model::{Beam, POSITION_TOLERANCE};

/// A load applied to the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    /// Point force at `position`
    Concentrated { position: f64, magnitude: f64 },

    /// Linearly varying line load from `start_pos` to `end_pos`
    UniformlyVarying {
        start_pos: f64,
        end_pos: f64,
        /// Intensity at `start_pos` (force per unit length)
        start_intensity: f64,
        /// Intensity at `end_pos` (force per unit length)
        end_intensity: f64,
    },
}

/// Classification of a load's distribution, for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadShape {
    Point,
    Uniform,
    Triangular,
    Trapezoidal,
}

impl LoadShape {
    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadShape::Point => "Point",
            LoadShape::Uniform => "Uniform",
            LoadShape::Triangular => "Triangular",
            LoadShape::Trapezoidal => "Trapezoidal",
        }
    }
}

impl Load {
    /// Create a concentrated load
    pub fn point(position: f64, magnitude: f64) -> Self {
        Load::Concentrated { position, magnitude }
    }

    /// Create a uniform line load of intensity `w` over `[start, end]`
    pub fn uniform(start_pos: f64, end_pos: f64, w: f64) -> Self {
        Self::varying(start_pos, end_pos, w, w)
    }

    /// Create a linearly varying line load
    pub fn varying(start_pos: f64, end_pos: f64, start_intensity: f64, end_intensity: f64) -> Self {
        Load::UniformlyVarying {
            start_pos,
            end_pos,
            start_intensity,
            end_intensity,
        }
    }

    /// Classify the distribution
    pub fn shape(&self) -> LoadShape {
        match *self {
            Load::Concentrated { .. } => LoadShape::Point,
            Load::UniformlyVarying {
                start_intensity: w1,
                end_intensity: w2,
                ..
            } => {
                if (w1 - w2).abs() < 1e-12 {
                    LoadShape::Uniform
                } else if w1 == 0.0 || w2 == 0.0 {
                    LoadShape::Triangular
                } else {
                    LoadShape::Trapezoidal
                }
            }
        }
    }

    /// Extent along the beam `(start, end)`; a point load has `start == end`
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            Load::Concentrated { position, .. } => (position, position),
            Load::UniformlyVarying {
                start_pos, end_pos, ..
            } => (start_pos, end_pos),
        }
    }

    /// Check the load against the beam.
    ///
    /// Fails with `InvalidLoad` for a reversed or empty extent, a position
    /// outside `[0, length]`, or a non-finite value.
    pub fn validate(&self, beam: &Beam) -> CalcResult<()> {
        match *self {
            Load::Concentrated { position, magnitude } => {
                if !magnitude.is_finite() {
                    return Err(CalcError::invalid_load("Magnitude must be a finite number"));
                }
                check_position(beam, position)
            }
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            } => {
                if !start_intensity.is_finite() || !end_intensity.is_finite() {
                    return Err(CalcError::invalid_load("Intensities must be finite numbers"));
                }
                check_position(beam, start_pos)?;
                check_position(beam, end_pos)?;
                if end_pos <= start_pos {
                    return Err(CalcError::invalid_load(format!(
                        "Start position {} must be less than end position {}",
                        start_pos, end_pos
                    )));
                }
                Ok(())
            }
        }
    }

    /// Portion of the load's force applied over `[0, x]`.
    ///
    /// A concentrated load counts in full once `x` reaches it. A varying
    /// load switches on gradually: the area of its intensity diagram from
    /// `start_pos` up to `min(x, end_pos)`.
    pub fn applied_up_to(&self, x: f64) -> f64 {
        match *self {
            Load::Concentrated { position, magnitude } => {
                if position <= x + POSITION_TOLERANCE {
                    magnitude
                } else {
                    0.0
                }
            }
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity: w1,
                end_intensity: w2,
            } => {
                if x <= start_pos {
                    0.0
                } else if x >= end_pos {
                    (w1 + w2) / 2.0 * (end_pos - start_pos)
                } else {
                    let u = x - start_pos;
                    (w1 + self.intensity_at(x)) / 2.0 * u
                }
            }
        }
    }

    /// Line-load intensity at `x` (zero outside the load and for point loads)
    pub fn intensity_at(&self, x: f64) -> f64 {
        match *self {
            Load::Concentrated { .. } => 0.0,
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity: w1,
                end_intensity: w2,
            } => {
                if x < start_pos || x > end_pos {
                    0.0
                } else {
                    w1 + (w2 - w1) * (x - start_pos) / (end_pos - start_pos)
                }
            }
        }
    }

    /// One-line description for reports, e.g. `Triangular 0.00 -> 20.00 over [0.00, 4.00]`
    pub fn describe(&self) -> String {
        match *self {
            Load::Concentrated { position, magnitude } => {
                format!("Point {:.2} at {:.2}", magnitude, position)
            }
            Load::UniformlyVarying {
                start_pos,
                end_pos,
                start_intensity,
                end_intensity,
            } => format!(
                "{} {:.2} -> {:.2} over [{:.2}, {:.2}]",
                self.shape().display_name(),
                start_intensity,
                end_intensity,
                start_pos,
                end_pos
            ),
        }
    }
}

fn check_position(beam: &Beam, position: f64) -> CalcResult<()> {
    if beam.contains(position) {
        Ok(())
    } else {
        Err(CalcError::invalid_load(format!(
            "Position {} is outside beam length {}",
            position, beam.length
        )))
    }
}
