//! # Unit Types
//!
//! SI wrappers for the serviceability checks. The engine itself works in
//! plain `f64` (N, m, Pa); limits are stated in millimetres and megapascals,
//! so conversions into those go through these newtypes.
//!
//! ```rust
//! use beam_core::units::{Meters, Millimeters, Pascals, Megapascals};
//!
//! let mm = Millimeters::from(Meters(0.012));
//! assert!((mm.0 - 12.0).abs() < 1e-9);
//!
//! let stress = Megapascals::from(Pascals(250e6));
//! assert_eq!(stress.0, 250.0);
//! ```

use serde::{Deserialize, Serialize};

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1e6)
    }
}
