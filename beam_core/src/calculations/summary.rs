//! Summary/Extrema Extractor
//!
//! Scans a sampled field once for signed extrema and sign changes. Ties go
//! to the first occurrence in ascending `x`.

use serde::{Deserialize, Serialize};

use super::field::InternalForceField;
use crate::errors::{CalcError, CalcResult};

/// Extrema of the shear and moment diagrams with their positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub max_shear: f64,
    pub max_shear_pos: f64,
    pub min_shear: f64,
    pub min_shear_pos: f64,
    pub max_moment: f64,
    pub max_moment_pos: f64,
    pub min_moment: f64,
    pub min_moment_pos: f64,
    /// Positions where shear changes sign (candidate moment extrema)
    #[serde(default)]
    pub shear_zero_crossings: Vec<f64>,
    /// Positions where moment changes sign (inflection points)
    #[serde(default)]
    pub moment_zero_crossings: Vec<f64>,
}

impl Summary {
    /// Largest shear magnitude, keeping its sign
    pub fn max_abs_shear(&self) -> f64 {
        larger_magnitude(self.max_shear, self.min_shear)
    }

    /// Largest moment magnitude, keeping its sign
    pub fn max_abs_moment(&self) -> f64 {
        larger_magnitude(self.max_moment, self.min_moment)
    }
}

fn larger_magnitude(max: f64, min: f64) -> f64 {
    if min.abs() > max.abs() {
        min
    } else {
        max
    }
}

/// Signed extremum with its index, first occurrence wins
#[derive(Debug, Clone, Copy)]
struct Extremum {
    max: (usize, f64),
    min: (usize, f64),
}

fn extremum(values: &[f64]) -> Extremum {
    let mut ext = Extremum {
        max: (0, values[0]),
        min: (0, values[0]),
    };
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > ext.max.1 {
            ext.max = (i, v);
        }
        if v < ext.min.1 {
            ext.min = (i, v);
        }
    }
    ext
}

/// Positions where `values` changes sign.
///
/// Samples within round-off of zero (relative to the largest magnitude)
/// carry no sign. A change between neighbouring samples is linearly
/// interpolated; a change across a run of zero samples is placed at the
/// middle of that run. A zero run with the same sign on both sides, or at
/// either end, is not a crossing.
fn zero_crossings(x: &[f64], values: &[f64]) -> Vec<f64> {
    let noise = values.iter().fold(0.0_f64, |m, v| m.max(v.abs())) * 1e-12;
    let sign = |v: f64| {
        if v > noise {
            1
        } else if v < -noise {
            -1
        } else {
            0
        }
    };

    let mut crossings = Vec::new();
    // Index and sign of the last sample that had one
    let mut last: Option<(usize, i32)> = None;
    for (j, &v) in values.iter().enumerate() {
        let s = sign(v);
        if s == 0 {
            continue;
        }
        if let Some((i, prev)) = last {
            if prev != s {
                let crossing = if j == i + 1 {
                    x[i] + (x[j] - x[i]) * values[i] / (values[i] - values[j])
                } else {
                    (x[i + 1] + x[j - 1]) / 2.0
                };
                crossings.push(crossing);
            }
        }
        last = Some((j, s));
    }
    crossings
}

/// Extract extrema and zero crossings from a field
pub fn summarize(field: &InternalForceField) -> CalcResult<Summary> {
    let n = field.x.len();
    if n == 0 || field.shear.len() != n || field.moment.len() != n {
        return Err(CalcError::EmptyField);
    }

    let shear = extremum(&field.shear);
    let moment = extremum(&field.moment);

    Ok(Summary {
        max_shear: shear.max.1,
        max_shear_pos: field.x[shear.max.0],
        min_shear: shear.min.1,
        min_shear_pos: field.x[shear.min.0],
        max_moment: moment.max.1,
        max_moment_pos: field.x[moment.max.0],
        min_moment: moment.min.1,
        min_moment_pos: field.x[moment.min.0],
        shear_zero_crossings: zero_crossings(&field.x, &field.shear),
        moment_zero_crossings: zero_crossings(&field.x, &field.moment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(shear: Vec<f64>, moment: Vec<f64>) -> InternalForceField {
        let x = (0..shear.len()).map(|i| i as f64).collect();
        InternalForceField { x, shear, moment }
    }

    #[test]
    fn test_extrema_and_positions() {
        let f = field(vec![0.0, -50.0, 11.0, -18.0, 40.0, 0.0], vec![0.0, -25.0, -50.0, -3.0, -40.0, 0.0]);
        let s = summarize(&f).unwrap();

        assert_eq!((s.max_shear, s.max_shear_pos), (40.0, 4.0));
        assert_eq!((s.min_shear, s.min_shear_pos), (-50.0, 1.0));
        assert_eq!((s.max_moment, s.max_moment_pos), (0.0, 0.0));
        assert_eq!((s.min_moment, s.min_moment_pos), (-50.0, 2.0));
        assert_eq!(s.max_abs_shear(), -50.0);
        assert_eq!(s.max_abs_moment(), -50.0);
    }

    #[test]
    fn test_ties_go_to_first_occurrence() {
        let f = field(vec![5.0, 5.0, -5.0, -5.0], vec![1.0, 2.0, 2.0, 1.0]);
        let s = summarize(&f).unwrap();
        assert_eq!(s.max_shear_pos, 0.0);
        assert_eq!(s.min_shear_pos, 2.0);
        assert_eq!(s.max_moment_pos, 1.0);
        assert_eq!(s.min_moment_pos, 0.0);
    }

    #[test]
    fn test_zero_crossings_are_interpolated() {
        let f = field(vec![10.0, 5.0, -15.0, -5.0], vec![0.0, 1.0, 0.0, -1.0]);
        let s = summarize(&f).unwrap();
        // 5 -> -15 crosses a quarter of the way from x = 1
        assert_eq!(s.shear_zero_crossings, vec![1.25]);
        // Passing through an exact zero sample is a sign change there
        assert_eq!(s.moment_zero_crossings, vec![2.0]);
    }

    #[test]
    fn test_zero_run_between_signs() {
        let f = field(vec![3.0, 0.0, 0.0, 0.0, -3.0], vec![2.0, 0.0, 0.0, 1.0, 0.0]);
        let s = summarize(&f).unwrap();
        assert_eq!(s.shear_zero_crossings, vec![2.0]);
        // Returning to the same sign, or ending at zero, is not a crossing
        assert!(s.moment_zero_crossings.is_empty());
    }

    #[test]
    fn test_round_off_is_not_a_sign_change() {
        let f = field(vec![40.0, 40.0, -1e-14, -1e-14], vec![0.0; 4]);
        assert!(summarize(&f).unwrap().shear_zero_crossings.is_empty());
    }

    #[test]
    fn test_empty_and_ragged_fields() {
        assert_eq!(summarize(&InternalForceField::default()), Err(CalcError::EmptyField));

        let ragged = InternalForceField {
            x: vec![0.0, 1.0],
            shear: vec![0.0],
            moment: vec![0.0, 0.0],
        };
        assert_eq!(summarize(&ragged), Err(CalcError::EmptyField));
    }

    #[test]
    fn test_single_sample() {
        let s = summarize(&field(vec![3.0], vec![-1.0])).unwrap();
        assert_eq!(s.max_shear, 3.0);
        assert_eq!(s.min_shear, 3.0);
        assert_eq!(s.min_moment, -1.0);
    }
}
