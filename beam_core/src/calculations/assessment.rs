//! Serviceability Assessment
//!
//! Compares peak bending stress and peak deflection against allowable
//! values and grades each check.
//!
//! ## Rating Bands
//!
//! | Rating | Stress (of allowable) | Deflection (of limit) |
//! |---|---|---|
//! | Excellent | < 60 % | < 50 % |
//! | Good | < 80 % | < 80 % |
//! | Caution | < 100 % | < 100 % |
//! | Critical | otherwise | otherwise |
//!
//! With the default 250 MPa allowable the stress bands fall at 150, 200
//! and 250 MPa.

use serde::{Deserialize, Serialize};

use super::AnalysisResult;
use crate::model::Beam;
use crate::units::{Megapascals, Meters, Millimeters, Pascals};

/// Allowable values for the serviceability checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceabilityLimits {
    /// Allowable bending stress (MPa)
    pub allowable_stress_mpa: f64,
    /// Deflection limit as a span ratio (L / ratio)
    pub deflection_span_ratio: f64,
}

impl Default for ServiceabilityLimits {
    fn default() -> Self {
        ServiceabilityLimits {
            allowable_stress_mpa: 250.0,
            deflection_span_ratio: 250.0,
        }
    }
}

impl ServiceabilityLimits {
    /// Deflection limit in mm for a beam of `length` m
    pub fn deflection_limit_mm(&self, length: f64) -> f64 {
        Millimeters::from(Meters(length)).0 / self.deflection_span_ratio
    }
}

/// Grade of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Excellent,
    Good,
    Caution,
    Critical,
}

impl Rating {
    fn from_unity(unity: f64, excellent_below: f64) -> Self {
        if unity < excellent_below {
            Rating::Excellent
        } else if unity < 0.8 {
            Rating::Good
        } else if unity < 1.0 {
            Rating::Caution
        } else {
            Rating::Critical
        }
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Rating::Excellent => "EXCELLENT",
            Rating::Good => "GOOD",
            Rating::Caution => "CAUTION",
            Rating::Critical => "CRITICAL",
        }
    }
}

/// Overall verdict from the critical (smallest) safety factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Factor above 3
    OverDesigned,
    /// Factor above 2
    Robust,
    /// Factor above 1.5
    Adequate,
    /// Factor above 1
    Minimal,
    Unsafe,
}

impl Recommendation {
    fn from_factor(factor: f64) -> Self {
        if factor > 3.0 {
            Recommendation::OverDesigned
        } else if factor > 2.0 {
            Recommendation::Robust
        } else if factor > 1.5 {
            Recommendation::Adequate
        } else if factor > 1.0 {
            Recommendation::Minimal
        } else {
            Recommendation::Unsafe
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::OverDesigned => "Structure is over-designed. Consider optimization.",
            Recommendation::Robust => "Excellent safety margin. Design is robust.",
            Recommendation::Adequate => "Adequate safety. Monitor under service loads.",
            Recommendation::Minimal => "Minimal safety margin. Consider reinforcement.",
            Recommendation::Unsafe => "UNSAFE DESIGN! Immediate redesign required!",
        }
    }
}

/// Result of the serviceability checks.
///
/// Unity ratios are `actual / allowable`; a check passes at or below 1.0.
/// Safety factors are the reciprocals and are `None` when the demand is
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub max_stress_mpa: f64,
    pub allowable_stress_mpa: f64,
    pub stress_unity: f64,
    pub stress_rating: Rating,
    pub stress_safety_factor: Option<f64>,

    pub max_deflection_mm: f64,
    pub deflection_limit_mm: f64,
    pub deflection_unity: f64,
    pub deflection_rating: Rating,
    pub deflection_safety_factor: Option<f64>,

    /// Smaller of the two safety factors
    pub critical_safety_factor: Option<f64>,
    pub recommendation: Recommendation,
}

impl Assessment {
    /// Check if both unity checks pass (≤ 1.0)
    pub fn passes(&self) -> bool {
        self.stress_unity <= 1.0 && self.deflection_unity <= 1.0
    }

    /// Governing (highest) unity ratio
    pub fn governing_unity(&self) -> f64 {
        self.stress_unity.max(self.deflection_unity)
    }

    /// Get the governing condition name
    pub fn governing_condition(&self) -> &'static str {
        if self.stress_unity >= self.deflection_unity {
            "Bending Stress"
        } else {
            "Deflection"
        }
    }
}

fn safety_factor(unity: f64) -> Option<f64> {
    (unity > 0.0).then(|| 1.0 / unity)
}

/// Grade peak stress (Pa) and peak deflection (m) for a beam of `length` m
pub fn assess_values(max_stress_pa: f64, max_deflection_m: f64, length: f64, limits: &ServiceabilityLimits) -> Assessment {
    let max_stress_mpa = Megapascals::from(Pascals(max_stress_pa.abs())).0;
    let max_deflection_mm = Millimeters::from(Meters(max_deflection_m.abs())).0;
    let deflection_limit_mm = limits.deflection_limit_mm(length);

    let stress_unity = max_stress_mpa / limits.allowable_stress_mpa;
    let deflection_unity = max_deflection_mm / deflection_limit_mm;

    let stress_safety_factor = safety_factor(stress_unity);
    let deflection_safety_factor = safety_factor(deflection_unity);
    let critical_safety_factor = match (stress_safety_factor, deflection_safety_factor) {
        (Some(s), Some(d)) => Some(s.min(d)),
        (s, d) => s.or(d),
    };

    Assessment {
        max_stress_mpa,
        allowable_stress_mpa: limits.allowable_stress_mpa,
        stress_unity,
        stress_rating: Rating::from_unity(stress_unity, 0.6),
        stress_safety_factor,
        max_deflection_mm,
        deflection_limit_mm,
        deflection_unity,
        deflection_rating: Rating::from_unity(deflection_unity, 0.5),
        deflection_safety_factor,
        critical_safety_factor,
        recommendation: critical_safety_factor
            .map(Recommendation::from_factor)
            .unwrap_or(Recommendation::OverDesigned),
    }
}

/// Assess an analysis result; `None` when it carries no stress or
/// deflection (no section was given)
pub fn assess(result: &AnalysisResult, beam: &Beam, limits: &ServiceabilityLimits) -> Option<Assessment> {
    let max_stress = result.max_stress?;
    let max_deflection = result.max_deflection?;
    Some(assess_values(max_stress, max_deflection, beam.length, limits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{analyze, AnalysisSettings};
    use crate::loads::Load;
    use crate::model::{BeamModel, SectionProperties, Support};
    use approx::assert_relative_eq;

    #[test]
    fn test_assess_needs_a_section() {
        let model = BeamModel::new(10.0, vec![Support::pin(0.0), Support::roller(10.0)])
            .unwrap()
            .with_load(Load::uniform(0.0, 10.0, 1000.0))
            .unwrap();
        let limits = ServiceabilityLimits::default();

        let statics = analyze(&model, &AnalysisSettings::default()).unwrap();
        assert!(assess(&statics, model.beam(), &limits).is_none());

        let section = SectionProperties::new(200e9, 8.33e-6, 0.1).unwrap();
        let model = model.with_section(section);
        let result = analyze(&model, &AnalysisSettings::default()).unwrap();
        let assessment = assess(&result, model.beam(), &limits).unwrap();
        assert_eq!(result.assessment.as_ref(), Some(&assessment));
        // L/250 = 40 mm
        assert_relative_eq!(assessment.deflection_limit_mm, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stress_bands_match_absolute_thresholds() {
        let limits = ServiceabilityLimits::default();
        let rate = |mpa: f64| assess_values(mpa * 1e6, 0.0, 10.0, &limits).stress_rating;
        assert_eq!(rate(149.9), Rating::Excellent);
        assert_eq!(rate(150.0), Rating::Good);
        assert_eq!(rate(199.0), Rating::Good);
        assert_eq!(rate(200.0), Rating::Caution);
        assert_eq!(rate(249.0), Rating::Caution);
        assert_eq!(rate(250.0), Rating::Critical);
    }

    #[test]
    fn test_deflection_bands() {
        // L = 10 m: limit 40 mm
        let limits = ServiceabilityLimits::default();
        let rate = |mm: f64| assess_values(0.0, mm / 1000.0, 10.0, &limits).deflection_rating;
        assert_eq!(rate(19.0), Rating::Excellent);
        assert_eq!(rate(20.0), Rating::Good);
        assert_eq!(rate(33.0), Rating::Caution);
        assert_eq!(rate(41.0), Rating::Critical);
    }

    #[test]
    fn test_critical_factor_and_recommendation() {
        let limits = ServiceabilityLimits::default();
        // Stress 100 MPa -> factor 2.5; deflection 10 mm of 40 -> factor 4
        let a = assess_values(100e6, -0.010, 10.0, &limits);
        assert_relative_eq!(a.stress_safety_factor.unwrap(), 2.5, epsilon = 1e-9);
        assert_relative_eq!(a.deflection_safety_factor.unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(a.critical_safety_factor.unwrap(), 2.5, epsilon = 1e-9);
        assert_eq!(a.recommendation, Recommendation::Robust);
        assert_eq!(a.governing_condition(), "Bending Stress");
        assert!(a.passes());

        let overloaded = assess_values(300e6, 0.0, 10.0, &limits);
        assert_eq!(overloaded.recommendation, Recommendation::Unsafe);
        assert!(!overloaded.passes());
    }

    #[test]
    fn test_unloaded_beam_is_over_designed() {
        let a = assess_values(0.0, 0.0, 10.0, &ServiceabilityLimits::default());
        assert_eq!(a.critical_safety_factor, None);
        assert_eq!(a.recommendation, Recommendation::OverDesigned);
    }
}
