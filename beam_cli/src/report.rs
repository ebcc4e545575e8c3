//! Text and CSV renderers

use std::fmt::Write;

use beam_core::api::{BeamRequest, BeamResponse};

const RULE: &str = "═══════════════════════════════════════";

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn positions(xs: &[f64]) -> String {
    if xs.is_empty() {
        "none".to_string()
    } else {
        xs.iter().map(|x| format!("{:.3}", x)).collect::<Vec<_>>().join(", ")
    }
}

/// Human-readable report of one analysis
pub fn render_report(
    title: &str,
    request: &BeamRequest,
    response: &BeamResponse,
    recommendations: &[String],
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, title, request, response, recommendations);
    out
}

fn write_report(
    out: &mut String,
    title: &str,
    request: &BeamRequest,
    response: &BeamResponse,
    recommendations: &[String],
) -> std::fmt::Result {
    let s = &response.summary;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Length:   {:.3} m", request.beam_length)?;
    writeln!(
        out,
        "  Material: {}",
        request
            .material()
            .map(|m| m.display_name())
            .unwrap_or("unknown")
    )?;
    for (i, support) in request.supports.iter().enumerate() {
        writeln!(
            out,
            "  Support {}: {} at {:.3} m",
            i + 1,
            support.kind.display_name(),
            support.position
        )?;
    }
    for (i, spec) in request.loads.iter().enumerate() {
        writeln!(out, "  Load {}:   {}", i + 1, spec.to_load().describe())?;
    }
    writeln!(out)?;

    writeln!(out, "Reactions:")?;
    writeln!(out, "  R1 = {:.3}", response.reactions.r1)?;
    writeln!(out, "  R2 = {:.3}", response.reactions.r2)?;
    writeln!(out)?;

    writeln!(out, "Shear:")?;
    writeln!(out, "  max {:>10.3} at x = {:.3}", s.max_shear, s.max_shear_pos)?;
    writeln!(out, "  min {:>10.3} at x = {:.3}", s.min_shear, s.min_shear_pos)?;
    writeln!(out, "  zero crossings: {}", positions(&s.shear_zero_crossings))?;
    writeln!(out, "Moment:")?;
    writeln!(out, "  max {:>10.3} at x = {:.3}", s.max_moment, s.max_moment_pos)?;
    writeln!(out, "  min {:>10.3} at x = {:.3}", s.min_moment, s.min_moment_pos)?;
    writeln!(out, "  inflection points: {}", positions(&s.moment_zero_crossings))?;
    writeln!(out)?;

    if let Some(a) = &response.assessment {
        writeln!(out, "Serviceability:")?;
        writeln!(
            out,
            "  Stress:     {:.2} ({:.2}/{:.0} MPa) {} {}",
            a.stress_unity,
            a.max_stress_mpa,
            a.allowable_stress_mpa,
            a.stress_rating.display_name(),
            status_icon(a.stress_unity <= 1.0)
        )?;
        writeln!(
            out,
            "  Deflection: {:.2} ({:.3}/{:.3} mm) {} {}",
            a.deflection_unity,
            a.max_deflection_mm,
            a.deflection_limit_mm,
            a.deflection_rating.display_name(),
            status_icon(a.deflection_unity <= 1.0)
        )?;
        if let Some(factor) = a.critical_safety_factor {
            writeln!(out, "  Critical safety factor: {:.2}", factor)?;
        }
        writeln!(out, "  {}", a.recommendation.message())?;
        writeln!(out)?;
    }

    if !response.warnings.is_empty() {
        writeln!(out, "Warnings:")?;
        for warning in &response.warnings {
            writeln!(out, "  - {}", warning)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Recommendations:")?;
    for rec in recommendations {
        writeln!(out, "  - {}", rec)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", RULE)?;
    match &response.assessment {
        Some(a) => writeln!(
            out,
            "  RESULT: {} (governs: {}, unity {:.2})",
            if a.passes() { "PASS" } else { "FAIL" },
            a.governing_condition(),
            a.governing_unity()
        )?,
        None => writeln!(out, "  RESULT: statics only")?,
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

/// One row per sample: `x,shear,moment,deflection,stress`.
///
/// Deflection and stress columns are left empty when not computed.
pub fn render_csv(response: &BeamResponse) -> String {
    let mut out = String::from("x,shear,moment,deflection,stress\n");
    for i in 0..response.x.len() {
        let optional = |values: &[f64]| values.get(i).map(|v| v.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            response.x[i],
            response.shear[i],
            response.moment[i],
            optional(response.deflection.as_slice()),
            optional(response.stress.as_slice())
        );
    }
    out
}
