//! Reaction Solver
//!
//! Two supports, two unknowns, two equilibrium equations. With the supports
//! sorted so that `a < b`:
//!
//! - ΣM about `a` = 0: `R_b · (b - a) = Σ F_i · (x_i - a)`
//! - ΣF = 0: `R_a = Σ F_i - R_b`
//!
//! Loads are positive downward, reactions positive upward. Reactions are
//! reported against the caller's supports (by id and in caller order), not
//! in sorted order.

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::loads::Resultant;
use crate::model::{Beam, Support, SupportKind, POSITION_TOLERANCE};

/// Vertical reaction at one support (positive upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    pub support_id: Uuid,
    pub position: f64,
    pub kind: SupportKind,
    pub force: f64,
}

/// Reactions at both supports, in the order the supports were given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub supports: Vec<SupportReaction>,
}

impl Reactions {
    /// Reactions ordered by ascending support position. `None` unless
    /// exactly two are held.
    pub fn sorted(&self) -> Option<(&SupportReaction, &SupportReaction)> {
        match self.supports.as_slice() {
            [p, q] if p.position <= q.position => Some((p, q)),
            [p, q] => Some((q, p)),
            _ => None,
        }
    }

    /// Reaction at the support with the smaller position
    pub fn left(&self) -> Option<&SupportReaction> {
        self.sorted().map(|(l, _)| l)
    }

    /// Reaction at the support with the larger position
    pub fn right(&self) -> Option<&SupportReaction> {
        self.sorted().map(|(_, r)| r)
    }

    /// Reaction for a given support id
    pub fn for_support(&self, id: Uuid) -> Option<f64> {
        self.supports
            .iter()
            .find(|r| r.support_id == id)
            .map(|r| r.force)
    }

    /// Sum of both reactions
    pub fn total(&self) -> f64 {
        self.supports.iter().map(|r| r.force).sum()
    }
}

/// Solve the two support reactions for a set of load resultants.
///
/// Fails with `DegenerateSupport` unless exactly two supports at distinct
/// positions are given; the statics system is singular otherwise.
pub fn solve_reactions(beam: &Beam, supports: &[Support], resultants: &[Resultant]) -> CalcResult<Reactions> {
    if supports.len() != 2 {
        return Err(CalcError::degenerate_support(format!(
            "Exactly 2 supports are required, got {}",
            supports.len()
        )));
    }

    // Permutation from sorted order back to caller order
    let (ia, ib) = if supports[0].position <= supports[1].position {
        (0, 1)
    } else {
        (1, 0)
    };
    let a = supports[ia].position;
    let b = supports[ib].position;

    if !beam.contains(a) || !beam.contains(b) {
        return Err(CalcError::degenerate_support(format!(
            "Supports at {} and {} do not both lie on a beam of length {}",
            a, b, beam.length
        )));
    }
    let span = b - a;
    if span <= POSITION_TOLERANCE {
        return Err(CalcError::degenerate_support(format!(
            "Both supports are at {} - the span has zero length",
            a
        )));
    }

    let total_force: f64 = resultants.iter().map(|r| r.magnitude).sum();
    let total_moment_a: f64 = resultants.iter().map(|r| r.moment_about(a)).sum();

    let r_b = total_moment_a / span;
    let r_a = total_force - r_b;

    debug!(
        "reactions: span [{:.4}, {:.4}], ΣF = {:.6}, ΣM_a = {:.6} -> R_a = {:.6}, R_b = {:.6}",
        a, b, total_force, total_moment_a, r_a, r_b
    );

    let mut forces = [0.0; 2];
    forces[ia] = r_a;
    forces[ib] = r_b;

    Ok(Reactions {
        supports: supports
            .iter()
            .zip(forces)
            .map(|(s, force)| SupportReaction {
                support_id: s.id,
                position: s.position,
                kind: s.kind,
                force,
            })
            .collect(),
    })
}
