//! # Beam Session
//!
//! Mutable owner of a beam layout for interactive front ends. Supports and
//! loads are addressed by [`Uuid`] so a UI can remove or highlight them
//! without tracking list positions.
//!
//! The last analysis is cached and dropped on every mutation; the engine
//! itself stays stateless.
//!
//! ```rust
//! use beam_core::loads::Load;
//! use beam_core::model::SupportKind;
//! use beam_core::session::BeamSession;
//!
//! let mut session = BeamSession::new(10.0).unwrap();
//! session.add_support(0.0, SupportKind::Pin).unwrap();
//! session.add_support(10.0, SupportKind::Roller).unwrap();
//! let load_id = session.add_load(Load::point(5.0, 100.0)).unwrap();
//!
//! assert!((session.result().unwrap().reaction_1 - 50.0).abs() < 1e-9);
//!
//! session.remove_load(load_id);
//! assert!(!session.has_result());
//! assert_eq!(session.result().unwrap().reaction_1, 0.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{analyze, AnalysisResult, AnalysisSettings};
use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;
use crate::materials::Material;
use crate::model::{Beam, BeamModel, SectionProperties, Support, SupportKind};

/// A load with a stable identity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    pub id: Uuid,
    pub load: Load,
}

#[derive(Debug, Clone)]
pub struct BeamSession {
    beam: Beam,
    section: Option<SectionProperties>,
    supports: Vec<Support>,
    loads: Vec<LoadEntry>,
    settings: AnalysisSettings,
    cached: Option<AnalysisResult>,
}

impl BeamSession {
    /// Start an empty session for a beam of `length` m
    pub fn new(length: f64) -> CalcResult<Self> {
        Ok(BeamSession {
            beam: Beam::new(length)?,
            section: None,
            supports: Vec::new(),
            loads: Vec::new(),
            settings: AnalysisSettings::default(),
            cached: None,
        })
    }

    fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!("session: cached result dropped");
        }
    }

    pub fn length(&self) -> f64 {
        self.beam.length
    }

    /// Change the beam length. Every support and load must still fit.
    pub fn set_length(&mut self, length: f64) -> CalcResult<()> {
        let beam = Beam::new(length)?;
        if let Some(s) = self.supports.iter().find(|s| !beam.contains(s.position)) {
            return Err(CalcError::invalid_input(
                "length",
                length.to_string(),
                format!("Support at {} would fall off the beam", s.position),
            ));
        }
        if let Some((i, e)) = self
            .loads
            .iter()
            .enumerate()
            .find_map(|(i, entry)| entry.load.validate(&beam).err().map(|e| (i, e)))
        {
            return Err(e.at_load_index(i));
        }
        self.beam = beam;
        self.invalidate();
        Ok(())
    }

    pub fn section(&self) -> Option<&SectionProperties> {
        self.section.as_ref()
    }

    pub fn set_section(&mut self, section: Option<SectionProperties>) {
        self.section = section;
        self.invalidate();
    }

    /// Use a material preset's properties with the default extreme fiber
    pub fn set_material(&mut self, material: Material) -> CalcResult<()> {
        self.set_section(Some(material.section(None, None, None)?));
        Ok(())
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AnalysisSettings) {
        self.settings = settings;
        self.invalidate();
    }

    /// Add a support and return its id
    pub fn add_support(&mut self, position: f64, kind: SupportKind) -> CalcResult<Uuid> {
        if !self.beam.contains(position) {
            return Err(CalcError::invalid_input(
                "support.position",
                position.to_string(),
                format!("Position must lie within [0, {}]", self.beam.length),
            ));
        }
        let support = Support::new(position, kind);
        self.supports.push(support);
        self.invalidate();
        Ok(support.id)
    }

    /// Remove a support by id
    pub fn remove_support(&mut self, id: Uuid) -> Option<Support> {
        let index = self.supports.iter().position(|s| s.id == id)?;
        self.invalidate();
        Some(self.supports.remove(index))
    }

    pub fn support(&self, id: Uuid) -> Option<&Support> {
        self.supports.iter().find(|s| s.id == id)
    }

    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Add a load after checking it against the beam and return its id
    pub fn add_load(&mut self, load: Load) -> CalcResult<Uuid> {
        load.validate(&self.beam)
            .map_err(|e| e.at_load_index(self.loads.len()))?;
        let id = Uuid::new_v4();
        self.loads.push(LoadEntry { id, load });
        self.invalidate();
        Ok(id)
    }

    /// Remove a load by id
    pub fn remove_load(&mut self, id: Uuid) -> Option<Load> {
        let index = self.loads.iter().position(|e| e.id == id)?;
        self.invalidate();
        Some(self.loads.remove(index).load)
    }

    pub fn load(&self, id: Uuid) -> Option<&Load> {
        self.loads.iter().find(|e| e.id == id).map(|e| &e.load)
    }

    pub fn loads(&self) -> &[LoadEntry] {
        &self.loads
    }

    /// Remove every support and load
    pub fn clear(&mut self) {
        self.supports.clear();
        self.loads.clear();
        self.invalidate();
    }

    /// Snapshot the current layout as a validated model
    pub fn to_model(&self) -> CalcResult<BeamModel> {
        let mut model = BeamModel::new(self.beam.length, self.supports.clone())?;
        model.set_section(self.section);
        for entry in &self.loads {
            model.add_load(entry.load)?;
        }
        Ok(model)
    }

    /// Whether a cached result is available
    pub fn has_result(&self) -> bool {
        self.cached.is_some()
    }

    /// Analysis of the current layout, computed on first request after a
    /// change
    pub fn result(&mut self) -> CalcResult<&AnalysisResult> {
        let result = match self.cached.take() {
            Some(result) => result,
            None => {
                debug!(
                    "session: analyzing {} supports, {} loads",
                    self.supports.len(),
                    self.loads.len()
                );
                analyze(&self.to_model()?, &self.settings)?
            }
        };
        Ok(self.cached.insert(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn session() -> BeamSession {
        let mut s = BeamSession::new(10.0).unwrap();
        s.add_support(2.0, SupportKind::Pin).unwrap();
        s.add_support(8.0, SupportKind::Roller).unwrap();
        s
    }

    #[test]
    fn test_mutation_invalidates_cached_result() {
        let mut s = session();
        s.add_load(Load::point(5.0, 60.0)).unwrap();
        assert_relative_eq!(s.result().unwrap().reaction_1, 30.0, epsilon = 1e-9);
        assert!(s.has_result());

        s.add_load(Load::point(2.0, 10.0)).unwrap();
        assert!(!s.has_result());
        assert_relative_eq!(s.result().unwrap().reaction_1, 40.0, epsilon = 1e-9);

        s.set_material(Material::Wood).unwrap();
        assert!(!s.has_result());
        assert!(s.result().unwrap().deflection.is_some());
    }

    #[test]
    fn test_remove_by_id() {
        let mut s = session();
        let a = s.add_load(Load::point(3.0, 1.0)).unwrap();
        let b = s.add_load(Load::uniform(4.0, 6.0, 2.0)).unwrap();

        assert_eq!(s.remove_load(a), Some(Load::point(3.0, 1.0)));
        assert_eq!(s.remove_load(a), None);
        assert_eq!(s.loads().len(), 1);
        assert_eq!(s.load(b), Some(&Load::uniform(4.0, 6.0, 2.0)));

        let support = s.supports()[0].id;
        assert_eq!(s.remove_support(support).map(|x| x.position), Some(2.0));
        assert!(s.support(support).is_none());
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut s = session();
        assert!(s.add_support(11.0, SupportKind::Pin).is_err());
        let err = s.add_load(Load::point(10.5, 1.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
    }

    #[test]
    fn test_shrinking_beam_must_keep_layout() {
        let mut s = session();
        s.add_load(Load::uniform(0.0, 9.0, 1.0)).unwrap();
        assert!(s.set_length(8.5).is_err());
        assert_eq!(s.length(), 10.0);
        assert!(s.set_length(9.0).is_ok());
    }

    #[test]
    fn test_analysis_needs_two_supports() {
        let mut s = BeamSession::new(5.0).unwrap();
        s.add_support(0.0, SupportKind::Pin).unwrap();
        assert_eq!(s.result().unwrap_err().error_code(), "DEGENERATE_SUPPORT");
        assert!(!s.has_result());
    }
}
