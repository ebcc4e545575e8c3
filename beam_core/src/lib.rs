//! # beam_core - Overhanging Beam Statics Engine
//!
//! `beam_core` analyzes a straight beam resting on two supports, with
//! optional overhangs past either support, under point loads and linearly
//! varying line loads. It produces support reactions, sampled shear and
//! bending-moment diagrams, extrema, and (given a section) deflection,
//! bending stress and a serviceability assessment.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`analyze`] is a pure function of a validated model
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Validated at the edges**: models reject bad geometry when built
//!
//! ## Sign Convention
//!
//! - Loads positive downward, reactions positive upward
//! - Positive shear: net upward force left of the section
//! - Positive moment: sagging
//! - Deflection positive downward
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{analyze, AnalysisSettings, BeamModel, Load, Support};
//!
//! let model = BeamModel::new(12.0, vec![Support::pin(3.0), Support::roller(9.0)])
//!     .unwrap()
//!     .with_load(Load::varying(0.0, 4.0, 0.0, 20.0))
//!     .unwrap()
//!     .with_load(Load::varying(6.0, 10.0, 15.0, 5.0))
//!     .unwrap();
//!
//! let result = analyze(&model, &AnalysisSettings::default()).unwrap();
//! assert!((result.reaction_1 + result.reaction_2 - 80.0).abs() < 1e-9);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string(&result.summary).unwrap();
//! assert!(json.contains("max_moment"));
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Beam, supports, section and the validated [`BeamModel`]
//! - [`loads`] - Load union and the resultant reducer
//! - [`calculations`] - Reactions, field, summary, deflection, assessment
//! - [`api`] - camelCase request/response contract and validation
//! - [`session`] - Mutable, id-addressed layout with a cached result
//! - [`materials`] - Material presets
//! - [`units`] - SI wrappers for reported deflection and stress
//! - [`errors`] - Structured error types

pub mod api;
pub mod calculations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod model;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use api::{handle_request, validate_request, BeamRequest, BeamResponse};
pub use calculations::{analyze, AnalysisResult, AnalysisSettings, AnalysisWarning};
pub use errors::{CalcError, CalcResult};
pub use loads::Load;
pub use materials::Material;
pub use model::{BeamModel, SectionProperties, Support, SupportKind};
pub use session::BeamSession;
