//! # timber_core - Timber Member and Joint Sizing Engine
//!
//! `timber_core` sizes the members and joints of a small timber frame:
//! the lightest beam cross-section that passes every limit state, the
//! strongest dowel diameter for a column/tie-beam joint, a pass/fail check
//! for a chosen section, and the design loads all of them start from. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Forgiving Inputs**: absent or zero fields take documented defaults
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use timber_core::calculations::cross_section::{calculate, CrossSectionInput};
//!
//! let rows = calculate(&CrossSectionInput::default()).unwrap();
//! let json = serde_json::to_string_pretty(&rows).unwrap();
//! assert!(json.contains("\"final_utilisation_status\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Cross-section, dowel, verification and joint calculations
//! - [`loads`] - Load calculator, combinations and wind actions
//! - [`materials`] - Timber properties and dowel detailing
//! - [`equations`] - Closed-form section, beam and buckling formulas
//! - [`search`] - Grid search with pluggable selection policies
//! - [`report`] - Rounded value + formatted string output pairs
//! - [`units`] - Type-safe unit wrappers
//! - [`inputs`] - Default substitution for request fields
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod inputs;
pub mod loads;
pub mod materials;
pub mod report;
pub mod search;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationOutput, CalculationRequest};
pub use errors::{CalcError, CalcResult};
