//! # Timber Calculations
//!
//! Every calculation follows the same pattern:
//!
//! - `*Input` - request bundles as received (JSON-serializable, every field
//!   optional)
//! - `resolve()` - default substitution and domain validation
//! - `calculate(input)` - pure calculation returning the output rows
//!
//! [`CalculationRequest`] wraps all of them behind one `"type"` tag so a
//! single request body can drive any calculation.
//!
//! ## Available Calculations
//!
//! - [`cross_section`] - lightest beam section grid search
//! - [`dowel`] - maximum-capacity dowel diameter search
//! - [`verification`] - pass/fail check of one chosen section
//! - [`joints`] - tenon, gooseneck and scarf proportions
//! - [`utilization`] - the utilization model shared by the above
//!
//! ## Example
//!
//! ```rust
//! use timber_core::calculations::CalculationRequest;
//!
//! let request: CalculationRequest = serde_json::from_str(r#"{"type": "Verify"}"#).unwrap();
//! let output = request.execute().unwrap();
//! assert_eq!(serde_json::to_string(&output).unwrap(), "true");
//! ```

pub mod cross_section;
pub mod dowel;
pub mod joints;
pub mod utilization;
pub mod verification;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::CalcResult;
use crate::loads::{BuildingInput, LoadCalculator, LoadReport};
use crate::materials::TimberInput;

pub use cross_section::{CrossSectionInput, SectionReport};
pub use dowel::{DowelInput, DowelReport};
pub use joints::{GooseneckJoint, JointInput, ScarfJoint, TenonJoint};
pub use utilization::{FailureMode, MemberLengths, TrialSection, Utilization};
pub use verification::VerifyInput;

/// Load request bundles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadsInput {
    pub material: TimberInput,
    pub footprint: BuildingInput,
}

/// Any calculation, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    CrossSection(CrossSectionInput),
    Dowel(DowelInput),
    Verify(VerifyInput),
    Loads(LoadsInput),
    TenonJoint(JointInput),
    GooseneckJoint(JointInput),
    ScarfJoint(JointInput),
}

/// Result of [`CalculationRequest::execute`], serialized as the bare result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutput {
    CrossSection(Vec<SectionReport>),
    /// `null` when no diameter is acceptable
    Dowel(Option<DowelReport>),
    Verify(bool),
    Loads(Box<LoadReport>),
    TenonJoint(TenonJoint),
    GooseneckJoint(GooseneckJoint),
    ScarfJoint(ScarfJoint),
}

impl CalculationRequest {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::CrossSection(_) => "CrossSection",
            CalculationRequest::Dowel(_) => "Dowel",
            CalculationRequest::Verify(_) => "Verify",
            CalculationRequest::Loads(_) => "Loads",
            CalculationRequest::TenonJoint(_) => "TenonJoint",
            CalculationRequest::GooseneckJoint(_) => "GooseneckJoint",
            CalculationRequest::ScarfJoint(_) => "ScarfJoint",
        }
    }

    /// Run the wrapped calculation.
    pub fn execute(&self) -> CalcResult<CalculationOutput> {
        info!(calc_type = self.calc_type(), "Running calculation");
        let output = match self {
            CalculationRequest::CrossSection(input) => {
                CalculationOutput::CrossSection(cross_section::calculate(input)?)
            }
            CalculationRequest::Dowel(input) => CalculationOutput::Dowel(dowel::calculate(input)?),
            CalculationRequest::Verify(input) => {
                CalculationOutput::Verify(verification::calculate(input)?)
            }
            CalculationRequest::Loads(input) => {
                let calculator = LoadCalculator::from_inputs(&input.material, &input.footprint)?;
                CalculationOutput::Loads(Box::new(calculator.report()?))
            }
            CalculationRequest::TenonJoint(input) => {
                CalculationOutput::TenonJoint(joints::tenon_joint(&input.resolve()?))
            }
            CalculationRequest::GooseneckJoint(input) => {
                CalculationOutput::GooseneckJoint(joints::gooseneck_joint(&input.resolve()?))
            }
            CalculationRequest::ScarfJoint(input) => {
                CalculationOutput::ScarfJoint(joints::scarf_joint(&input.resolve()?))
            }
        };
        Ok(output)
    }
}
