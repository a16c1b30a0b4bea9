//! Strategy schema: the data contract the LLM is asked to fill.
//!
//! Doc comments on fields double as the `description` entries of the exported
//! JSON Schema, so they are written for the model as much as for readers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single sales angle (avatar) with a persuasive paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SalesAngle {
    /// A creative name for the customer avatar, e.g. 'The Skeptic', 'The Power User'.
    pub avatar_name: String,

    /// The main customer pain point this angle addresses, detected from the reviews.
    pub pain_point_addressed: String,

    /// A short, persuasive sales paragraph (3-5 sentences) tailored to this avatar,
    /// written by a Direct Response Marketing expert.
    pub persuasive_copy: String,
}

/// The complete marketing strategy output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StrategyOutput {
    /// A list of the 3 main customer pain points detected from the reviews.
    pub main_pain_points: Vec<String>,

    /// A list of 3 distinct sales angles (avatars) with tailored persuasive copy.
    pub sales_angles: Vec<SalesAngle>,
}

/// Pain points and angles the prompt asks for. Guidance only; see `validator`.
pub const EXPECTED_PAIN_POINTS: usize = 3;
pub const EXPECTED_SALES_ANGLES: usize = 3;

/// Machine-readable JSON Schema document for `StrategyOutput`.
pub fn strategy_schema() -> Value {
    schemars::schema_for!(StrategyOutput).to_value()
}

/// The schema as it is embedded in the prompt (2-space indent).
pub fn strategy_schema_pretty() -> String {
    // Serializing a `Value` to a String cannot fail.
    serde_json::to_string_pretty(&strategy_schema()).unwrap_or_default()
}
