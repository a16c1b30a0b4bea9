//! Strategy Generation: orchestrates one generation attempt.
//!
//! Flow: credential check → input check → build prompt → completion call →
//!       parse + validate → return StrategyOutput.
//!
//! The pipeline does not touch any store. Callers commit the result only on
//! success, so a failed attempt leaves prior state as it was.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::{ApiKey, CompletionClient};
use crate::strategy::errors::StrategyError;
use crate::strategy::prompts::{build_strategy_prompt, strategy_system};
use crate::strategy::schema::{strategy_schema_pretty, StrategyOutput};
use crate::strategy::validator::validate_strategy;

/// The two user inputs for one generation. Absent fields read as empty so they
/// surface as `MissingInput` rather than a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationInput {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub reviews_text: String,
}

impl GenerationInput {
    /// Fails on the first blank field, product name first.
    pub fn check(&self) -> Result<(), StrategyError> {
        if self.product_name.trim().is_empty() {
            return Err(StrategyError::MissingInput {
                field: "product_name",
            });
        }
        if self.reviews_text.trim().is_empty() {
            return Err(StrategyError::MissingInput {
                field: "reviews_text",
            });
        }
        Ok(())
    }
}

/// Runs one attempt. No retry: the caller decides whether to try again.
pub async fn generate_strategy(
    llm: &dyn CompletionClient,
    api_key: Option<&ApiKey>,
    input: &GenerationInput,
) -> Result<StrategyOutput, StrategyError> {
    // Step 1: Preconditions, no call is made if either fails
    let api_key = api_key.ok_or(StrategyError::MissingCredential)?;
    input.check()?;

    // Step 2: Prompt
    let prompt = build_strategy_prompt(
        &input.product_name,
        &input.reviews_text,
        &strategy_schema_pretty(),
    );

    // Step 3: Completion
    info!(
        "Requesting strategy for product {:?} ({} chars of reviews)",
        input.product_name,
        input.reviews_text.len()
    );
    let raw = llm
        .complete(api_key, &prompt, &strategy_system())
        .await
        .inspect_err(|e| warn!("Strategy completion failed: {e}"))?;

    // Step 4: Parse + validate
    let output = validate_strategy(&raw).inspect_err(|e| warn!("Rejected completion: {e}"))?;

    info!(
        "Strategy generated: {} pain points, {} sales angles",
        output.main_pain_points.len(),
        output.sales_angles.len()
    );

    Ok(output)
}
