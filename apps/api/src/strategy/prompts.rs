//! Prompts for strategy generation.
//! Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, SCHEMA_CONFORMANCE_INSTRUCTION};

/// System message for strategy generation. Reinforces the JSON-only contract.
pub const STRATEGY_SYSTEM: &str = "You are an expert Direct Response Marketing strategist. \
    You must output a valid JSON object that strictly adheres to the user-provided schema.";

const ROLE_FRAMING: &str = "Act as a Direct Response Marketing (DRM) expert with 10 years of experience.";

const REVIEWS_DELIMITER: &str = "---";

/// Returns the full system message: strategist framing plus the JSON-only fragment.
pub fn strategy_system() -> String {
    format!("{STRATEGY_SYSTEM} {JSON_ONLY_SYSTEM}")
}

/// Composes the user prompt for one generation attempt.
///
/// Assembled in a single pass so `product_name` and `reviews_text` land verbatim,
/// even when they contain brace placeholders or delimiter-looking lines.
pub fn build_strategy_prompt(product_name: &str, reviews_text: &str, schema_json: &str) -> String {
    format!(
        r#"{ROLE_FRAMING}
Your task is to analyze competitor reviews for a product similar to: "{product_name}".

REVIEWS TO ANALYZE:
{REVIEWS_DELIMITER}
{reviews_text}
{REVIEWS_DELIMITER}

Instructions:
1. **Detect the customer's main pain points** (at least 3) that are mentioned in or can be inferred from the reviews.
2. **Create exactly 3 distinct 'Sales Angles' (Avatars)** based on those pain points. Each angle must represent a type of customer with a specific objection or need (e.g. 'The Skeptic', 'The Power User', 'The Value Seeker').
3. For each angle, write **one persuasive sales paragraph** (3-5 sentences) that speaks directly to that avatar's pain and positions the product "{product_name}" as the definitive solution. The tone must be direct-response and convincing.
4. {SCHEMA_CONFORMANCE_INSTRUCTION}
{schema_json}
"#
    )
}
