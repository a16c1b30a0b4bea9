// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Closing instruction for prompts that embed a JSON Schema. The schema text follows it.
pub const SCHEMA_CONFORMANCE_INSTRUCTION: &str = "Your response MUST be a single JSON object \
    that strictly conforms to the following JSON Schema:";
