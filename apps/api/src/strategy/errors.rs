use serde::Serialize;
use thiserror::Error;

use crate::llm_client::LlmError;

/// One reason a parsed completion was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted/indexed field path, e.g. `sales_angles[1].avatar_name`. Empty for the root.
    pub path: String,
    pub problem: String,
    /// Compact JSON of what was received, or `<missing>`.
    pub received: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        write!(f, "{path}: {} (received {})", self.problem, self.received)
    }
}

/// Every way a single generation attempt can fail. Each one aborts only that attempt.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("No API key supplied")]
    MissingCredential,

    #[error("Missing input: {field} must not be empty")]
    MissingInput { field: &'static str },

    #[error("Completion call failed: {0}")]
    TransportFailure(#[from] LlmError),

    #[error("Completion is not valid JSON: {reason}")]
    MalformedOutput { raw: String, reason: String },

    #[error("Completion does not match the strategy schema: {}", format_violations(.0))]
    SchemaViolation(Vec<Violation>),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_violation_message_lists_every_path() {
        let error = StrategyError::SchemaViolation(vec![
            Violation {
                path: "sales_angles".to_string(),
                problem: "required field is missing".to_string(),
                received: "<missing>".to_string(),
            },
            Violation {
                path: String::new(),
                problem: "expected an object".to_string(),
                received: "[]".to_string(),
            },
        ]);
        let message = error.to_string();
        assert!(message.contains("sales_angles: required field is missing"));
        assert!(message.contains("<root>: expected an object"));
    }

    #[test]
    fn test_missing_input_names_the_field() {
        let error = StrategyError::MissingInput {
            field: "reviews_text",
        };
        assert_eq!(
            error.to_string(),
            "Missing input: reviews_text must not be empty"
        );
    }
}
