//! Response Validator: turns raw completion text into a `StrategyOutput`.
//!
//! Two phases, two error kinds:
//! 1. parse the text as one JSON value (`MalformedOutput` on failure);
//! 2. walk the value against the strategy shape, collecting every violation
//!    (`SchemaViolation` if any).
//!
//! Nothing is repaired or defaulted. Unknown keys are ignored.

use serde_json::{Map, Value};
use tracing::warn;

use crate::strategy::errors::{StrategyError, Violation};
use crate::strategy::schema::{
    SalesAngle, StrategyOutput, EXPECTED_PAIN_POINTS, EXPECTED_SALES_ANGLES,
};

const MISSING: &str = "<missing>";
/// Received values longer than this are cut in violation reports.
const MAX_RECEIVED_CHARS: usize = 120;

/// Parses and validates a raw completion.
pub fn validate_strategy(raw: &str) -> Result<StrategyOutput, StrategyError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| StrategyError::MalformedOutput {
        raw: raw.to_string(),
        reason: e.to_string(),
    })?;

    let output = validate_value(&value)?;

    if output.main_pain_points.len() != EXPECTED_PAIN_POINTS {
        warn!(
            "Expected {} pain points, got {}; accepting",
            EXPECTED_PAIN_POINTS,
            output.main_pain_points.len()
        );
    }
    if output.sales_angles.len() != EXPECTED_SALES_ANGLES {
        warn!(
            "Expected {} sales angles, got {}; accepting",
            EXPECTED_SALES_ANGLES,
            output.sales_angles.len()
        );
    }

    Ok(output)
}

/// Structural phase only. Exposed for callers that already hold a parsed value.
pub fn validate_value(value: &Value) -> Result<StrategyOutput, StrategyError> {
    let mut violations = Vec::new();

    let Some(root) = value.as_object() else {
        violations.push(violation("", "expected a JSON object", Some(value)));
        return Err(StrategyError::SchemaViolation(violations));
    };

    let main_pain_points = string_list(root, "main_pain_points", &mut violations);
    let sales_angles = angle_list(root, "sales_angles", &mut violations);

    match (main_pain_points, sales_angles) {
        (Some(main_pain_points), Some(sales_angles)) if violations.is_empty() => {
            Ok(StrategyOutput {
                main_pain_points,
                sales_angles,
            })
        }
        _ => Err(StrategyError::SchemaViolation(violations)),
    }
}

fn string_list(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<Vec<String>> {
    let items = required_array(object, field, violations)?;

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if let Some(text) = non_blank_string(item, &format!("{field}[{i}]"), violations) {
            out.push(text);
        }
    }
    Some(out)
}

fn angle_list(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<Vec<SalesAngle>> {
    let items = required_array(object, field, violations)?;

    if items.is_empty() {
        violations.push(violation(
            field,
            "must contain at least one sales angle",
            Some(&Value::Array(vec![])),
        ));
        return None;
    }

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if let Some(angle) = sales_angle(item, &format!("{field}[{i}]"), violations) {
            out.push(angle);
        }
    }
    Some(out)
}

fn sales_angle(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<SalesAngle> {
    let Some(object) = value.as_object() else {
        violations.push(violation(path, "expected an object", Some(value)));
        return None;
    };

    let avatar_name = required_string(object, path, "avatar_name", violations);
    let pain_point_addressed = required_string(object, path, "pain_point_addressed", violations);
    let persuasive_copy = required_string(object, path, "persuasive_copy", violations);

    Some(SalesAngle {
        avatar_name: avatar_name?,
        pain_point_addressed: pain_point_addressed?,
        persuasive_copy: persuasive_copy?,
    })
}

fn required_array<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'a Vec<Value>> {
    match object.get(field) {
        None => {
            violations.push(violation(field, "required field is missing", None));
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            violations.push(violation(field, "expected an array", Some(other)));
            None
        }
    }
}

fn required_string(
    object: &Map<String, Value>,
    parent: &str,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let path = format!("{parent}.{field}");
    match object.get(field) {
        None => {
            violations.push(violation(&path, "required field is missing", None));
            None
        }
        Some(value) => non_blank_string(value, &path, violations),
    }
}

fn non_blank_string(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::String(_) => {
            violations.push(violation(path, "must not be empty", Some(value)));
            None
        }
        other => {
            violations.push(violation(path, "expected a string", Some(other)));
            None
        }
    }
}

fn violation(path: &str, problem: &str, received: Option<&Value>) -> Violation {
    Violation {
        path: path.to_string(),
        problem: problem.to_string(),
        received: received.map(describe).unwrap_or_else(|| MISSING.to_string()),
    }
}

fn describe(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= MAX_RECEIVED_CHARS {
        return text;
    }
    let cut: String = text.chars().take(MAX_RECEIVED_CHARS).collect();
    format!("{cut}…")
}
