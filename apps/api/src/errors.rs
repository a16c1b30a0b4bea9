use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::strategy::errors::StrategyError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session is busy with another request")]
    SessionBusy,

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::SessionBusy => (
                StatusCode::CONFLICT,
                "SESSION_BUSY",
                "Another request is updating this session".to_string(),
                None,
            ),
            AppError::Strategy(e) => strategy_error_parts(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

fn strategy_error_parts(e: &StrategyError) -> (StatusCode, &'static str, String, Option<Value>) {
    match e {
        StrategyError::MissingCredential => (
            StatusCode::UNAUTHORIZED,
            "MISSING_CREDENTIAL",
            "An OpenAI API key is required before generating a strategy".to_string(),
            None,
        ),
        StrategyError::MissingInput { field } => (
            StatusCode::BAD_REQUEST,
            "MISSING_INPUT",
            e.to_string(),
            Some(json!({ "field": field })),
        ),
        StrategyError::TransportFailure(inner) => {
            tracing::error!("LLM error: {inner}");
            (
                StatusCode::BAD_GATEWAY,
                "TRANSPORT_FAILURE",
                e.to_string(),
                None,
            )
        }
        StrategyError::MalformedOutput { raw, reason } => (
            StatusCode::BAD_GATEWAY,
            "MALFORMED_OUTPUT",
            "The model response is not valid JSON".to_string(),
            Some(json!({ "reason": reason, "raw": raw })),
        ),
        StrategyError::SchemaViolation(violations) => (
            StatusCode::BAD_GATEWAY,
            "SCHEMA_VIOLATION",
            e.to_string(),
            Some(json!({ "violations": violations })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::strategy::errors::Violation;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_each_strategy_error_has_distinct_code() {
        let cases = vec![
            (StrategyError::MissingCredential, 401, "MISSING_CREDENTIAL"),
            (
                StrategyError::MissingInput {
                    field: "product_name",
                },
                400,
                "MISSING_INPUT",
            ),
            (
                StrategyError::TransportFailure(LlmError::EmptyContent),
                502,
                "TRANSPORT_FAILURE",
            ),
            (
                StrategyError::MalformedOutput {
                    raw: "not json".to_string(),
                    reason: "expected value".to_string(),
                },
                502,
                "MALFORMED_OUTPUT",
            ),
            (StrategyError::SchemaViolation(vec![]), 502, "SCHEMA_VIOLATION"),
        ];

        for (error, status, code) in cases {
            let (got_status, body) = body_of(AppError::from(error)).await;
            assert_eq!(got_status.as_u16(), status);
            assert_eq!(body["error"]["code"], code);
            assert!(body["error"]["message"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn test_malformed_output_carries_raw_text() {
        let (_, body) = body_of(AppError::from(StrategyError::MalformedOutput {
            raw: "not json".to_string(),
            reason: "expected ident at line 1 column 2".to_string(),
        }))
        .await;
        assert_eq!(body["error"]["details"]["raw"], "not json");
    }

    #[tokio::test]
    async fn test_schema_violation_carries_paths() {
        let (_, body) = body_of(AppError::from(StrategyError::SchemaViolation(vec![
            Violation {
                path: "sales_angles".to_string(),
                problem: "required field is missing".to_string(),
                received: "<missing>".to_string(),
            },
        ])))
        .await;
        assert_eq!(
            body["error"]["details"]["violations"][0]["path"],
            "sales_angles"
        );
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("sales_angles"));
    }

    #[tokio::test]
    async fn test_not_found_has_no_details() {
        let (status, body) = body_of(AppError::NotFound("Session x not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].get("details").is_none());
    }
}
