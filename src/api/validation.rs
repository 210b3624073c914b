use actix_web::{HttpResponse, error::{InternalError, JsonPayloadError}, web};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

fn bad_request(error: &str, fields: serde_json::Value) -> actix_web::Error {
    let error_response = ErrorResponse {
        error: error.to_string(),
        fields,
    };
    InternalError::from_response("", HttpResponse::BadRequest().json(error_response)).into()
}

fn payload_too_large(limit: usize) -> actix_web::Error {
    let error_response = ErrorResponse {
        error: "Payload too large".to_string(),
        fields: message(&format!("Request body exceeds {} bytes", limit)),
    };
    InternalError::from_response("", HttpResponse::PayloadTooLarge().json(error_response)).into()
}

fn message(text: &str) -> serde_json::Value {
    serde_json::json!({ "message": text })
}

/// Collect per-field validation messages as `{field: {"errors": [...]}}`
fn validation_fields(validation_errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    for (field, errors) in validation_errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
            })
            .collect();
        fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
    }
    serde_json::Value::Object(fields)
}

fn map_validator_error(err: actix_web_validator::Error) -> actix_web::Error {
    match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            bad_request("Validation failed", validation_fields(&validation_errors))
        }
        actix_web_validator::Error::Deserialize(de_err) => {
            let err_string = de_err.to_string();
            let text = if err_string.contains("EOF while parsing") {
                "Request body is empty. Expected JSON payload"
            } else if err_string.contains("missing field") {
                "Missing required field"
            } else {
                "Invalid request format"
            };
            bad_request("Request validation failed", message(text))
        }
        actix_web_validator::Error::JsonPayloadError(
            JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. },
        ) => payload_too_large(limit),
        _ => bad_request("Validation failed", message("Validation error")),
    }
}

/// JsonConfig with standardized error handling for job payloads, capped at
/// `limit` bytes (bodies above it are rejected with 413)
pub fn json_config(limit: usize) -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| map_validator_error(err))
}

/// QueryConfig for validated query parameters (e.g. the applicant email)
pub fn query_config() -> actix_web_validator::QueryConfig {
    actix_web_validator::QueryConfig::default().error_handler(|err, _req| map_validator_error(err))
}

/// QueryConfig for plain, unvalidated query parameters such as the job filter
pub fn filter_query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        bad_request("Invalid query parameters", message(&err.to_string()))
    })
}
