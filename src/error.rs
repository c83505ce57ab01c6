//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Stable numeric codes carried in every error envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    NoSuchData = 3,
    Duplicate = 4,
    BadValue = 5,
    CatalogFailure = 6,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Validation error: missing field '{0}'")]
    MissingField(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// One failed rule on one field, `field` is a dotted path such as `books[0].title`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Error payload placed under `error` in the envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// `{ "status": "error", "error": { ... } }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `error`
    #[schema(value_type = String)]
    pub status: &'static str,
    pub error: ErrorResponse,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidFields(_)
            | AppError::MissingField(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a request body that serde could not decode.
    ///
    /// A missing required field is reported against that field, anything
    /// else (syntax, wrong type) as a plain validation message.
    pub fn invalid_body(error: serde_json::Error) -> Self {
        let text = error.to_string();
        match missing_field_name(&text) {
            Some(field) => AppError::MissingField(field.to_string()),
            None => AppError::Validation(format!("Invalid request body: {}", text)),
        }
    }

    fn to_response(&self) -> ErrorResponse {
        let (code, message, fields) = match self {
            AppError::Validation(msg) => (ErrorCode::BadValue, msg.clone(), None),
            AppError::InvalidFields(errors) => (
                ErrorCode::BadValue,
                "Request body failed validation".to_string(),
                Some(flatten_validation_errors(errors)),
            ),
            AppError::MissingField(field) => (
                ErrorCode::BadValue,
                "Request body failed validation".to_string(),
                Some(vec![FieldError {
                    field: field.clone(),
                    code: "required".to_string(),
                    message: format!("{} is required", field),
                }]),
            ),
            AppError::BadRequest(msg) => (ErrorCode::BadValue, msg.clone(), None),
            AppError::NotFound(msg) => (ErrorCode::NoSuchData, msg.clone(), None),
            AppError::Conflict(msg) => (ErrorCode::Duplicate, msg.clone(), None),
            AppError::Upstream(msg) => (ErrorCode::CatalogFailure, msg.clone(), None),
            // Never echo driver or internal details back to the caller
            AppError::Database(_) => (ErrorCode::DbFailure, "Database error".to_string(), None),
            AppError::Internal(_) => {
                (ErrorCode::Failure, "Internal server error".to_string(), None)
            }
        };

        ErrorResponse {
            code: code as u32,
            kind: format!("{:?}", code),
            message,
            fields,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{} ({:?})", self, self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(ErrorEnvelope {
            status: "error",
            error: self.to_response(),
        });

        (status, body).into_response()
    }
}

// serde_json phrases it as "missing field `userId` at line 1 column 20"
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.find('`').map(|end| &rest[..end])
}

/// Flatten nested `validator` errors into one entry per failed rule.
///
/// Paths use the JSON (camelCase) names, `validator` reports the Rust ones.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_errors(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(FieldError {
                        field: path.clone(),
                        code: error.code.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for '{}'", path)),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Upstream("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_is_not_leaked() {
        let response = AppError::Database(sqlx::Error::Protocol("secret detail".into())).to_response();
        assert_eq!(response.message, "Database error");
        assert_eq!(response.kind, "DbFailure");
        assert_eq!(response.code, ErrorCode::DbFailure as u32);
    }

    #[test]
    fn test_flatten_nested_list_errors() {
        let mut book = ValidationErrors::new();
        book.add("title", ValidationError::new("length"));

        let mut root = ValidationErrors::new();
        root.add("name", ValidationError::new("length"));
        let mut list = std::collections::BTreeMap::new();
        list.insert(1usize, Box::new(book));
        root.errors_mut()
            .insert("books", ValidationErrorsKind::List(list));

        let fields = flatten_validation_errors(&root);
        let paths: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(paths, vec!["books[1].title", "name"]);
        assert_eq!(fields[0].code, "length");
    }

    #[test]
    fn test_flatten_uses_json_field_names() {
        let mut book = ValidationErrors::new();
        book.add("info_link", ValidationError::new("url"));

        let mut root = ValidationErrors::new();
        root.add("user_id", ValidationError::new("length"));
        let mut list = std::collections::BTreeMap::new();
        list.insert(0usize, Box::new(book));
        root.errors_mut()
            .insert("books", ValidationErrorsKind::List(list));

        let paths: Vec<String> = flatten_validation_errors(&root)
            .into_iter()
            .map(|f| f.field)
            .collect();
        assert_eq!(paths, vec!["books[0].infoLink", "userId"]);
        assert_eq!(camel_case("title"), "title");
    }

    #[test]
    fn test_missing_field_is_reported_per_field() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            name: String,
            user_id: String,
        }

        let err = serde_json::from_str::<Body>(r#"{ "name": "A" }"#).unwrap_err();
        let err = AppError::invalid_body(err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let response = err.to_response();
        assert_eq!(response.kind, "BadValue");
        let fields = response.fields.expect("Expected field errors");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "userId");
        assert_eq!(fields[0].code, "required");

        let err = serde_json::from_str::<Body>("{ \"name\": ").unwrap_err();
        assert!(matches!(AppError::invalid_body(err), AppError::Validation(_)));
    }
}
