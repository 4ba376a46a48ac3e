//! Error types for the HR portal.
//!
//! Every store, validation and report operation returns [`HrError`]. The HTTP
//! layer turns it into a JSON response through [`actix_web::ResponseError`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// The main error type for the HR portal.
///
/// # Example
///
/// ```
/// use hr_portal::error::HrError;
///
/// let error = HrError::Duplicate {
///     field: "employee_id".to_string(),
/// };
/// assert_eq!(error.to_string(), "A record with this employee_id already exists");
/// ```
#[derive(Debug, Error)]
pub enum HrError {
    /// A write collided with a unique natural key.
    #[error("A record with this {field} already exists")]
    Duplicate {
        /// The conflicting column, or columns joined by ", ".
        field: String,
    },

    /// A field failed its declared constraints.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// Lookup by primary or natural key found nothing.
    #[error("{entity} not found")]
    NotFound {
        /// The kind of record that was looked up.
        entity: &'static str,
    },

    /// The requested letter type is not one of the known templates.
    #[error("Invalid letter type: {value}")]
    InvalidLetterType {
        /// The rejected value.
        value: String,
    },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}

/// A type alias for Results that return HrError.
pub type HrResult<T> = Result<T, HrError>;

impl HrError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        HrError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field a client should highlight, if the error is about one.
    pub fn field(&self) -> Option<&str> {
        match self {
            HrError::Duplicate { field } | HrError::Validation { field, .. } => Some(field),
            HrError::InvalidLetterType { .. } => Some("letter_type"),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for HrError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let message = db_err.message();
            if db_err.is_unique_violation() || message.starts_with("UNIQUE constraint failed") {
                return HrError::Duplicate {
                    field: conflicting_field(message),
                };
            }
            if db_err.is_foreign_key_violation()
                || message.starts_with("FOREIGN KEY constraint failed")
            {
                return HrError::NotFound { entity: "Employee" };
            }
        }
        HrError::Database(e)
    }
}

/// Extracts the column list from a SQLite unique-constraint message.
///
/// `UNIQUE constraint failed: attendance.employee_pk, attendance.month, attendance.year`
/// becomes `employee, month, year`.
pub(crate) fn conflicting_field(message: &str) -> String {
    let columns = message.rsplit(": ").next().unwrap_or(message);
    columns
        .split(',')
        .map(|column| {
            let column = column.trim();
            let column = column.rsplit('.').next().unwrap_or(column);
            column.strip_suffix("_pk").unwrap_or(column)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ResponseError for HrError {
    fn status_code(&self) -> StatusCode {
        match self {
            HrError::Duplicate { .. } => StatusCode::CONFLICT,
            HrError::Validation { .. } | HrError::InvalidLetterType { .. } => {
                StatusCode::BAD_REQUEST
            }
            HrError::NotFound { .. } => StatusCode::NOT_FOUND,
            HrError::Database(_) | HrError::Migration(_) | HrError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            return HttpResponse::build(status).json(json!({
                "message": "Something went wrong, Contact with system admin"
            }));
        }

        let body = match self.field() {
            Some(field) => json!({ "message": self.to_string(), "field": field }),
            None => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_displays_field() {
        let error = HrError::Duplicate {
            field: "cnic".to_string(),
        };
        assert_eq!(error.to_string(), "A record with this cnic already exists");
    }

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = HrError::validation("year", "must be between 2000 and 2100");
        assert_eq!(
            error.to_string(),
            "Invalid value for 'year': must be between 2000 and 2100"
        );
    }

    #[test]
    fn test_not_found_displays_entity() {
        let error = HrError::NotFound { entity: "Employee" };
        assert_eq!(error.to_string(), "Employee not found");
    }

    #[test]
    fn test_conflicting_field_single_column() {
        assert_eq!(
            conflicting_field("UNIQUE constraint failed: employees.employee_id"),
            "employee_id"
        );
        assert_eq!(
            conflicting_field("UNIQUE constraint failed: employees.cnic"),
            "cnic"
        );
    }

    #[test]
    fn test_conflicting_field_composite_key() {
        assert_eq!(
            conflicting_field(
                "UNIQUE constraint failed: attendance.employee_pk, attendance.month, attendance.year"
            ),
            "employee, month, year"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HrError::Duplicate {
                field: "cnic".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HrError::validation("year", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HrError::InvalidLetterType {
                value: "x".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HrError::NotFound { entity: "Salary" }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HrError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_letter_type_error_points_at_letter_type() {
        let error = HrError::InvalidLetterType {
            value: "invalid_type".into(),
        };
        assert_eq!(error.field(), Some("letter_type"));
    }
}
