//! Search and filter parameters for the list views and exports.
//!
//! A missing or blank parameter places no constraint on the result. Supplied
//! parameters are ANDed.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::HrError;
use crate::model::{Month, SalaryStatus};
use crate::utils::db_utils::{SqlValue, WhereClause, like_pattern};
use crate::validation;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Period values end up in an attachment file name, which cannot carry
/// control characters.
fn printable(field: &str, value: &Option<String>) -> Result<(), HrError> {
    match value {
        Some(v) if v.chars().any(char::is_control) => Err(HrError::validation(
            field,
            "must not contain control characters",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EmployeeSearch {
    /// Case-insensitive substring of employee id, name, CNIC or designation.
    #[param(example = "203")]
    pub q: Option<String>,
}

impl EmployeeSearch {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: Some(q.into()) }
    }

    pub fn where_clause(&self) -> WhereClause {
        let mut clause = WhereClause::default();
        if let Some(q) = present(&self.q) {
            let like = like_pattern(q);
            clause.push(
                "(employee_id LIKE ? ESCAPE '\\' OR name LIKE ? ESCAPE '\\' \
                 OR cnic LIKE ? ESCAPE '\\' OR designation LIKE ? ESCAPE '\\')",
                std::iter::repeat(SqlValue::Text(like)).take(4),
            );
        }
        clause
    }
}

/// Month/year filter shared by attendance listings and exports.
#[derive(Debug, Default, Clone, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    /// Month name, any case.
    #[param(example = "March")]
    pub month: Option<String>,
    #[param(example = "2025")]
    pub year: Option<String>,
}

impl AttendanceFilter {
    pub fn new(month: Option<&str>, year: Option<&str>) -> Self {
        Self {
            month: month.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    /// Builds the WHERE clause against a table aliased as `alias`.
    pub fn where_clause(&self, alias: &str) -> Result<WhereClause, HrError> {
        period_clause(alias, &self.month, &self.year)
    }

    /// Export file name; filter values are embedded as given, blank or not.
    pub fn file_name(&self) -> String {
        period_file_name("attendance", &self.month, &self.year)
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SalaryFilter {
    #[param(example = "March")]
    pub month: Option<String>,
    #[param(example = "2025")]
    pub year: Option<String>,
    /// `Paid` or `Unpaid`.
    #[param(example = "Paid")]
    pub status: Option<String>,
}

impl SalaryFilter {
    pub fn where_clause(&self, alias: &str) -> Result<WhereClause, HrError> {
        let mut clause = period_clause(alias, &self.month, &self.year)?;
        if let Some(status) = present(&self.status) {
            let status = SalaryStatus::parse_field(status)?;
            clause.push(
                format!("{alias}.status = ?"),
                [SqlValue::Text(status.to_string())],
            );
        }
        Ok(clause)
    }

    pub fn file_name(&self) -> String {
        period_file_name("salary", &self.month, &self.year)
    }
}

fn period_clause(
    alias: &str,
    month: &Option<String>,
    year: &Option<String>,
) -> Result<WhereClause, HrError> {
    printable("month", month)?;
    printable("year", year)?;

    let mut clause = WhereClause::default();
    if let Some(month) = present(month) {
        // stored names are canonical, so equality after parsing is case-insensitive
        let month = Month::parse_field("month", month)?;
        clause.push(
            format!("{alias}.month = ?"),
            [SqlValue::Text(month.to_string())],
        );
    }
    if let Some(year) = present(year) {
        let year = validation::year_text(year)?;
        clause.push(format!("{alias}.year = ?"), [SqlValue::I64(year as i64)]);
    }
    Ok(clause)
}

fn period_file_name(prefix: &str, month: &Option<String>, year: &Option<String>) -> String {
    format!(
        "{}_{}_{}.csv",
        prefix,
        month.as_deref().unwrap_or(""),
        year.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_unconstrained() {
        assert!(EmployeeSearch::default().where_clause().is_empty());
        assert!(EmployeeSearch::new("   ").where_clause().is_empty());
    }

    #[test]
    fn search_matches_four_columns() {
        let clause = EmployeeSearch::new("203").where_clause();
        assert_eq!(clause.values().len(), 4);
        assert!(clause.to_sql().contains("designation LIKE ?"));
        assert_eq!(clause.values()[0], SqlValue::Text("%203%".into()));
    }

    #[test]
    fn attendance_filter_canonicalises_month() {
        let clause = AttendanceFilter::new(Some("mArCh"), Some("2025"))
            .where_clause("a")
            .unwrap();
        assert_eq!(clause.to_sql(), "WHERE a.month = ? AND a.year = ?");
        assert_eq!(
            clause.values(),
            &[SqlValue::Text("March".into()), SqlValue::I64(2025)]
        );
    }

    #[test]
    fn empty_parameters_mean_no_constraint() {
        let clause = AttendanceFilter::new(Some(""), Some(""))
            .where_clause("a")
            .unwrap();
        assert!(clause.is_empty());
    }

    #[test]
    fn bad_filter_values_are_field_errors() {
        let err = AttendanceFilter::new(Some("Smarch"), None)
            .where_clause("a")
            .unwrap_err();
        assert_eq!(err.field(), Some("month"));

        let err = AttendanceFilter::new(None, Some("next"))
            .where_clause("a")
            .unwrap_err();
        assert_eq!(err.field(), Some("year"));

        let filter = SalaryFilter {
            status: Some("Pending".into()),
            ..Default::default()
        };
        assert_eq!(filter.where_clause("s").unwrap_err().field(), Some("status"));
    }

    #[test]
    fn salary_filter_adds_status() {
        let filter = SalaryFilter {
            month: None,
            year: Some("2025".into()),
            status: Some("Unpaid".into()),
        };
        let clause = filter.where_clause("s").unwrap();
        assert_eq!(clause.to_sql(), "WHERE s.year = ? AND s.status = ?");
    }

    #[test]
    fn control_characters_in_period_are_rejected() {
        let err = AttendanceFilter::new(Some("March\n"), None)
            .where_clause("a")
            .unwrap_err();
        assert_eq!(err.field(), Some("month"));

        let filter = SalaryFilter {
            year: Some("2025\t".into()),
            ..Default::default()
        };
        assert_eq!(filter.where_clause("s").unwrap_err().field(), Some("year"));

        // surrounding spaces are still fine
        assert!(AttendanceFilter::new(Some(" March "), None)
            .where_clause("a")
            .is_ok());
    }

    #[test]
    fn file_names_embed_raw_filter_values() {
        assert_eq!(
            AttendanceFilter::new(Some("march"), Some("2025")).file_name(),
            "attendance_march_2025.csv"
        );
        assert_eq!(AttendanceFilter::default().file_name(), "attendance__.csv");
        let filter = SalaryFilter {
            month: Some("".into()),
            year: Some("2024".into()),
            status: Some("Paid".into()),
        };
        assert_eq!(filter.file_name(), "salary__2024.csv");
    }
}
