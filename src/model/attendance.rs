use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::HrError;
use crate::model::month::Month;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    pub id: i64,
    /// Internal id of the owning employee.
    pub employee_pk: i64,
    pub month: Month,
    #[schema(example = 2025)]
    pub year: i32,
    pub total_days: u32,
    pub leaves: u32,
    pub present_days: u32,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Attendance form payload. Numbers may arrive as JSON numbers or numeric
/// text; anything else is reported against its field.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AttendanceInput {
    /// Internal id of the employee.
    #[serde(default)]
    #[schema(value_type = i64, example = 1)]
    pub employee: Value,
    #[schema(example = "March")]
    pub month: String,
    /// Defaults to the current year.
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 2025)]
    pub year: Value,
    #[serde(default)]
    #[schema(value_type = i64, example = 26)]
    pub total_days: Value,
    #[serde(default)]
    #[schema(value_type = i64, example = 2)]
    pub leaves: Value,
    #[serde(default)]
    #[schema(value_type = i64, example = 24)]
    pub present_days: Value,
}

fn count(field: &str, value: &Value) -> Result<u32, HrError> {
    validation::day_count(field, validation::integer(field, value)?.unwrap_or(0))
}

impl AttendanceInput {
    pub fn validate(self, today: NaiveDate) -> Result<NewAttendance, HrError> {
        let year = validation::integer("year", &self.year)?.unwrap_or_else(|| today.year() as i64);
        Ok(NewAttendance {
            employee_pk: validation::required_integer("employee", &self.employee)?,
            month: Month::parse_field("month", &self.month)?,
            year: validation::year(year)?,
            total_days: count("total_days", &self.total_days)?,
            leaves: count("leaves", &self.leaves)?,
            present_days: count("present_days", &self.present_days)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub employee_pk: i64,
    pub month: Month,
    pub year: i32,
    pub total_days: u32,
    pub leaves: u32,
    pub present_days: u32,
}

/// Attendance row joined with the identifying columns of its employee.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attendance: Attendance,
    #[schema(example = "E100")]
    pub employee_code: String,
    #[schema(example = "A. Khan")]
    pub employee_name: String,
    #[schema(nullable = true)]
    pub employee_cnic: Option<String>,
}
