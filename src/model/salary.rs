use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::HrError;
use crate::model::month::Month;
use crate::validation;

/// Payment status of a salary record. Always derived, never accepted as input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema, sqlx::Type,
)]
pub enum SalaryStatus {
    Paid,
    Unpaid,
}

impl SalaryStatus {
    pub fn parse_field(value: &str) -> Result<Self, HrError> {
        value
            .trim()
            .parse()
            .map_err(|_| HrError::validation("status", "must be 'Paid' or 'Unpaid'"))
    }
}

/// Applies the payment rule to a salary about to be saved.
///
/// Fully received means `Paid`, and an unset payment date becomes `today`.
/// Anything less is `Unpaid` and the payment date is kept as it is.
pub fn derive_status(
    total_salary: Decimal,
    received_salary: Decimal,
    payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> (SalaryStatus, Option<NaiveDate>) {
    if received_salary >= total_salary {
        (SalaryStatus::Paid, payment_date.or(Some(today)))
    } else {
        (SalaryStatus::Unpaid, payment_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Salary {
    pub id: i64,
    pub employee_pk: i64,
    pub month: Month,
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(value_type = String, example = "50000.00")]
    pub total_salary: Decimal,
    #[schema(value_type = String, example = "50000.00")]
    pub received_salary: Decimal,
    pub status: SalaryStatus,
    #[schema(value_type = Option<String>, format = "date")]
    pub payment_date: Option<NaiveDate>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

// amounts live in TEXT columns; sqlx has no sqlite codec for Decimal
impl<'r> FromRow<'r, SqliteRow> for Salary {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            employee_pk: row.try_get("employee_pk")?,
            month: row.try_get("month")?,
            year: row.try_get("year")?,
            total_salary: decimal_column(row, "total_salary")?,
            received_salary: decimal_column(row, "received_salary")?,
            status: row.try_get("status")?,
            payment_date: row.try_get("payment_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    raw.parse::<Decimal>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// Salary form payload. Amounts may arrive as JSON numbers or numeric text.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SalaryInput {
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
    #[schema(value_type = String, example = "50000.00")]
    pub total_salary: Value,
    /// Defaults to 0.
    #[serde(default)]
    #[schema(value_type = String, example = "50000.00")]
    pub received_salary: Value,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = "date")]
    pub payment_date: Option<NaiveDate>,
}

impl SalaryInput {
    pub fn validate(self, today: NaiveDate) -> Result<NewSalary, HrError> {
        let year = validation::integer("year", &self.year)?.unwrap_or_else(|| today.year() as i64);
        let total_salary = validation::decimal("total_salary", &self.total_salary)?
            .ok_or_else(|| HrError::validation("total_salary", "This field is required"))?;
        let received_salary =
            validation::decimal("received_salary", &self.received_salary)?.unwrap_or_default();
        Ok(NewSalary {
            employee_pk: validation::required_integer("employee", &self.employee)?,
            month: Month::parse_field("month", &self.month)?,
            year: validation::year(year)?,
            total_salary: validation::amount("total_salary", total_salary)?,
            received_salary: validation::amount("received_salary", received_salary)?,
            payment_date: self.payment_date,
        })
    }
}

/// A validated salary whose status has not been derived yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSalary {
    pub employee_pk: i64,
    pub month: Month,
    pub year: i32,
    pub total_salary: Decimal,
    pub received_salary: Decimal,
    pub payment_date: Option<NaiveDate>,
}

impl NewSalary {
    pub fn derive_status(&self, today: NaiveDate) -> (SalaryStatus, Option<NaiveDate>) {
        derive_status(
            self.total_salary,
            self.received_salary,
            self.payment_date,
            today,
        )
    }
}

/// Salary row joined with the identifying columns of its employee.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct SalaryEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub salary: Salary,
    #[schema(example = "E100")]
    pub employee_code: String,
    #[schema(example = "A. Khan")]
    pub employee_name: String,
    #[schema(nullable = true)]
    pub employee_cnic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn full_payment_is_paid_and_dated_today() {
        let (status, date) = derive_status(dec("50000.00"), dec("50000.00"), None, day(31));
        assert_eq!(status, SalaryStatus::Paid);
        assert_eq!(date, Some(day(31)));
    }

    #[test]
    fn overpayment_is_paid() {
        let (status, _) = derive_status(dec("100.00"), dec("150.00"), None, day(1));
        assert_eq!(status, SalaryStatus::Paid);
    }

    #[test]
    fn existing_payment_date_is_kept() {
        let (status, date) = derive_status(dec("10.00"), dec("10.00"), Some(day(5)), day(31));
        assert_eq!(status, SalaryStatus::Paid);
        assert_eq!(date, Some(day(5)));
    }

    #[test]
    fn partial_payment_is_unpaid_and_date_untouched() {
        assert_eq!(
            derive_status(dec("50000.00"), dec("49999.99"), None, day(31)),
            (SalaryStatus::Unpaid, None)
        );
        assert_eq!(
            derive_status(dec("50000.00"), dec("0"), Some(day(2)), day(31)),
            (SalaryStatus::Unpaid, Some(day(2)))
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let first = derive_status(dec("10.00"), dec("10.00"), None, day(10));
        let second = derive_status(dec("10.00"), dec("10.00"), first.1, day(20));
        assert_eq!(first, second);
    }

    #[test]
    fn client_status_is_not_part_of_the_input() {
        let input: SalaryInput = serde_json::from_str(
            r#"{"employee":1,"month":"March","year":2025,"total_salary":"100.00","received_salary":"0","status":"Paid"}"#,
        )
        .unwrap();
        let valid = input.validate(day(1)).unwrap();
        assert_eq!(valid.derive_status(day(1)).0, SalaryStatus::Unpaid);
    }

    #[test]
    fn malformed_amounts_name_their_field() {
        let input: SalaryInput = serde_json::from_str(
            r#"{"employee":1,"month":"March","year":2025,"total_salary":"abc"}"#,
        )
        .unwrap();
        assert_eq!(input.validate(day(1)).unwrap_err().field(), Some("total_salary"));

        let input: SalaryInput = serde_json::from_str(
            r#"{"employee":1,"month":"March","total_salary":100,"received_salary":"lots"}"#,
        )
        .unwrap();
        assert_eq!(input.validate(day(1)).unwrap_err().field(), Some("received_salary"));

        let input: SalaryInput =
            serde_json::from_str(r#"{"employee":1,"month":"March","year":2025}"#).unwrap();
        assert_eq!(input.validate(day(1)).unwrap_err().field(), Some("total_salary"));
    }

    #[test]
    fn numeric_amounts_are_accepted() {
        let input: SalaryInput = serde_json::from_str(
            r#"{"employee":"1","month":"March","year":"2025","total_salary":50000,"received_salary":49999.5}"#,
        )
        .unwrap();
        let valid = input.validate(day(1)).unwrap();
        assert_eq!(valid.employee_pk, 1);
        assert_eq!(valid.total_salary, dec("50000.00"));
        assert_eq!(valid.received_salary, dec("49999.50"));
    }

    #[test]
    fn status_filter_parsing_is_exact() {
        assert_eq!(SalaryStatus::parse_field("Paid").unwrap(), SalaryStatus::Paid);
        assert_eq!(SalaryStatus::parse_field("paid").unwrap_err().field(), Some("status"));
    }
}
