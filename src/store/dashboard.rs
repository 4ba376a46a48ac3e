use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::HrResult;
use crate::model::{Month, Salary};
use crate::store::salary::SALARY_COLUMNS;

/// Headline figures for the current month.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub month: Month,
    #[schema(example = 2025)]
    pub year: i32,
    pub active_employees: i64,
    pub total_present_days: i64,
    pub total_leaves: i64,
    #[schema(value_type = String, example = "150000.00")]
    pub total_payable: Decimal,
    #[schema(value_type = String, example = "100000.00")]
    pub total_paid: Decimal,
}

pub async fn summary(pool: &SqlitePool, today: NaiveDate) -> HrResult<DashboardSummary> {
    let month = Month::from_number(today.month()).unwrap_or(Month::January);
    let year = today.year();

    let active_employees: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE is_active = 1")
            .fetch_one(pool)
            .await?;

    let (total_present_days, total_leaves): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(present_days), 0), COALESCE(SUM(leaves), 0)
        FROM attendance
        WHERE month = ? AND year = ?
        "#,
    )
    .bind(month)
    .bind(year)
    .fetch_one(pool)
    .await?;

    // amounts are TEXT, so they are summed as decimals here rather than in SQL
    let sql = format!("SELECT {SALARY_COLUMNS} FROM salaries WHERE month = ? AND year = ?");
    let salaries = sqlx::query_as::<_, Salary>(&sql)
        .bind(month)
        .bind(year)
        .fetch_all(pool)
        .await?;

    let mut total_payable = Decimal::new(0, 2);
    let mut total_paid = Decimal::new(0, 2);
    for salary in &salaries {
        total_payable += salary.total_salary;
        total_paid += salary.received_salary;
    }

    Ok(DashboardSummary {
        month,
        year,
        active_employees,
        total_present_days,
        total_leaves,
        total_payable,
        total_paid,
    })
}
