use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{HrError, HrResult};
use crate::model::{Salary, SalaryEntry, SalaryInput};
use crate::query::SalaryFilter;
use crate::utils::db_utils::{WhereClause, bind_values};

pub(crate) const SALARY_COLUMNS: &str = "id, employee_pk, month, year, total_salary, \
     received_salary, status, payment_date, created_at, updated_at";

fn not_found() -> HrError {
    HrError::NotFound {
        entity: "Salary record",
    }
}

pub async fn create(pool: &SqlitePool, input: SalaryInput) -> HrResult<Salary> {
    let today = Utc::now().date_naive();
    let new = input.validate(today)?;
    let (status, payment_date) = new.derive_status(today);
    let now = Utc::now();

    let sql = format!(
        r#"
        INSERT INTO salaries
        (employee_pk, month, month_no, year, total_salary, received_salary, status, payment_date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {SALARY_COLUMNS}
        "#
    );
    let salary = sqlx::query_as::<_, Salary>(&sql)
        .bind(new.employee_pk)
        .bind(new.month)
        .bind(new.month.number())
        .bind(new.year)
        .bind(new.total_salary.to_string())
        .bind(new.received_salary.to_string())
        .bind(status)
        .bind(payment_date)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

    info!(
        id = salary.id,
        employee_pk = salary.employee_pk,
        status = %salary.status,
        "Salary created"
    );
    Ok(salary)
}

pub async fn get(pool: &SqlitePool, id: i64) -> HrResult<Salary> {
    let sql = format!("SELECT {SALARY_COLUMNS} FROM salaries WHERE id = ?");
    sqlx::query_as::<_, Salary>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)
}

/// Replaces a salary record and re-derives its status.
///
/// A payment date missing from the input keeps the stored one. The merge
/// happens inside the single UPDATE, so no read precedes the write.
pub async fn update(pool: &SqlitePool, id: i64, input: SalaryInput) -> HrResult<Salary> {
    let today = Utc::now().date_naive();
    let new = input.validate(today)?;
    // fallback is the input date, or today when the record becomes Paid undated
    let (status, fallback) = new.derive_status(today);

    let sql = format!(
        r#"
        UPDATE salaries
        SET employee_pk = ?, month = ?, month_no = ?, year = ?, total_salary = ?,
            received_salary = ?, status = ?, payment_date = COALESCE(?, payment_date, ?),
            updated_at = ?
        WHERE id = ?
        RETURNING {SALARY_COLUMNS}
        "#
    );
    let salary = sqlx::query_as::<_, Salary>(&sql)
        .bind(new.employee_pk)
        .bind(new.month)
        .bind(new.month.number())
        .bind(new.year)
        .bind(new.total_salary.to_string())
        .bind(new.received_salary.to_string())
        .bind(status)
        .bind(new.payment_date)
        .bind(fallback)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)?;

    info!(id, status = %salary.status, "Salary updated");
    Ok(salary)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> HrResult<Salary> {
    let sql = format!("DELETE FROM salaries WHERE id = ? RETURNING {SALARY_COLUMNS}");
    let salary = sqlx::query_as::<_, Salary>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)?;

    info!(id, "Salary deleted");
    Ok(salary)
}

pub(crate) fn list_sql(filter: &SalaryFilter) -> HrResult<(String, WhereClause)> {
    let clause = filter.where_clause("s")?;
    let sql = format!(
        r#"
        SELECT s.id, s.employee_pk, s.month, s.year, s.total_salary, s.received_salary,
               s.status, s.payment_date, s.created_at, s.updated_at,
               e.employee_id AS employee_code, e.name AS employee_name, e.cnic AS employee_cnic
        FROM salaries s
        JOIN employees e ON e.id = s.employee_pk
        {}
        ORDER BY s.year DESC, s.month_no DESC, e.employee_id ASC
        "#,
        clause.to_sql()
    );
    Ok((sql, clause))
}

pub async fn list(pool: &SqlitePool, filter: &SalaryFilter) -> HrResult<Vec<SalaryEntry>> {
    let (sql, clause) = list_sql(filter)?;
    debug!(sql = %sql, bindings = ?clause.values(), "Listing salaries");

    let entries = bind_values(sqlx::query_as::<_, SalaryEntry>(&sql), clause.values())
        .fetch_all(pool)
        .await?;
    Ok(entries)
}

pub async fn recent_for_employee(
    pool: &SqlitePool,
    employee_pk: i64,
    limit: i64,
) -> HrResult<Vec<Salary>> {
    let sql = format!(
        "SELECT {SALARY_COLUMNS} FROM salaries WHERE employee_pk = ? \
         ORDER BY year DESC, month_no DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, Salary>(&sql)
        .bind(employee_pk)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
