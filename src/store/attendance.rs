use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{HrError, HrResult};
use crate::model::{Attendance, AttendanceEntry, AttendanceInput};
use crate::query::AttendanceFilter;
use crate::utils::db_utils::{WhereClause, bind_values};

const ATTENDANCE_COLUMNS: &str =
    "id, employee_pk, month, year, total_days, leaves, present_days, created_at, updated_at";

fn not_found() -> HrError {
    HrError::NotFound {
        entity: "Attendance record",
    }
}

pub async fn create(pool: &SqlitePool, input: AttendanceInput) -> HrResult<Attendance> {
    let new = input.validate(Utc::now().date_naive())?;
    let now = Utc::now();

    let sql = format!(
        r#"
        INSERT INTO attendance
        (employee_pk, month, month_no, year, total_days, leaves, present_days, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {ATTENDANCE_COLUMNS}
        "#
    );
    let attendance = sqlx::query_as::<_, Attendance>(&sql)
        .bind(new.employee_pk)
        .bind(new.month)
        .bind(new.month.number())
        .bind(new.year)
        .bind(new.total_days)
        .bind(new.leaves)
        .bind(new.present_days)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

    info!(
        id = attendance.id,
        employee_pk = attendance.employee_pk,
        month = %attendance.month,
        year = attendance.year,
        "Attendance created"
    );
    Ok(attendance)
}

pub async fn get(pool: &SqlitePool, id: i64) -> HrResult<Attendance> {
    let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = ?");
    sqlx::query_as::<_, Attendance>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)
}

pub async fn update(pool: &SqlitePool, id: i64, input: AttendanceInput) -> HrResult<Attendance> {
    let new = input.validate(Utc::now().date_naive())?;

    let sql = format!(
        r#"
        UPDATE attendance
        SET employee_pk = ?, month = ?, month_no = ?, year = ?,
            total_days = ?, leaves = ?, present_days = ?, updated_at = ?
        WHERE id = ?
        RETURNING {ATTENDANCE_COLUMNS}
        "#
    );
    let attendance = sqlx::query_as::<_, Attendance>(&sql)
        .bind(new.employee_pk)
        .bind(new.month)
        .bind(new.month.number())
        .bind(new.year)
        .bind(new.total_days)
        .bind(new.leaves)
        .bind(new.present_days)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)?;

    info!(id, "Attendance updated");
    Ok(attendance)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> HrResult<Attendance> {
    let sql = format!("DELETE FROM attendance WHERE id = ? RETURNING {ATTENDANCE_COLUMNS}");
    let attendance = sqlx::query_as::<_, Attendance>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)?;

    info!(id, "Attendance deleted");
    Ok(attendance)
}

/// Listing query shared with the CSV export.
pub(crate) fn list_sql(filter: &AttendanceFilter) -> HrResult<(String, WhereClause)> {
    let clause = filter.where_clause("a")?;
    let sql = format!(
        r#"
        SELECT a.id, a.employee_pk, a.month, a.year, a.total_days, a.leaves, a.present_days,
               a.created_at, a.updated_at,
               e.employee_id AS employee_code, e.name AS employee_name, e.cnic AS employee_cnic
        FROM attendance a
        JOIN employees e ON e.id = a.employee_pk
        {}
        ORDER BY a.year DESC, a.month_no DESC, e.employee_id ASC
        "#,
        clause.to_sql()
    );
    Ok((sql, clause))
}

pub async fn list(pool: &SqlitePool, filter: &AttendanceFilter) -> HrResult<Vec<AttendanceEntry>> {
    let (sql, clause) = list_sql(filter)?;
    debug!(sql = %sql, bindings = ?clause.values(), "Listing attendance");

    let entries = bind_values(sqlx::query_as::<_, AttendanceEntry>(&sql), clause.values())
        .fetch_all(pool)
        .await?;
    Ok(entries)
}

pub async fn recent_for_employee(
    pool: &SqlitePool,
    employee_pk: i64,
    limit: i64,
) -> HrResult<Vec<Attendance>> {
    let sql = format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE employee_pk = ? \
         ORDER BY year DESC, month_no DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, Attendance>(&sql)
        .bind(employee_pk)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
