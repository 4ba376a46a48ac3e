use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{HrError, HrResult};
use crate::model::{Employee, EmployeeDetails, EmployeeInput, EmployeeProfile, NewEmployee};
use crate::query::EmployeeSearch;
use crate::store::{attendance, salary};
use crate::utils::db_utils::bind_values;

pub(crate) const EMPLOYEE_COLUMNS: &str = "id, employee_id, name, father_name, mother_name, cnic, \
     designation, contact_number, address, date_joined, is_active";

/// How many attendance and salary rows a profile shows.
pub const PROFILE_HISTORY: i64 = 5;

fn not_found() -> HrError {
    HrError::NotFound { entity: "Employee" }
}

pub async fn create(pool: &SqlitePool, input: EmployeeInput) -> HrResult<Employee> {
    let new = input.validate(Utc::now().date_naive())?;

    let sql = format!(
        r#"
        INSERT INTO employees
        (employee_id, name, father_name, mother_name, cnic, designation, contact_number, address, date_joined, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {EMPLOYEE_COLUMNS}
        "#
    );
    let employee = bind_employee(sqlx::query_as::<_, Employee>(&sql), new)
        .fetch_one(pool)
        .await?;

    info!(id = employee.id, employee_id = %employee.employee_id, "Employee created");
    Ok(employee)
}

pub async fn get(pool: &SqlitePool, id: i64) -> HrResult<Employee> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
    sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)
}

/// Looks an employee up by the business identifier.
pub async fn get_by_employee_id(pool: &SqlitePool, employee_id: &str) -> HrResult<Employee> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ?");
    sqlx::query_as::<_, Employee>(&sql)
        .bind(employee_id.trim())
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)
}

pub async fn details(pool: &SqlitePool, employee_id: &str) -> HrResult<EmployeeDetails> {
    sqlx::query_as::<_, EmployeeDetails>(
        "SELECT name, designation, cnic FROM employees WHERE employee_id = ?",
    )
    .bind(employee_id.trim())
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found)
}

/// Replaces every editable field of an employee.
pub async fn update(pool: &SqlitePool, id: i64, input: EmployeeInput) -> HrResult<Employee> {
    // an edit never resets date_joined to today
    let current = get(pool, id).await?;
    let new = input.validate(current.date_joined)?;

    let sql = format!(
        r#"
        UPDATE employees
        SET employee_id = ?, name = ?, father_name = ?, mother_name = ?, cnic = ?,
            designation = ?, contact_number = ?, address = ?, date_joined = ?, is_active = ?
        WHERE id = ?
        RETURNING {EMPLOYEE_COLUMNS}
        "#
    );
    let employee = bind_employee(sqlx::query_as::<_, Employee>(&sql), new)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)?;

    info!(id, employee_id = %employee.employee_id, "Employee updated");
    Ok(employee)
}

/// Deletes an employee together with all of its attendance and salary rows.
///
/// Every statement writes, so the transaction holds the write lock from its
/// first statement on.
pub async fn delete(pool: &SqlitePool, id: i64) -> HrResult<Employee> {
    let mut tx = pool.begin().await?;

    let attendance = sqlx::query("DELETE FROM attendance WHERE employee_pk = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let salaries = sqlx::query("DELETE FROM salaries WHERE employee_pk = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let sql = format!("DELETE FROM employees WHERE id = ? RETURNING {EMPLOYEE_COLUMNS}");
    // dropping `tx` on a miss rolls back the two deletes above
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(not_found)?;

    tx.commit().await?;

    info!(
        id,
        employee_id = %employee.employee_id,
        attendance,
        salaries,
        "Employee deleted"
    );
    Ok(employee)
}

/// Employees matching the search, ordered by `employee_id`.
pub async fn search(pool: &SqlitePool, search: &EmployeeSearch) -> HrResult<Vec<Employee>> {
    let clause = search.where_clause();
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees {} ORDER BY employee_id ASC",
        clause.to_sql()
    );
    debug!(sql = %sql, bindings = ?clause.values(), "Searching employees");

    let employees = bind_values(sqlx::query_as::<_, Employee>(&sql), clause.values())
        .fetch_all(pool)
        .await?;
    Ok(employees)
}

pub async fn profile(pool: &SqlitePool, id: i64) -> HrResult<EmployeeProfile> {
    let employee = get(pool, id).await?;
    let recent_attendance = attendance::recent_for_employee(pool, id, PROFILE_HISTORY).await?;
    let recent_salaries = salary::recent_for_employee(pool, id, PROFILE_HISTORY).await?;

    Ok(EmployeeProfile {
        employee,
        recent_attendance,
        recent_salaries,
    })
}

fn bind_employee<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Sqlite, Employee, sqlx::sqlite::SqliteArguments<'q>>,
    new: NewEmployee,
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, Employee, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(new.employee_id)
        .bind(new.name)
        .bind(new.father_name)
        .bind(new.mother_name)
        .bind(new.cnic)
        .bind(new.designation)
        .bind(new.contact_number)
        .bind(new.address)
        .bind(new.date_joined)
        .bind(new.is_active)
}
