//! CSV exports with a fixed column schema per entity.
//!
//! Absent optional values become empty cells. Amounts are written with two
//! decimal places and dates as `YYYY-MM-DD`.

use csv::Writer;
use futures_util::StreamExt;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{HrError, HrResult};
use crate::model::{AttendanceEntry, Employee, SalaryEntry};
use crate::query::{AttendanceFilter, SalaryFilter};
use crate::store::employee::EMPLOYEE_COLUMNS;
use crate::store::{attendance, salary};
use crate::utils::db_utils::bind_values;

pub const EMPLOYEE_HEADERS: [&str; 10] = [
    "Employee ID",
    "Name",
    "Father Name",
    "Mother Name",
    "CNIC",
    "Designation",
    "Contact",
    "Address",
    "Date Joined",
    "Status",
];

pub const ATTENDANCE_HEADERS: [&str; 8] = [
    "Employee ID",
    "Name",
    "CNIC",
    "Month",
    "Year",
    "Total Days",
    "Leaves",
    "Present Days",
];

pub const SALARY_HEADERS: [&str; 9] = [
    "Employee ID",
    "Name",
    "CNIC",
    "Month",
    "Year",
    "Total Salary",
    "Received Salary",
    "Status",
    "Payment Date",
];

pub const EMPLOYEES_FILE_NAME: &str = "employees.csv";

/// A finished export, ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: Vec<u8>,
    pub rows: usize,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn employee_row(e: &Employee) -> Vec<String> {
    vec![
        e.employee_id.clone(),
        e.name.clone(),
        text(&e.father_name),
        text(&e.mother_name),
        text(&e.cnic),
        text(&e.designation),
        text(&e.contact_number),
        text(&e.address),
        e.date_joined.format("%Y-%m-%d").to_string(),
        if e.is_active { "Active" } else { "Inactive" }.to_string(),
    ]
}

pub fn attendance_row(entry: &AttendanceEntry) -> Vec<String> {
    let a = &entry.attendance;
    vec![
        entry.employee_code.clone(),
        entry.employee_name.clone(),
        text(&entry.employee_cnic),
        a.month.to_string(),
        a.year.to_string(),
        a.total_days.to_string(),
        a.leaves.to_string(),
        a.present_days.to_string(),
    ]
}

pub fn salary_row(entry: &SalaryEntry) -> Vec<String> {
    let s = &entry.salary;
    vec![
        entry.employee_code.clone(),
        entry.employee_name.clone(),
        text(&entry.employee_cnic),
        s.month.to_string(),
        s.year.to_string(),
        format!("{:.2}", s.total_salary),
        format!("{:.2}", s.received_salary),
        s.status.to_string(),
        s.payment_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    ]
}

fn finish(writer: Writer<Vec<u8>>) -> HrResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| HrError::Export(e.into_error().into()))
}

/// All employees in insertion order.
pub async fn export_employees(pool: &SqlitePool) -> HrResult<CsvExport> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(EMPLOYEE_HEADERS)?;

    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id ASC");
    let mut stream = sqlx::query_as::<_, Employee>(&sql).fetch(pool);
    let mut rows = 0usize;
    while let Some(row) = stream.next().await {
        writer.write_record(employee_row(&row?))?;
        rows += 1;
    }

    info!(rows, "Employee export complete");
    Ok(CsvExport {
        file_name: EMPLOYEES_FILE_NAME.to_string(),
        content: finish(writer)?,
        rows,
    })
}

pub async fn export_attendance(pool: &SqlitePool, filter: &AttendanceFilter) -> HrResult<CsvExport> {
    let (sql, clause) = attendance::list_sql(filter)?;

    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(ATTENDANCE_HEADERS)?;

    let mut stream =
        bind_values(sqlx::query_as::<_, AttendanceEntry>(&sql), clause.values()).fetch(pool);
    let mut rows = 0usize;
    while let Some(row) = stream.next().await {
        writer.write_record(attendance_row(&row?))?;
        rows += 1;
    }

    info!(rows, month = ?filter.month, year = ?filter.year, "Attendance export complete");
    Ok(CsvExport {
        file_name: filter.file_name(),
        content: finish(writer)?,
        rows,
    })
}

pub async fn export_salary(pool: &SqlitePool, filter: &SalaryFilter) -> HrResult<CsvExport> {
    let (sql, clause) = salary::list_sql(filter)?;

    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(SALARY_HEADERS)?;

    let mut stream =
        bind_values(sqlx::query_as::<_, SalaryEntry>(&sql), clause.values()).fetch(pool);
    let mut rows = 0usize;
    while let Some(row) = stream.next().await {
        writer.write_record(salary_row(&row?))?;
        rows += 1;
    }

    info!(rows, month = ?filter.month, year = ?filter.year, status = ?filter.status, "Salary export complete");
    Ok(CsvExport {
        file_name: filter.file_name(),
        content: finish(writer)?,
        rows,
    })
}
