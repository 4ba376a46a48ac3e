use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::query::{AttendanceFilter, SalaryFilter};
use crate::report::letter::{self, LetterRequest};
use crate::report::{CsvExport, export};
use crate::store::dashboard;

fn csv_attachment(export: CsvExport) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export.file_name)],
        })
        .body(export.content)
}

/// Current month at a glance
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Live totals for the current month", body = DashboardSummary)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let summary = dashboard::summary(pool.get_ref(), Utc::now().date_naive()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Generate an HR letter for an employee
#[utoipa::path(
    post,
    path = "/api/letters",
    request_body = LetterRequest,
    responses(
        (status = 200, description = "Rendered letter", body = Letter),
        (status = 400, description = "Invalid letter type", body = Object, example = json!({
            "message": "Invalid letter type: invalid_type",
            "field": "letter_type"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Letters"
)]
pub async fn generate_letter(
    pool: web::Data<SqlitePool>,
    payload: web::Json<LetterRequest>,
) -> actix_web::Result<impl Responder> {
    let letter = letter::generate_letter(pool.get_ref(), &payload, Utc::now().date_naive()).await?;
    Ok(HttpResponse::Ok().json(letter))
}

#[utoipa::path(
    get,
    path = "/api/export/employees",
    responses(
        (status = 200, description = "employees.csv", content_type = "text/csv", body = String)
    ),
    tag = "Export"
)]
pub async fn export_employees(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let export = export::export_employees(pool.get_ref()).await?;
    Ok(csv_attachment(export))
}

#[utoipa::path(
    get,
    path = "/api/export/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "attendance_{month}_{year}.csv", content_type = "text/csv", body = String),
        (status = 400, description = "Unreadable month or year filter")
    ),
    tag = "Export"
)]
pub async fn export_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let export = export::export_attendance(pool.get_ref(), &query).await?;
    Ok(csv_attachment(export))
}

#[utoipa::path(
    get,
    path = "/api/export/salary",
    params(SalaryFilter),
    responses(
        (status = 200, description = "salary_{month}_{year}.csv", content_type = "text/csv", body = String),
        (status = 400, description = "Unreadable month, year or status filter")
    ),
    tag = "Export"
)]
pub async fn export_salary(
    pool: web::Data<SqlitePool>,
    query: web::Query<SalaryFilter>,
) -> actix_web::Result<impl Responder> {
    let export = export::export_salary(pool.get_ref(), &query).await?;
    Ok(csv_attachment(export))
}

