use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::AttendanceInput;
use crate::query::AttendanceFilter;
use crate::store::attendance;

/// List attendance, newest period first
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Matching attendance records", body = [AttendanceEntry]),
        (status = 400, description = "Unreadable month or year filter")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let entries = attendance::list(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Record monthly attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendanceInput,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Attendance already recorded for this month", body = Object, example = json!({
            "message": "A record with this employee, month, year already exists",
            "field": "employee, month, year"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<AttendanceInput>,
) -> actix_web::Result<impl Responder> {
    let created = attendance::create(pool.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, body = Attendance),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let record = attendance::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    request_body = AttendanceInput,
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 404, description = "Attendance record or employee not found"),
        (status = 409, description = "Another record already covers this month")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<AttendanceInput>,
) -> actix_web::Result<impl Responder> {
    let updated =
        attendance::update(pool.get_ref(), path.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance deleted"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    attendance::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance record deleted successfully"
    })))
}
