use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::SalaryInput;
use crate::query::SalaryFilter;
use crate::store::salary;

#[utoipa::path(
    get,
    path = "/api/salary",
    params(SalaryFilter),
    responses(
        (status = 200, description = "Matching salary records", body = [SalaryEntry]),
        (status = 400, description = "Unreadable month, year or status filter")
    ),
    tag = "Salary"
)]
pub async fn list_salaries(
    pool: web::Data<SqlitePool>,
    query: web::Query<SalaryFilter>,
) -> actix_web::Result<impl Responder> {
    let entries = salary::list(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Create a salary record. Status is derived from the amounts.
#[utoipa::path(
    post,
    path = "/api/salary",
    request_body = SalaryInput,
    responses(
        (status = 201, description = "Salary created", body = Salary),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Salary already recorded for this month")
    ),
    tag = "Salary"
)]
pub async fn create_salary(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SalaryInput>,
) -> actix_web::Result<impl Responder> {
    let created = salary::create(pool.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/salary/{id}",
    params(
        ("id", Path, description = "Salary record ID")
    ),
    responses(
        (status = 200, body = Salary),
        (status = 404, description = "Salary record not found")
    ),
    tag = "Salary"
)]
pub async fn get_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let record = salary::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Update a salary record. Status is re-derived on every save.
#[utoipa::path(
    put,
    path = "/api/salary/{id}",
    params(
        ("id", Path, description = "Salary record ID")
    ),
    request_body = SalaryInput,
    responses(
        (status = 200, description = "Salary updated", body = Salary),
        (status = 404, description = "Salary record or employee not found"),
        (status = 409, description = "Another record already covers this month")
    ),
    tag = "Salary"
)]
pub async fn update_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<SalaryInput>,
) -> actix_web::Result<impl Responder> {
    let updated = salary::update(pool.get_ref(), path.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/salary/{id}",
    params(
        ("id", Path, description = "Salary record ID")
    ),
    responses(
        (status = 200, description = "Salary deleted"),
        (status = 404, description = "Salary record not found")
    ),
    tag = "Salary"
)]
pub async fn delete_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    salary::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary record deleted successfully"
    })))
}
