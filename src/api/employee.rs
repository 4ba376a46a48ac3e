use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::model::EmployeeInput;
use crate::query::EmployeeSearch;
use crate::store::employee;

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeSearch),
    responses(
        (status = 200, description = "Employees ordered by employee ID", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeSearch>,
) -> actix_web::Result<impl Responder> {
    let employees = employee::search(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error", body = Object, example = json!({
            "message": "Invalid value for 'name': This field is required",
            "field": "name"
        })),
        (status = 409, description = "Duplicate employee ID or CNIC", body = Object, example = json!({
            "message": "A record with this employee_id already exists",
            "field": "employee_id"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<EmployeeInput>,
) -> actix_web::Result<impl Responder> {
    let created = employee::create(pool.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Get Employee by ID, with recent attendance and salary
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeProfile),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let profile = employee::profile(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee ID")
    ),
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Duplicate employee ID or CNIC")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<EmployeeInput>,
) -> actix_web::Result<impl Responder> {
    let updated = employee::update(pool.get_ref(), path.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Employee along with its attendance and salary records
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee A. Khan deleted successfully"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let deleted = employee::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Employee {} deleted successfully", deleted.name)
    })))
}

/// Employee details by employee ID
#[utoipa::path(
    get,
    path = "/api/employee-details/{employee_id}",
    params(
        ("employee_id", Path, description = "Business employee ID, e.g. E100")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetails),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn employee_details(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let details = employee::details(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}
