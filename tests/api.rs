//! HTTP tests for the routes, run against an in-memory database.

use actix_http::Request;
use actix_web::{
    App,
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{StatusCode, header},
    test,
    web::Data,
};
use serde_json::{Value, json};
use std::net::SocketAddr;

use hr_portal::config::Config;
use hr_portal::db::init_db;
use hr_portal::routes;

// =============================================================================
// Test Helpers
// =============================================================================

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

async fn app()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let pool = init_db("sqlite::memory:").await.unwrap();
    let config = Config::in_memory();
    test::init_service(
        App::new()
            .app_data(Data::new(pool))
            .configure(|cfg| routes::configure(cfg, &config)),
    )
    .await
}

async fn send<S, B>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req.peer_addr(peer()).to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

fn put(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::put().uri(uri).set_json(body)
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri)
}

// =============================================================================
// Employees
// =============================================================================

#[actix_web::test]
async fn test_employee_crud_round() {
    let app = app().await;

    let (status, created) = send(
        &app,
        post(
            "/api/employees",
            json!({ "employee_id": "E100", "name": "A. Khan", "designation": "CSR" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["is_active"], json!(true));

    let (status, profile) = send(&app, get(&format!("/api/employees/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["employee"]["name"], "A. Khan");
    assert_eq!(profile["recent_attendance"], json!([]));

    let (status, updated) = send(
        &app,
        put(
            &format!("/api/employees/{id}"),
            json!({ "employee_id": "E100", "name": "A. Khan", "designation": "Team Lead" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["designation"], "Team Lead");

    let (status, details) = send(&app, get("/api/employee-details/E100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details, json!({ "name": "A. Khan", "designation": "Team Lead", "cnic": null }));

    let (status, body) = send(
        &app,
        test::TestRequest::delete().uri(&format!("/api/employees/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee A. Khan deleted successfully");

    let (status, body) = send(&app, get(&format!("/api/employees/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employee not found");
}

#[actix_web::test]
async fn test_duplicate_employee_is_a_conflict() {
    let app = app().await;
    let body = json!({ "employee_id": "E100", "name": "A. Khan" });
    send(&app, post("/api/employees", body.clone())).await;

    let (status, err) = send(&app, post("/api/employees", body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["field"], "employee_id");
}

#[actix_web::test]
async fn test_invalid_employee_payloads_are_bad_requests() {
    let app = app().await;

    let (status, err) = send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "name");

    // missing required key never reaches the store
    let (status, err) = send(&app, post("/api/employees", json!({ "employee_id": "E100" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].is_string());

    let (status, _) = send(&app, get("/api/employees/not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_employee_search_query() {
    let app = app().await;
    for (id, name) in [("E300", "Zara"), ("E203", "Omar"), ("E100", "Hina")] {
        send(&app, post("/api/employees", json!({ "employee_id": id, "name": name }))).await;
    }

    let (status, found) = send(&app, get("/api/employees?q=203")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, all) = send(&app, get("/api/employees")).await;
    let ids: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["employee_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["E100", "E203", "E300"]);
}

// =============================================================================
// Attendance and salary
// =============================================================================

#[actix_web::test]
async fn test_attendance_duplicate_month_is_a_conflict() {
    let app = app().await;
    let (_, employee) = send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "A. Khan" })),
    )
    .await;
    let record = json!({
        "employee": employee["id"],
        "month": "March",
        "year": 2025,
        "total_days": 26,
        "leaves": 2,
        "present_days": 24
    });

    let (status, created) = send(&app, post("/api/attendance", record.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["month"], "March");

    let (status, err) = send(&app, post("/api/attendance", record)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["field"], "employee, month, year");

    let (status, list) = send(&app, get("/api/attendance?month=march&year=2025")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["employee_code"], "E100");
    assert_eq!(list[0]["present_days"], 24);

    let (status, err) = send(&app, get("/api/attendance?year=twenty")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "year");
}

#[actix_web::test]
async fn test_attendance_for_missing_employee_is_not_found() {
    let app = app().await;
    let (status, err) = send(
        &app,
        post(
            "/api/attendance",
            json!({ "employee": 99, "month": "March", "year": 2025 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["message"], "Employee not found");
}

#[actix_web::test]
async fn test_salary_status_is_derived() {
    let app = app().await;
    let (_, employee) = send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "A. Khan" })),
    )
    .await;

    let (status, created) = send(
        &app,
        post(
            "/api/salary",
            json!({
                "employee": employee["id"],
                "month": "March",
                "year": 2025,
                "total_salary": "50000.00",
                "received_salary": "50000.00",
                "payment_date": "2025-03-31"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Paid");
    assert_eq!(created["payment_date"], "2025-03-31");

    let id = created["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        put(
            &format!("/api/salary/{id}"),
            json!({
                "employee": employee["id"],
                "month": "March",
                "year": 2025,
                "total_salary": "50000.00",
                "received_salary": "100.00"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Unpaid");
    assert_eq!(updated["payment_date"], "2025-03-31");

    let (status, list) = send(&app, get("/api/salary?status=Unpaid")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, err) = send(&app, get("/api/salary?status=Pending")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "status");

    let (status, _) = send(&app, test::TestRequest::delete().uri(&format!("/api/salary/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get(&format!("/api/salary/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Letters, exports and dashboard
// =============================================================================

#[actix_web::test]
async fn test_letter_with_unknown_type_is_rejected() {
    let app = app().await;
    send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "A. Khan" })),
    )
    .await;

    let (status, err) = send(
        &app,
        post(
            "/api/letters",
            json!({ "employee_id": "E100", "letter_type": "invalid_type" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "letter_type");

    let (status, letter) = send(
        &app,
        post(
            "/api/letters",
            json!({ "employee_id": "E100", "letter_type": "warning_letter" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(letter["title"], "Warning Letter");

    let (status, _) = send(&app, post("/api/letters", json!({ "employee_id": "E404" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_exports_are_csv_attachments() {
    let app = app().await;
    send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "A. Khan" })),
    )
    .await;

    let req = get("/api/export/employees").peer_addr(peer()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/csv");
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("employees.csv"));
    let body = test::read_body(resp).await;
    assert!(String::from_utf8(body.to_vec()).unwrap().contains("E100,A. Khan"));

    let req = get("/api/export/salary?month=March&year=2025")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert!(disposition.to_str().unwrap().contains("salary_March_2025.csv"));

    let (status, _) = send(&app, get("/api/export/attendance?month=Smarch")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_dashboard_reports_current_month() {
    let app = app().await;
    send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "A. Khan" })),
    )
    .await;

    let (status, summary) = send(&app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["active_employees"], 1);
    assert_eq!(summary["total_present_days"], 0);
}

// =============================================================================
// Malformed input
// =============================================================================

#[actix_web::test]
async fn test_malformed_numbers_are_reported_per_field() {
    let app = app().await;
    let (_, employee) = send(
        &app,
        post("/api/employees", json!({ "employee_id": "E100", "name": "A. Khan" })),
    )
    .await;
    let id = employee["id"].clone();

    let attendance = json!({
        "employee": id,
        "month": "March",
        "year": 2025,
        "total_days": 26,
        "leaves": 2,
        "present_days": 24
    });
    for field in ["year", "total_days", "leaves", "present_days", "employee"] {
        let mut body = attendance.clone();
        body[field] = json!("two");
        let (status, err) = send(&app, post("/api/attendance", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(err["field"], field);
    }

    let salary = json!({
        "employee": id,
        "month": "March",
        "year": 2025,
        "total_salary": "50000.00",
        "received_salary": "50000.00"
    });
    for field in ["year", "total_salary", "received_salary", "employee"] {
        let mut body = salary.clone();
        body[field] = json!("abc");
        let (status, err) = send(&app, post("/api/salary", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(err["field"], field);
    }

    // numbers sent as text are still accepted
    let mut body = salary.clone();
    body["year"] = json!("2025");
    body["total_salary"] = json!(50000);
    let (status, created) = send(&app, post("/api/salary", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["total_salary"], "50000.00");
}

#[actix_web::test]
async fn test_control_characters_in_export_filters_are_bad_requests() {
    let app = app().await;

    let (status, err) = send(&app, get("/api/export/attendance?month=March%0A")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "month");

    let (status, err) = send(&app, get("/api/export/salary?year=2025%09")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "year");
}
