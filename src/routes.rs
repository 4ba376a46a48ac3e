use crate::{
    api::{attendance, employee, report, salary},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, web};
use serde_json::json;

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // finish() only fails for a zero period or burst, both clamped above
        .unwrap_or_default();
    Governor::new(&cfg)
}

/// Rejects malformed JSON bodies and query strings with a 400 JSON body.
fn bad_request(message: String, err: actix_web::Error) -> actix_web::Error {
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({ "message": message })),
    )
    .into()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let api_limiter = build_limiter(config.rate_api_per_min);

    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| bad_request(err.to_string(), err.into())),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| bad_request(err.to_string(), err.into())),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| bad_request(err.to_string(), err.into())),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter) // rate limiting
            .route("/dashboard", web::get().to(report::dashboard))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .route(
                "/employee-details/{employee_id}",
                web::get().to(employee::employee_details),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::create_attendance)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_attendance))
                            .route(web::put().to(attendance::update_attendance))
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            )
            .service(
                web::scope("/salary")
                    .service(
                        web::resource("")
                            .route(web::get().to(salary::list_salaries))
                            .route(web::post().to(salary::create_salary)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(salary::get_salary))
                            .route(web::put().to(salary::update_salary))
                            .route(web::delete().to(salary::delete_salary)),
                    ),
            )
            .route("/letters", web::post().to(report::generate_letter))
            .service(
                web::scope("/export")
                    .route("/employees", web::get().to(report::export_employees))
                    .route("/attendance", web::get().to(report::export_attendance))
                    .route("/salary", web::get().to(report::export_salary)),
            ),
    );
}
