pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest, HttpResponse, Responder,
};
use serde_json::json;

use crate::auth::AuthGuard;
use crate::error::AppError;

/// Registers the API routes. Mounted once under `/api/v1` and once under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(health::status)
        .service(
            web::scope("/users")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/private")
                .wrap(AuthGuard)
                .service(health::private),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthGuard)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Fallback for unmatched paths.
pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(json!({ "error": "Route not found" }))
}
