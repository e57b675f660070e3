use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::auth::AuthenticatedUser;

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

#[get("/status")]
pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Server is running!" }))
}

/// Echoes the authenticated caller. Mounted behind `AuthGuard`.
#[get("")]
pub async fn private(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "This is a protected route",
        "user": user.0
    }))
}
