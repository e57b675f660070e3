use crate::{
    auth::{credentials, LoginRequest, RegisterRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Creates a new account. No token is returned; the client logs in afterwards.
///
/// ## Responses:
/// - `201 Created`: `{"message": "User registered successfully"}`.
/// - `400 Bad Request`: missing or invalid fields (`errors` list), or the email is
///   already registered.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    credentials::register(state.users.as_ref(), register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "User registered successfully" })))
}

/// Login user
///
/// Authenticates a user and returns a bearer token together with the account.
///
/// ## Responses:
/// - `200 OK`: `{"token": ..., "user": {...}}`.
/// - `400 Bad Request`: missing fields, or invalid credentials.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = credentials::login(
        state.users.as_ref(),
        &state.tokens,
        login_data.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
