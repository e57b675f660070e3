#![allow(dead_code)]

use actix_web::body::{to_bytes, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};
use taskdesk::auth::{AuthResponse, TokenService};
use taskdesk::routes;
use taskdesk::state::AppState;
use taskdesk::store::Stores;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Application state over a fresh in-memory store.
pub fn test_state() -> web::Data<AppState> {
    let tokens = TokenService::new(TEST_SECRET, Duration::days(7));
    web::Data::new(AppState::new(&Stores::in_memory(), tokens))
}

/// Builds the application the same way `main` mounts it.
pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(state)
            .service(routes::health::health)
            .service(web::scope("/api/v1").configure(routes::config))
            .service(web::scope("/api").configure(routes::config))
            .default_service(web::route().to(routes::not_found)),
    )
    .await
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn register_and_login<S, B>(app: &S, name: &str, email: &str, password: &str) -> TestUser
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "registration of {} failed", email);

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "login of {} failed", email);

    let auth: AuthResponse = test::read_body_json(resp).await;
    TestUser {
        id: auth.user.id,
        token: auth.token,
    }
}

/// Sends a request and returns its status and JSON body.
///
/// Rejections raised by `AuthGuard` surface as service errors rather than
/// responses, so they are rendered here the way the server would render them.
pub async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = test::read_body(resp).await;
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.unwrap();
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
    }
}
