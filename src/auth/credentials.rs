//! Registration and login against the credential store.

use validator::Validate;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{AuthResponse, LoginRequest, RegisterRequest, TokenService};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// Validates and persists a new account with a salted bcrypt hash of its password.
///
/// No token is issued here; clients log in separately.
pub async fn register(users: &dyn UserStore, request: RegisterRequest) -> Result<User, AppError> {
    request.validate()?;
    let (Some(name), Some(email), Some(password)) =
        (request.name, request.email, request.password)
    else {
        return Err(AppError::BadRequest("All fields are required".into()));
    };

    // Checked up front to skip hashing; the store's unique index still decides races.
    if users.find_credentials(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password_blocking(password).await?;
    let user = users
        .insert_user(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;
    log::info!("Registered user {}", user.id);
    Ok(user)
}

/// Checks an email/password pair and issues a token for the matching account.
///
/// An unknown email and a wrong password fail identically.
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenService,
    request: LoginRequest,
) -> Result<AuthResponse, AppError> {
    request.validate()?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::BadRequest("All fields are required".into()));
    };

    let Some(credentials) = users.find_credentials(&email).await? else {
        return Err(AppError::InvalidCredentials);
    };
    if !verify_password_blocking(password, credentials.password_hash).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens.issue(&credentials.user)?;
    Ok(AuthResponse {
        token,
        user: credentials.user,
    })
}
