pub mod credentials;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthGuard;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};

/// Represents the payload for a new user registration request.
///
/// Fields are optional at the type level so that a missing field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name. Required.
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    /// Email address for the new account. Must be a valid email format.
    #[validate(
        required(message = "Email is required"),
        email(message = "Please provide a valid email")
    )]
    pub email: Option<String>,
    /// Password for the new account. Must be at least 6 characters long.
    #[validate(
        required(message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: Option<String>,
}

/// Represents the payload for a user login request.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Response to a successful login: the bearer token and the account it identifies.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
