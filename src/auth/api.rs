//! # Auth Service
//!
//! Registration, login and token verification over the login table.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::crypto::validate_email;
use super::errors::{AuthError, AuthResult};
use super::token::{TokenClaims, TokenCodec};
use super::user::{LoginRequest, RegisterRequest, User, UserRepository};

/// Default token lifetime: two days
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 2 * 24 * 60 * 60;

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}

/// Auth service combining the user repository and the token codec
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codec: Arc<dyn TokenCodec>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, codec: Arc<dyn TokenCodec>, token_ttl: Duration) -> Self {
        Self {
            users,
            codec,
            token_ttl,
        }
    }

    /// Register a new user
    pub fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        if request.email.is_empty() || request.user_name.is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingFields(
                "Email, username, and password are required".to_string(),
            ));
        }
        validate_email(&request.email)?;

        let user = User::new(request.email, request.user_name, &request.password)?;
        self.users.create(&user)?;

        info!(email = %user.email, "user registered");
        Ok(user)
    }

    /// Authenticate a user and issue a token
    pub fn login(&self, request: LoginRequest) -> AuthResult<LoginResponse> {
        validate_email(&request.email)?;
        if request.password.is_empty() {
            return Err(AuthError::MissingFields("Password is required".to_string()));
        }

        let user = self
            .users
            .find_by_email(&request.email)?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verify_password(&request.password)? {
            warn!(email = %user.email, "login with wrong password");
            return Err(AuthError::InvalidPassword);
        }

        let claims = TokenClaims {
            email: user.email.clone(),
            username: user.user_name.clone(),
            exp: Utc::now() + self.token_ttl,
        };
        let token = self.codec.issue(&claims)?;

        info!(email = %user.email, "user logged in");
        Ok(LoginResponse {
            token,
            user_name: user.user_name,
        })
    }

    /// Decode a token, reject it if expired or its user is gone
    pub fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }
        if !self.users.email_exists(&claims.email)? {
            return Err(AuthError::UserNotFound);
        }

        Ok(claims)
    }
}
