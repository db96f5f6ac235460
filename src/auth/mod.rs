//! # musicat Auth Module
//!
//! User registration and login against the login table, and issuing and
//! verifying the session tokens that gate search and subscriptions.

pub mod errors;
pub mod crypto;
pub mod user;
pub mod token;
pub mod api;

pub use errors::{AuthError, AuthResult};
pub use user::{LoginRequest, RegisterRequest, StoreUserRepository, User, UserRepository, EMAIL_ATTRIBUTE};
pub use token::{codec_for, EncodedClaimCodec, JwtCodec, TokenClaims, TokenCodec, TokenScheme};
pub use api::{AuthService, LoginResponse, DEFAULT_TOKEN_TTL_SECS};
