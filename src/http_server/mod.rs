//! # musicat HTTP Server Module
//!
//! Combines all endpoint routers into a single Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/auth/*` - Registration, login, token verification
//! - `/music/search` - Attribute search (Bearer token)
//! - `/subscriptions` - List, add and remove subscriptions (Bearer token)

pub mod config;
pub mod errors;
pub mod server;
pub mod auth_routes;
pub mod health_routes;
pub mod music_routes;
pub mod subscription_routes;

pub use config::HttpServerConfig;
pub use errors::{bearer_token, ErrorResponse};
pub use server::HttpServer;
