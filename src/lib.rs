//! musicat - a music catalog backend
//!
//! User registration and login with signed tokens, attribute search over a
//! keyed record store, signed image URLs and per-user song subscriptions.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod object_store;
pub mod planner;
pub mod store;
pub mod subscription;
