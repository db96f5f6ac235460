//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::music_routes::music_routes;
use super::subscription_routes::subscription_routes;
use crate::app::App;

/// HTTP server for the music catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server using the app's HTTP configuration
    pub fn new(app: Arc<App>) -> Self {
        let config = app.config.http.clone();
        Self::with_config(app, config)
    }

    /// Create a server with an explicit HTTP configuration
    pub fn with_config(app: Arc<App>, config: HttpServerConfig) -> Self {
        let router = Self::build_router(app, &config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(app: Arc<App>, config: &HttpServerConfig) -> Router {
        Router::new()
            // Health check at root level
            .merge(health_routes(app.clone()))
            // Register, login, verify under /auth
            .nest("/auth", auth_routes(app.clone()))
            // Search under /music
            .nest("/music", music_routes(app.clone()))
            .merge(subscription_routes(app))
            .layer(TraceLayer::new_for_http())
            .layer(config.cors_layer())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "musicat HTTP server listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
