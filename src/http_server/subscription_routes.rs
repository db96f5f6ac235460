//! Subscription HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use serde::Serialize;

use super::errors::{bearer_token, ErrorResponse};
use crate::app::App;
use crate::catalog::MusicView;
use crate::subscription::SongRef;

/// Subscription routes with shared state
pub fn subscription_routes(state: Arc<App>) -> Router {
    Router::new()
        .route(
            "/subscriptions",
            get(list_handler)
                .post(subscribe_handler)
                .delete(unsubscribe_handler),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn success() -> Json<Self> {
        Json(Self {
            message: "Success".to_string(),
        })
    }
}

async fn list_handler(
    State(state): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<Vec<MusicView>>, ErrorResponse> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.subscriptions.list(token)?))
}

async fn subscribe_handler(
    State(state): State<Arc<App>>,
    headers: HeaderMap,
    Json(song): Json<SongRef>,
) -> Result<Json<MessageResponse>, ErrorResponse> {
    let token = bearer_token(&headers)?;
    state.subscriptions.subscribe(token, &song)?;
    Ok(MessageResponse::success())
}

async fn unsubscribe_handler(
    State(state): State<Arc<App>>,
    headers: HeaderMap,
    Json(song): Json<SongRef>,
) -> Result<Json<MessageResponse>, ErrorResponse> {
    let token = bearer_token(&headers)?;
    state.subscriptions.unsubscribe(token, &song)?;
    Ok(MessageResponse::success())
}
