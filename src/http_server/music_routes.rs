//! Music HTTP Routes
//!
//! Token-gated search. Criteria come from the query string on GET and
//! from a JSON body on POST; both answer a JSON array.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    http::HeaderMap,
    routing::get,
    Router,
};
use tracing::warn;

use super::errors::{bearer_token, ErrorResponse};
use crate::app::App;
use crate::catalog::MusicView;
use crate::planner::SearchCriteria;

/// Music routes with shared state
pub fn music_routes(state: Arc<App>) -> Router {
    Router::new()
        .route("/search", get(search_query_handler).post(search_body_handler))
        .with_state(state)
}

/// Unreadable criteria answer an empty list, like any rejected search
fn run_search<R: std::fmt::Display>(
    state: &App,
    headers: &HeaderMap,
    criteria: Result<SearchCriteria, R>,
) -> Result<Json<Vec<MusicView>>, ErrorResponse> {
    state.auth.verify(bearer_token(headers)?)?;
    match criteria {
        Ok(criteria) => Ok(Json(state.search.search(&criteria))),
        Err(rejection) => {
            warn!(error = %rejection, "unreadable search criteria");
            Ok(Json(Vec::new()))
        }
    }
}

async fn search_query_handler(
    State(state): State<Arc<App>>,
    headers: HeaderMap,
    criteria: Result<Query<SearchCriteria>, QueryRejection>,
) -> Result<Json<Vec<MusicView>>, ErrorResponse> {
    run_search(&state, &headers, criteria.map(|Query(c)| c))
}

async fn search_body_handler(
    State(state): State<Arc<App>>,
    headers: HeaderMap,
    criteria: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<Vec<MusicView>>, ErrorResponse> {
    run_search(&state, &headers, criteria.map(|Json(c)| c))
}
