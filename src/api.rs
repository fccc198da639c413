// src/api.rs
//! HTTP surface for the presentation layer. One read endpoint; on a
//! total-failure run the last successful result is served instead, and a 503
//! tells clients to show their retry affordance when nothing is cached.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::feed::NewsFeed;
use crate::model::NewsItem;

#[derive(Clone)]
pub struct AppState {
    feed: Arc<NewsFeed>,
}

impl AppState {
    pub fn new(feed: Arc<NewsFeed>) -> Self {
        Self { feed }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/news", get(news))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct NewsQuery {
    #[serde(default)]
    include_remote: Option<bool>,
}

#[derive(serde::Serialize)]
struct NewsResponse {
    items: Vec<NewsItem>,
    /// true when the payload is the cached last-good result
    stale: bool,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    retry: bool,
}

async fn news(State(state): State<AppState>, Query(q): Query<NewsQuery>) -> impl IntoResponse {
    let include_remote = q.include_remote.unwrap_or(true);

    match state.feed.fetch_aggregated_news(include_remote).await {
        Ok(items) => (
            StatusCode::OK,
            Json(NewsResponse {
                items,
                stale: false,
            }),
        )
            .into_response(),
        Err(e) => match state.feed.cached() {
            Some(items) => {
                (StatusCode::OK, Json(NewsResponse { items, stale: true })).into_response()
            }
            None => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: e.to_string(),
                    retry: true,
                }),
            )
                .into_response(),
        },
    }
}
