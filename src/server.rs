use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Request, Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Span};

use crate::api::ApiError;
use crate::config::RankingConfig;
use crate::feeds::Feed;
use crate::model::{RankingRequest, RankingResponse};
use crate::ranker::Ranker;

#[derive(Clone)]
struct AppState {
    ranker: Arc<Ranker>,
}

pub fn router(config: &RankingConfig) -> Router {
    let state = AppState {
        ranker: Arc::new(Ranker::new(config)),
    };

    Router::new()
        .route("/api/health", get(health))
        .route("/feed/rank", post(rank_handler))
        .route("/api/v1/feed/rank", post(rank_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    tracing::info_span!("http", method = %req.method(), uri = %req.uri().path())
                })
                .on_response(|res: &Response<_>, latency: Duration, _span: &Span| {
                    info!(
                        status = %res.status(),
                        elapsed_ms = latency.as_millis() as u64,
                        "response"
                    );
                }),
        )
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, config: &RankingConfig) -> Result<(), String> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;

    info!(%addr, "feed ranker listening");
    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn rank_handler(
    State(state): State<AppState>,
    payload: Result<Json<RankingRequest>, JsonRejection>,
) -> Result<Json<RankingResponse>, ApiError> {
    let Json(request) = payload?;
    debug!(
        user_id = %request.user_profile.id,
        events = request.contents.events.len(),
        posts = request.contents.posts.len(),
        "ranking request"
    );

    let response = state.ranker.rank(&request)?;
    for feed in Feed::ALL {
        debug!(feed = feed.key(), len = response.feed(feed).len(), "feed ranked");
    }

    Ok(Json(response))
}
