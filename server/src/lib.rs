use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderValue, StatusCode}, response::{IntoResponse, Response}, routing::get, Json, Router};
use recommender::{Engine, MovieRecord, Recommendation, RecommendError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub title: String,
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub resolved_title: String,
    pub took_s: f64,
    pub results: Vec<Recommendation>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

pub struct ApiError(RecommendError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn build_app(engine: Arc<Engine>) -> Result<Router> {
    build_app_with_cors(engine, cors_from_env())
}

pub fn build_app_with_cors(engine: Arc<Engine>, cors: CorsLayer) -> Result<Router> {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .route("/movie/:row", get(movie_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Origins listed in `CORS_ALLOW_ORIGIN`, or any origin when unset or unparseable.
pub fn cors_from_env() -> CorsLayer {
    cors_for(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref())
}

pub fn cors_for(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> =
        allowed.unwrap_or_default().split(',').map(str::trim).filter(|s| !s.is_empty()).filter_map(|s| s.parse().ok()).collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() { layer.allow_origin(Any) } else { layer.allow_origin(AllowOrigin::list(origins)) }
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let start = std::time::Instant::now();
    let engine = &state.engine;
    let k = params.k.unwrap_or(engine.config().default_k).clamp(1, MAX_K);
    let results = engine.recommend_scored(&params.title, k).map_err(ApiError)?;
    // recommend_scored succeeded, so the title resolves
    let resolved_title = engine
        .resolve(&params.title)
        .and_then(|row| engine.record(row))
        .map(|r| r.title.clone())
        .unwrap_or_default();
    Ok(Json(RecommendResponse { query: params.title, resolved_title, took_s: start.elapsed().as_secs_f64(), results }))
}

pub async fn movie_handler(State(state): State<AppState>, Path(row): Path<usize>) -> Result<Json<MovieRecord>, (StatusCode, Json<serde_json::Value>)> {
    state
        .engine
        .record(row)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" }))))
}
