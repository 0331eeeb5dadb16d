use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::debug;

use crate::config::MissingTeamPolicy;
use crate::error::AppError;
use crate::stats::{normalize, predict_by_name, MatchupResult, NormalizedStats, NormalizerConfig, PredictorConfig};
use crate::store::models::{Pool, TeamStats};
use crate::store::{RecordSource, RecordStore};

pub mod pages;

pub struct AppState {
    pub source: Arc<dyn RecordSource>,
    pub missing_team_policy: MissingTeamPolicy,
    pub normalizer: NormalizerConfig,
    pub predictor: PredictorConfig,
    pub static_dir: PathBuf,
}

/// One team of a pool as shown on the pool page and `/api/pool/:pool_name`
#[derive(Debug, Clone, Serialize)]
pub struct PoolTeamView {
    pub name: String,
    pub team_stats: Option<TeamStats>,
    pub normalized_stats: NormalizedStats,
}

#[derive(Debug, Default, Deserialize)]
struct PredictRequest {
    #[serde(rename = "teamA", default)]
    team_a: Option<String>,
    #[serde(rename = "teamB", default)]
    team_b: Option<String>,
}

/// Build the Axum router for the site.
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(index_handler))
        .route("/pool/:pool_name", get(pool_handler))
        .route("/team/:team_name", get(team_handler))
        .route("/player/:player_id", get(player_handler))
        .route("/matchup", get(matchup_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/pools", get(api_pools_handler))
        .route("/api/pool/:pool_name", get(api_pool_handler))
        .nest_service("/static", assets)
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

async fn snapshot(state: &AppState) -> Result<Arc<RecordStore>, AppError> {
    Ok(state.source.snapshot().await?)
}

/// Teams of a pool with their derived 0–100 scores. Teams without stats
/// score from the worst-case defaults.
pub fn pool_view(store: &RecordStore, pool_name: &str, config: &NormalizerConfig) -> Vec<PoolTeamView> {
    store
        .pool_teams(pool_name)
        .into_iter()
        .map(|(name, team)| {
            let raw = team.team_stats.unwrap_or_default();
            PoolTeamView {
                name,
                team_stats: team.team_stats,
                normalized_stats: normalize(&raw, config),
            }
        })
        .collect()
}

/// GET /
async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let store = snapshot(&state).await?;
    Ok(Html(pages::index(store.pools(), store.loaded_at)))
}

/// GET /pool/:pool_name
async fn pool_handler(
    State(state): State<Arc<AppState>>,
    Path(pool_name): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = snapshot(&state).await?;
    let teams = pool_view(&store, &pool_name, &state.normalizer);
    debug!("Pool {:?}: {} team(s)", pool_name, teams.len());
    Ok(Html(pages::pool(&pool_name, &teams)))
}

/// GET /team/:team_name
async fn team_handler(
    State(state): State<Arc<AppState>>,
    Path(team_name): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = snapshot(&state).await?;
    let team = store.team_or_default(&team_name);
    let roster = store.roster(&team);
    Ok(Html(pages::team(&team_name, &team, &roster.pitchers, &roster.batters)))
}

/// GET /player/:player_id
async fn player_handler(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Response, AppError> {
    let store = snapshot(&state).await?;
    let response = match store.player(&player_id) {
        Some(player) => Html(pages::player(player)).into_response(),
        None => {
            debug!("Unknown player {:?}", player_id);
            (
                StatusCode::NOT_FOUND,
                Html(pages::not_found(&format!("No player with id {}", player_id))),
            )
                .into_response()
        }
    };
    Ok(response)
}

/// GET /matchup
async fn matchup_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let store = snapshot(&state).await?;
    Ok(Html(pages::matchup(&store.team_names())))
}

/// POST /api/predict  {"teamA": "...", "teamB": "..."}
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MatchupResult>, AppError> {
    let req: PredictRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))?;
    let store = snapshot(&state).await?;
    let result = predict_by_name(
        &store,
        req.team_a.as_deref(),
        req.team_b.as_deref(),
        state.missing_team_policy,
        &state.predictor,
    )?;
    Ok(Json(result))
}

/// GET /api/pools
async fn api_pools_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Pool>>, AppError> {
    let store = snapshot(&state).await?;
    Ok(Json(store.pools().clone()))
}

/// GET /api/pool/:pool_name
async fn api_pool_handler(
    State(state): State<Arc<AppState>>,
    Path(pool_name): Path<String>,
) -> Result<Json<Vec<PoolTeamView>>, AppError> {
    let store = snapshot(&state).await?;
    Ok(Json(pool_view(&store, &pool_name, &state.normalizer)))
}
