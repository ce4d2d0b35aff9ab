// IMDb Top 250 list management

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    services::imdb_top::{PersistedRankings, UpdateOutcome},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ImdbTopList", get(get_top_list))
        .route("/ImdbTopList/Status", get(get_status))
        .route("/ImdbTopList/Rank/:imdb_id", get(get_rank))
        .route("/ImdbTopList/Update", post(update_list))
        .route("/ImdbTopList/Reset", post(reset_list))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopListStatus {
    pub entry_count: usize,
    pub last_updated: DateTime<Utc>,
}

impl From<UpdateOutcome> for TopListStatus {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            entry_count: outcome.entry_count,
            last_updated: outcome.last_updated,
        }
    }
}

/// GET /AdvancedSorting/ImdbTopList/Status
async fn get_status(State(state): State<Arc<AppState>>) -> Json<TopListStatus> {
    let table = state.rank_store.snapshot();
    Json(TopListStatus {
        entry_count: table.len(),
        last_updated: table.last_updated(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankLookup {
    pub imdb_id: String,
    /// Absent when the id is unranked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
}

/// GET /AdvancedSorting/ImdbTopList/Rank/:imdb_id
async fn get_rank(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> Json<RankLookup> {
    let rank = state.rank_store.get_rank(&imdb_id);
    Json(RankLookup { imdb_id, rank })
}

/// GET /AdvancedSorting/ImdbTopList - full table in the persisted file's shape
async fn get_top_list(State(state): State<Arc<AppState>>) -> Json<PersistedRankings> {
    let store = &state.rank_store;
    Json(PersistedRankings {
        last_updated: store.last_updated(),
        rankings: store.get_all_ranks().into_iter().collect(),
    })
}

/// POST /AdvancedSorting/ImdbTopList/Update
/// Body: {"tt0111161": 1, ...}. Replaces the whole list.
async fn update_list(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HashMap<String, i32>>, JsonRejection>,
) -> Result<Json<TopListStatus>, (StatusCode, String)> {
    let rankings = match payload {
        Ok(Json(rankings)) if !rankings.is_empty() => rankings,
        Ok(_) => {
            return Err((StatusCode::BAD_REQUEST, "No rankings provided".to_string()));
        }
        Err(e) => {
            tracing::debug!("Rejected IMDb Top 250 update: {}", e);
            return Err((StatusCode::BAD_REQUEST, "No rankings provided".to_string()));
        }
    };

    tracing::info!("Updating IMDb Top 250 list with {} entries", rankings.len());

    let store = Arc::clone(&state.rank_store);
    let outcome = tokio::task::spawn_blocking(move || store.update_list(rankings))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(outcome.into()))
}

/// POST /AdvancedSorting/ImdbTopList/Reset - restore the shipped list
async fn reset_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TopListStatus>, (StatusCode, String)> {
    tracing::info!("Resetting IMDb Top 250 list to defaults");

    let store = Arc::clone(&state.rank_store);
    let outcome = tokio::task::spawn_blocking(move || store.load_default_list())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(outcome.into()))
}
