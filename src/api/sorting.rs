// Sorted item lists - one endpoint per alternative sort order

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    db,
    models::LibraryItem,
    services::{
        ranking,
        sorting::{self, SortOrder},
    },
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ByBitrate", get(get_by_bitrate))
        .route("/ByFileSize", get(get_by_file_size))
        .route("/ByCommunityRating", get(get_by_community_rating))
        .route("/ByImdbTopRank", get(get_by_imdb_top_rank))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortQuery {
    pub ascending: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImdbRankQuery {
    pub include_unranked: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedItemsResponse {
    pub items: Vec<SortedItemDto>,
    pub total_record_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedItemDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rank: Option<i32>,
}

impl SortedItemDto {
    fn new(item: &LibraryItem) -> Self {
        Self {
            id: item.item.id.clone(),
            name: item.item.name.clone(),
            item_type: item.item.item_type.clone(),
            production_year: item.item.year,
            bitrate: None,
            size: None,
            community_rating: None,
            imdb_rank: None,
        }
    }

    /// DTO carrying the value the item was ordered by
    fn for_order(item: &LibraryItem, order: SortOrder) -> Self {
        let mut dto = Self::new(item);
        match order {
            SortOrder::Bitrate => dto.bitrate = item.bitrate(),
            SortOrder::FileSize => dto.size = item.size(),
            SortOrder::CommunityRating => dto.community_rating = item.item.community_rating,
            SortOrder::ImdbTopRank => {}
        }
        dto
    }
}

/// GET /AdvancedSorting/ByBitrate
async fn get_by_bitrate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SortQuery>,
) -> Result<Json<SortedItemsResponse>, (StatusCode, String)> {
    sorted_items(&state, SortOrder::Bitrate, query).await
}

/// GET /AdvancedSorting/ByFileSize
async fn get_by_file_size(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SortQuery>,
) -> Result<Json<SortedItemsResponse>, (StatusCode, String)> {
    sorted_items(&state, SortOrder::FileSize, query).await
}

/// GET /AdvancedSorting/ByCommunityRating
async fn get_by_community_rating(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SortQuery>,
) -> Result<Json<SortedItemsResponse>, (StatusCode, String)> {
    sorted_items(&state, SortOrder::CommunityRating, query).await
}

async fn sorted_items(
    state: &AppState,
    order: SortOrder,
    query: SortQuery,
) -> Result<Json<SortedItemsResponse>, (StatusCode, String)> {
    let defaults = &state.config.sorting;
    let limit = defaults.clamp_limit(query.limit, defaults.default_limit);
    let ascending = query.ascending.unwrap_or(false);

    let mut items = db::get_library_items(&state.db, order.item_types())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let table = state.rank_store.snapshot();
    sorting::sort_items(&mut items, order, ascending, &table);

    let total_record_count = items.len();
    let items = items
        .iter()
        .take(limit)
        .map(|item| SortedItemDto::for_order(item, order))
        .collect();

    tracing::debug!(
        "Sorted {} items by {} ({})",
        total_record_count,
        order.name(),
        if ascending { "ascending" } else { "descending" }
    );

    Ok(Json(SortedItemsResponse {
        items,
        total_record_count,
    }))
}

/// GET /AdvancedSorting/ByImdbTopRank
/// Best rank first; unranked movies (when requested) follow every ranked one
async fn get_by_imdb_top_rank(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImdbRankQuery>,
) -> Result<Json<SortedItemsResponse>, (StatusCode, String)> {
    let defaults = &state.config.sorting;
    let limit = defaults.clamp_limit(query.limit, defaults.imdb_default_limit);
    let include_unranked = query.include_unranked.unwrap_or(defaults.include_unranked);

    let items = db::get_library_items(&state.db, SortOrder::ImdbTopRank.item_types())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let table = state.rank_store.snapshot();
    let (page, total_record_count) = ranking::rank_items(&table, items, include_unranked, limit);

    let items = page
        .iter()
        .map(|ranked| {
            let mut dto = SortedItemDto::new(&ranked.item);
            dto.imdb_rank = ranked.rank;
            dto
        })
        .collect();

    Ok(Json(SortedItemsResponse {
        items,
        total_record_count,
    }))
}
