use axum::Router;
use std::sync::Arc;

use crate::AppState;

mod imdb_list;
mod plugin;
mod sorting;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().nest(
        "/AdvancedSorting",
        Router::new()
            .merge(sorting::routes()) // ByBitrate, ByFileSize, ByCommunityRating, ByImdbTopRank
            .merge(imdb_list::routes()) // ImdbTopList status/update/reset
            .merge(plugin::routes()), // Configuration page data
    )
}
