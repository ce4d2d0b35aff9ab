// Plugin configuration endpoint
// Backs the configuration page: effective sort defaults and available orders

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{config::SortingConfig, services::sorting::SortOrder, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfiguration {
    pub sorting: SortingConfig,
    pub sort_orders: Vec<SortOrderInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrderInfo {
    pub name: &'static str,
    pub item_types: Vec<&'static str>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/Configuration", get(get_configuration))
}

/// GET /AdvancedSorting/Configuration
async fn get_configuration(State(state): State<Arc<AppState>>) -> Json<PluginConfiguration> {
    let sort_orders = SortOrder::ALL
        .iter()
        .map(|order| SortOrderInfo {
            name: order.name(),
            item_types: order.item_types().iter().map(|t| t.as_str()).collect(),
        })
        .collect();

    Json(PluginConfiguration {
        sorting: state.config.sorting.clone(),
        sort_orders,
    })
}
