// Resolves library items to IMDb Top 250 sort keys

use crate::models::LibraryItem;

use super::imdb_top::RankTable;

/// Sort key for items without a rank; larger than any real rank,
/// including `i32::MAX`
pub const UNRANKED: i64 = i64::MAX;

/// Rank of an item, or `None` if it has no IMDb id or isn't in the table
pub fn item_rank(table: &RankTable, item: &LibraryItem) -> Option<i32> {
    item.imdb_id().and_then(|id| table.get(id))
}

pub fn sort_key(rank: Option<i32>) -> i64 {
    rank.map_or(UNRANKED, i64::from)
}

pub fn item_sort_key(table: &RankTable, item: &LibraryItem) -> i64 {
    sort_key(item_rank(table, item))
}

/// An item paired with the rank it was ordered by
#[derive(Debug, Clone)]
pub struct RankedItem {
    pub item: LibraryItem,
    pub rank: Option<i32>,
}

/// Order items best rank first with unranked items last, then truncate.
/// Returns the page and the number of candidates before truncation.
pub fn rank_items(
    table: &RankTable,
    items: Vec<LibraryItem>,
    include_unranked: bool,
    limit: usize,
) -> (Vec<RankedItem>, usize) {
    let mut ranked: Vec<RankedItem> = items
        .into_iter()
        .map(|item| {
            let rank = item_rank(table, &item);
            RankedItem { item, rank }
        })
        .filter(|r| include_unranked || r.rank.is_some())
        .collect();

    // Stable sort keeps provider order among equal keys
    ranked.sort_by_key(|r| sort_key(r.rank));

    let total = ranked.len();
    ranked.truncate(limit);
    (ranked, total)
}
