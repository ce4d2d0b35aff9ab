// Comparators for the alternative sort orders

use std::cmp::Ordering;

use crate::models::{ItemType, LibraryItem};

use super::imdb_top::RankTable;
use super::ranking;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Bitrate,
    FileSize,
    CommunityRating,
    ImdbTopRank,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Bitrate,
        SortOrder::FileSize,
        SortOrder::CommunityRating,
        SortOrder::ImdbTopRank,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Bitrate => "Bitrate",
            SortOrder::FileSize => "FileSize",
            SortOrder::CommunityRating => "CommunityRating",
            SortOrder::ImdbTopRank => "ImdbTopRank",
        }
    }

    /// Item types each order is offered for
    pub fn item_types(&self) -> &'static [ItemType] {
        match self {
            SortOrder::Bitrate | SortOrder::FileSize => &[ItemType::Movie, ItemType::Episode],
            SortOrder::CommunityRating => &[ItemType::Movie, ItemType::Series],
            SortOrder::ImdbTopRank => &[ItemType::Movie],
        }
    }
}

pub fn compare_bitrate(a: &LibraryItem, b: &LibraryItem) -> Ordering {
    a.bitrate().unwrap_or(0).cmp(&b.bitrate().unwrap_or(0))
}

pub fn compare_file_size(a: &LibraryItem, b: &LibraryItem) -> Ordering {
    a.size().unwrap_or(0).cmp(&b.size().unwrap_or(0))
}

pub fn compare_community_rating(a: &LibraryItem, b: &LibraryItem) -> Ordering {
    let a = a.item.community_rating.unwrap_or(0.0);
    let b = b.item.community_rating.unwrap_or(0.0);
    a.total_cmp(&b)
}

/// Lower rank sorts first; unranked items compare greater than any rank
pub fn compare_imdb_rank(table: &RankTable, a: &LibraryItem, b: &LibraryItem) -> Ordering {
    ranking::item_sort_key(table, a).cmp(&ranking::item_sort_key(table, b))
}

pub fn compare(order: SortOrder, table: &RankTable, a: &LibraryItem, b: &LibraryItem) -> Ordering {
    match order {
        SortOrder::Bitrate => compare_bitrate(a, b),
        SortOrder::FileSize => compare_file_size(a, b),
        SortOrder::CommunityRating => compare_community_rating(a, b),
        SortOrder::ImdbTopRank => compare_imdb_rank(table, a, b),
    }
}

/// Stable sort; equal items keep their incoming order in both directions
pub fn sort_items(items: &mut [LibraryItem], order: SortOrder, ascending: bool, table: &RankTable) {
    items.sort_by(|a, b| {
        let ord = compare(order, table, a, b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}
