use anyhow::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::models::{ItemType, LibraryItem, MediaItem, MediaSource};

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media_items (
            id TEXT PRIMARY KEY,
            item_type TEXT NOT NULL,
            name TEXT NOT NULL,
            sort_name TEXT,
            year INTEGER,
            community_rating REAL,
            imdb_id TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        -- One row per playable file; position 0 is the primary source
        CREATE TABLE IF NOT EXISTS media_sources (
            item_id TEXT NOT NULL REFERENCES media_items(id) ON DELETE CASCADE,
            position INTEGER NOT NULL DEFAULT 0,
            path TEXT NOT NULL,
            size INTEGER,
            bitrate INTEGER,
            PRIMARY KEY (item_id, position)
        );
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<()> {
    let indexes = [
        // Filter by type (Movie, Series, Episode)
        "CREATE INDEX IF NOT EXISTS idx_media_items_type ON media_items(item_type)",
        // Provider order for ties
        "CREATE INDEX IF NOT EXISTS idx_media_items_sort_name ON media_items(sort_name)",
        "CREATE INDEX IF NOT EXISTS idx_media_items_imdb ON media_items(imdb_id) WHERE imdb_id IS NOT NULL",
        "CREATE INDEX IF NOT EXISTS idx_media_sources_item ON media_sources(item_id)",
    ];

    for sql in indexes {
        if let Err(e) = sqlx::query(sql).execute(pool).await {
            tracing::warn!("Failed to create index: {} ({})", sql, e);
        }
    }

    Ok(())
}

/// Load every item of the given types along with its media sources.
/// Items come back in sort-name order; sources in position order.
pub async fn get_library_items(
    pool: &SqlitePool,
    item_types: &[ItemType],
) -> Result<Vec<LibraryItem>> {
    if item_types.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "SELECT id, item_type, name, sort_name, year, community_rating, imdb_id \
         FROM media_items WHERE item_type IN (",
    );
    let mut separated = qb.separated(", ");
    for t in item_types {
        separated.push_bind(t.as_str());
    }
    separated.push_unseparated(")");
    qb.push(" ORDER BY COALESCE(sort_name, name) COLLATE NOCASE, id");

    let items: Vec<MediaItem> = qb.build_query_as().fetch_all(pool).await?;

    let mut source_qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "SELECT s.item_id, s.path, s.size, s.bitrate FROM media_sources s \
         INNER JOIN media_items m ON m.id = s.item_id WHERE m.item_type IN (",
    );
    let mut separated = source_qb.separated(", ");
    for t in item_types {
        separated.push_bind(t.as_str());
    }
    separated.push_unseparated(")");
    source_qb.push(" ORDER BY s.item_id, s.position");

    let sources: Vec<MediaSource> = source_qb.build_query_as().fetch_all(pool).await?;

    let mut by_item: HashMap<String, Vec<MediaSource>> = HashMap::new();
    for source in sources {
        by_item
            .entry(source.item_id.clone())
            .or_default()
            .push(source);
    }

    Ok(items
        .into_iter()
        .map(|item| {
            let sources = by_item.remove(&item.id).unwrap_or_default();
            LibraryItem { item, sources }
        })
        .collect())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}

#[cfg(test)]
pub async fn insert_item(
    pool: &SqlitePool,
    id: &str,
    item_type: ItemType,
    name: &str,
    community_rating: Option<f64>,
    imdb_id: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO media_items (id, item_type, name, sort_name, community_rating, imdb_id) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(item_type.as_str())
    .bind(name)
    .bind(name.to_lowercase())
    .bind(community_rating)
    .bind(imdb_id)
    .execute(pool)
    .await
    .unwrap();
}

#[cfg(test)]
pub async fn insert_source(
    pool: &SqlitePool,
    item_id: &str,
    position: i32,
    size: Option<i64>,
    bitrate: Option<i64>,
) {
    sqlx::query(
        "INSERT INTO media_sources (item_id, position, path, size, bitrate) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(item_id)
    .bind(position)
    .bind(format!("/media/{}-{}.mkv", item_id, position))
    .bind(size)
    .bind(bitrate)
    .execute(pool)
    .await
    .unwrap();
}
