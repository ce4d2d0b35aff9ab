// IMDb Top 250 rank store
// Keeps an in-memory map of IMDb id -> rank mirrored to a JSON file in the
// plugin configuration directory. The whole table is swapped on every update,
// so readers always see either the old or the new table, never a mix.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use super::imdb_defaults::DEFAULT_TOP_LIST;

#[derive(Debug, thiserror::Error)]
pub enum RankStoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid rankings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable snapshot of the rank table
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    /// Lowercased IMDb id -> rank
    entries: HashMap<String, i32>,
    last_updated: DateTime<Utc>,
}

impl RankTable {
    /// Build a table from caller-supplied ids. Ids that collide once
    /// lowercased keep the better (lower) rank.
    pub fn from_rankings<I, K>(rankings: I, last_updated: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (K, i32)>,
        K: AsRef<str>,
    {
        let mut entries: HashMap<String, i32> = HashMap::new();
        for (id, rank) in rankings {
            entries
                .entry(normalize_id(id.as_ref()))
                .and_modify(|existing| *existing = (*existing).min(rank))
                .or_insert(rank);
        }
        Self {
            entries,
            last_updated,
        }
    }

    pub fn get(&self, id: &str) -> Option<i32> {
        self.entries.get(&normalize_id(id)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// On-disk shape of the rankings file
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRankings {
    #[serde(default, alias = "LastUpdated")]
    pub last_updated: DateTime<Utc>,
    #[serde(default, alias = "Rankings")]
    pub rankings: BTreeMap<String, i32>,
}

impl From<&RankTable> for PersistedRankings {
    fn from(table: &RankTable) -> Self {
        Self {
            last_updated: table.last_updated,
            rankings: table
                .entries
                .iter()
                .map(|(id, rank)| (id.clone(), *rank))
                .collect(),
        }
    }
}

/// Result of a wholesale replacement
#[derive(Debug, Clone, Copy)]
pub struct UpdateOutcome {
    pub entry_count: usize,
    pub last_updated: DateTime<Utc>,
    /// False when the new table only lives in memory until the next successful write
    pub persisted: bool,
}

pub struct RankStore {
    path: PathBuf,
    table: ArcSwap<RankTable>,
    /// Serializes writers so the swap and the file write land in the same order
    write_lock: Mutex<()>,
}

impl RankStore {
    /// Open the store backed by `path`, seeding the default list when the
    /// file is missing, unreadable, corrupt or empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            path: path.into(),
            table: ArcSwap::from_pointee(RankTable::default()),
            write_lock: Mutex::new(()),
        };

        match store.read_file() {
            Ok(Some(table)) if !table.is_empty() => {
                tracing::info!(
                    "Loaded {} IMDb Top 250 entries from {} (last updated {})",
                    table.len(),
                    store.path.display(),
                    table.last_updated.to_rfc3339()
                );
                store.table.store(Arc::new(table));
            }
            Ok(Some(_)) => {
                tracing::info!(
                    "IMDb Top 250 file {} has no entries, loading defaults",
                    store.path.display()
                );
                store.load_default_list();
            }
            Ok(None) => {
                tracing::info!(
                    "No IMDb Top 250 file at {}, loading defaults",
                    store.path.display()
                );
                store.load_default_list();
            }
            Err(e) => {
                tracing::error!("Failed to load IMDb Top 250 list: {}. Loading defaults.", e);
                store.load_default_list();
            }
        }

        store
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Rank for an IMDb id, case-insensitive. `None` means unranked.
    pub fn get_rank(&self, id: &str) -> Option<i32> {
        self.table.load().get(id)
    }

    /// Copy of the current table; callers may mutate it freely
    pub fn get_all_ranks(&self) -> HashMap<String, i32> {
        self.table.load().entries.clone()
    }

    /// Current table snapshot. Stays valid across later updates.
    pub fn snapshot(&self) -> Arc<RankTable> {
        self.table.load_full()
    }

    pub fn count(&self) -> usize {
        self.table.load().len()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.table.load().last_updated
    }

    /// Replace the whole table and write it to disk.
    /// A failed write is logged and leaves the new table in memory.
    pub fn update_list<I, K>(&self, rankings: I) -> UpdateOutcome
    where
        I: IntoIterator<Item = (K, i32)>,
        K: AsRef<str>,
    {
        // Held across swap and write: the last table stored is the last one on disk
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let table = Arc::new(RankTable::from_rankings(rankings, Utc::now()));
        self.table.store(Arc::clone(&table));

        let persisted = match self.write_file(&table) {
            Ok(()) => {
                tracing::info!("IMDb Top 250 list updated with {} entries", table.len());
                true
            }
            Err(e) => {
                tracing::error!("Failed to save IMDb Top 250 list: {}", e);
                false
            }
        };

        UpdateOutcome {
            entry_count: table.len(),
            last_updated: table.last_updated,
            persisted,
        }
    }

    /// Replace the table with the compiled-in seed list
    pub fn load_default_list(&self) -> UpdateOutcome {
        tracing::info!(
            "Loading default IMDb Top 250 list ({} entries)",
            DEFAULT_TOP_LIST.len()
        );
        self.update_list(DEFAULT_TOP_LIST.iter().copied())
    }

    fn read_file(&self) -> Result<Option<RankTable>, RankStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RankStoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let persisted: PersistedRankings = serde_json::from_str(&contents)?;
        Ok(Some(RankTable::from_rankings(
            persisted.rankings,
            persisted.last_updated,
        )))
    }

    fn write_file(&self, table: &RankTable) -> Result<(), RankStoreError> {
        let write_err = |source: std::io::Error| RankStoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&PersistedRankings::from(table))?;

        let tmp_path = self.path.with_extension("json.tmp");
        let result = std::fs::write(&tmp_path, json)
            .and_then(|()| std::fs::rename(&tmp_path, &self.path));
        if let Err(source) = result {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_err(source));
        }

        tracing::debug!("IMDb Top 250 list written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rankings(pairs: &[(&str, i32)]) -> HashMap<String, i32> {
        pairs.iter().map(|(id, r)| (id.to_string(), *r)).collect()
    }

    fn store_in(dir: &tempfile::TempDir) -> RankStore {
        RankStore::open(dir.path().join("plugins").join("imdb_top250.json"))
    }

    #[test]
    fn test_missing_file_seeds_and_persists_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.count(), DEFAULT_TOP_LIST.len());
        assert!(store.path().exists());
        assert_eq!(store.get_rank("tt0111161"), Some(1));
        assert_eq!(store.get_rank("nonexistent"), None);

        // Second start adopts the file instead of re-seeding
        let first_stamp = store.last_updated();
        let reopened = store_in(&dir);
        assert_eq!(reopened.count(), DEFAULT_TOP_LIST.len());
        assert_eq!(reopened.last_updated(), first_stamp);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.update_list(rankings(&[("tt0000042", 7), ("TT0000099", 9)]));

        assert_eq!(store.get_rank("tt0000042"), Some(7));
        assert_eq!(store.get_rank("TT0000042"), Some(7));
        assert_eq!(store.get_rank("tt0000099"), Some(9));
    }

    #[test]
    fn test_update_replaces_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.update_list(rankings(&[("tt1", 1), ("tt2", 2)]));
        let outcome = store.update_list(rankings(&[("tt3", 3)]));

        assert_eq!(outcome.entry_count, 1);
        assert!(outcome.persisted);
        assert_eq!(store.get_all_ranks(), rankings(&[("tt3", 3)]));
        assert_eq!(store.get_rank("tt1"), None);
    }

    #[test]
    fn test_get_all_ranks_is_a_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.update_list(rankings(&[("tt1", 1)]));

        let mut copy = store.get_all_ranks();
        copy.insert("tt2".to_string(), 2);
        copy.remove("tt1");

        assert_eq!(store.count(), 1);
        assert_eq!(store.get_rank("tt1"), Some(1));
    }

    #[test]
    fn test_snapshot_survives_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let before = store.snapshot();

        store.update_list(rankings(&[("tt1", 1)]));

        assert_eq!(before.len(), DEFAULT_TOP_LIST.len());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let outcome = store.update_list(rankings(&[("tt5", 5), ("tt6", 6), ("tt7", -1)]));

        let reopened = store_in(&dir);
        assert_eq!(reopened.get_all_ranks(), store.get_all_ranks());
        assert_eq!(reopened.last_updated(), outcome.last_updated);
        assert_eq!(reopened.get_rank("tt7"), Some(-1));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imdb_top250.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = RankStore::open(&path);
        assert_eq!(store.count(), DEFAULT_TOP_LIST.len());

        // The fallback overwrote the corrupt file
        let reopened = RankStore::open(&path);
        assert_eq!(reopened.last_updated(), store.last_updated());
    }

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imdb_top250.json");
        std::fs::write(
            &path,
            r#"{"lastUpdated":"2024-01-01T00:00:00Z","rankings":{}}"#,
        )
        .unwrap();

        let store = RankStore::open(&path);
        assert_eq!(store.count(), DEFAULT_TOP_LIST.len());
        assert!(store.last_updated() > "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_existing_file_adopted_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imdb_top250.json");
        std::fs::write(
            &path,
            r#"{"LastUpdated":"2023-06-01T12:00:00Z","Rankings":{"TT0111161":3,"tt0068646":1}}"#,
        )
        .unwrap();

        let store = RankStore::open(&path);
        assert_eq!(store.count(), 2);
        assert_eq!(store.get_rank("tt0111161"), Some(3));
        assert_eq!(
            store.last_updated(),
            "2023-06-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = RankStore::open(blocker.join("imdb_top250.json"));
        assert_eq!(store.count(), DEFAULT_TOP_LIST.len());

        let outcome = store.update_list(rankings(&[("tt1", 1)]));
        assert!(!outcome.persisted);
        assert_eq!(store.get_rank("tt1"), Some(1));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_concurrent_updates_leave_disk_matching_memory() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for round in 0..20 {
            std::thread::scope(|scope| {
                for writer in 0..4 {
                    let store = &store;
                    scope.spawn(move || {
                        let rankings: HashMap<String, i32> = (0..500)
                            .map(|i| (format!("tt{}{:07}", writer, i), round * 1000 + i))
                            .collect();
                        assert!(store.update_list(rankings).persisted);
                    });
                }
            });

            let reopened = store_in(&dir);
            assert_eq!(reopened.get_all_ranks(), store.get_all_ranks());
            assert_eq!(reopened.last_updated(), store.last_updated());
        }

        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imdb_top250.json");
        let store = RankStore::open(&path);

        // A non-empty directory at the target path makes the rename fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let outcome = store.update_list(rankings(&[("tt1", 1)]));
        assert!(!outcome.persisted);
        assert_eq!(store.get_rank("tt1"), Some(1));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_colliding_ids_keep_best_rank() {
        let table = RankTable::from_rankings(
            vec![("tt0000001", 12), ("TT0000001", 4)],
            DateTime::<Utc>::default(),
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("tt0000001"), Some(4));
    }

    #[test]
    fn test_default_table_timestamp_is_epoch() {
        let table = RankTable::default();
        assert_eq!(table.last_updated().timestamp(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_persisted_document_shape() {
        let table = RankTable::from_rankings(
            vec![("tt2", 2), ("tt1", 1)],
            "2024-02-03T04:05:06Z".parse().unwrap(),
        );
        let json = serde_json::to_value(PersistedRankings::from(&table)).unwrap();
        assert_eq!(json["lastUpdated"], "2024-02-03T04:05:06Z");
        assert_eq!(json["rankings"]["tt1"], 1);
        assert_eq!(json["rankings"]["tt2"], 2);
    }
}
