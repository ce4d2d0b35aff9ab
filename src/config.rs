// Configuration module for jellyfin-advanced-sorting
// Handles XDG-compliant directory paths and TOML configuration file

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "jellyfin-advanced-sorting";
const CONFIG_FILENAME: &str = "config.toml";
const PLUGIN_NAME: &str = "AdvancedSorting";
const RANKINGS_FILENAME: &str = "imdb_top250.json";

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Server configuration
    pub server: ServerConfig,

    /// Directory paths (overrides XDG defaults)
    pub paths: PathsConfig,

    /// Sort endpoint defaults
    pub sorting: SortingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server port (default: 8097)
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8097,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Override data directory (library database location)
    pub data_dir: Option<PathBuf>,

    /// Override config directory (config.toml and plugin configuration)
    pub config_dir: Option<PathBuf>,
}

/// Defaults applied by the sort endpoints when a query leaves them out
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct SortingConfig {
    /// Page size for ByBitrate / ByFileSize / ByCommunityRating (default: 100)
    pub default_limit: usize,

    /// Page size for ByImdbTopRank (default: 250)
    pub imdb_default_limit: usize,

    /// Upper bound for any requested limit (default: 1000)
    pub max_limit: usize,

    /// Whether ByImdbTopRank lists unranked movies when the query doesn't say (default: false)
    pub include_unranked: bool,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            imdb_default_limit: 250,
            max_limit: 1000,
            include_unranked: false,
        }
    }
}

impl SortingConfig {
    /// Resolve a requested page size against the configured default and ceiling
    pub fn clamp_limit(&self, requested: Option<usize>, default: usize) -> usize {
        let max = self.max_limit.max(1);
        requested.unwrap_or(default).clamp(1, max)
    }
}

/// Application paths following XDG Base Directory Specification on Unix
/// On other platforms, falls back to the current directory or platform-specific locations
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for configuration files (config.toml, plugin configuration)
    /// XDG: $XDG_CONFIG_HOME/jellyfin-advanced-sorting or ~/.config/jellyfin-advanced-sorting
    pub config_dir: PathBuf,

    /// Directory for persistent data (library database)
    /// XDG: $XDG_DATA_HOME/jellyfin-advanced-sorting or ~/.local/share/jellyfin-advanced-sorting
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Create application paths using XDG directories (or fallbacks)
    ///
    /// Priority order:
    /// 1. Environment variables (ADVANCED_SORTING_CONFIG_DIR, ADVANCED_SORTING_DATA_DIR)
    /// 2. Config file overrides
    /// 3. XDG / platform-specific directories
    /// 4. Current directory fallback
    pub fn new(config_overrides: &PathsConfig) -> Self {
        Self {
            config_dir: Self::resolve_dir(
                "ADVANCED_SORTING_CONFIG_DIR",
                &config_overrides.config_dir,
                dirs::config_dir(),
            ),
            data_dir: Self::resolve_dir(
                "ADVANCED_SORTING_DATA_DIR",
                &config_overrides.data_dir,
                dirs::data_dir(),
            ),
        }
    }

    /// Create application paths using current directory (portable mode)
    pub fn current_dir() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            config_dir: cwd.clone(),
            data_dir: cwd,
        }
    }

    fn resolve_dir(
        env_var: &str,
        config_override: &Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> PathBuf {
        if let Ok(path) = std::env::var(env_var) {
            return PathBuf::from(path);
        }

        if let Some(ref path) = config_override {
            return path.clone();
        }

        if let Some(dir) = platform_dir {
            return dir.join(APP_NAME);
        }

        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Get the library database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("library.db")
    }

    /// Get the database URL for SQLite
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database_path().display())
    }

    /// Per-plugin configuration directory
    pub fn plugin_config_dir(&self) -> PathBuf {
        self.config_dir.join("plugins").join(PLUGIN_NAME)
    }

    /// Location of the persisted IMDb Top 250 table
    pub fn rankings_file_path(&self) -> PathBuf {
        self.plugin_config_dir().join(RANKINGS_FILENAME)
    }

    /// Ensure all directories exist
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.config_dir).await?;
        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::create_dir_all(self.plugin_config_dir()).await?;
        Ok(())
    }

    /// Log the configured paths
    pub fn log_paths(&self) {
        tracing::info!("Configuration directory: {}", self.config_dir.display());
        tracing::info!("Data directory: {}", self.data_dir.display());
        tracing::debug!("Database path: {}", self.database_path().display());
        tracing::debug!("Rankings file: {}", self.rankings_file_path().display());
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new(&PathsConfig::default())
    }
}

/// Application configuration - combines TOML file with environment overrides
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application paths
    pub paths: AppPaths,

    /// Server port
    pub port: u16,

    /// Bind address
    pub bind_address: String,

    /// Sort endpoint defaults
    pub sorting: SortingConfig,
}

impl AppConfig {
    /// Load configuration from TOML file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. TOML config file
    /// 3. Default values
    pub fn load() -> Self {
        let portable_mode = std::env::var("ADVANCED_SORTING_PORTABLE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        if portable_mode {
            tracing::info!("Running in portable mode (using current directory)");
            return Self::portable();
        }

        let config_dir = Self::find_config_dir();
        let config_file = Self::load_config_file(&config_dir);

        Self::build(config_file)
    }

    fn portable() -> Self {
        Self {
            paths: AppPaths::current_dir(),
            port: Self::env_port().unwrap_or(8097),
            bind_address: Self::env_bind_address().unwrap_or_else(|| "0.0.0.0".to_string()),
            sorting: SortingConfig::default(),
        }
    }

    /// Find the config directory (for locating config.toml)
    fn find_config_dir() -> PathBuf {
        if let Ok(path) = std::env::var("ADVANCED_SORTING_CONFIG_DIR") {
            return PathBuf::from(path);
        }

        if let Some(dir) = dirs::config_dir() {
            return dir.join(APP_NAME);
        }

        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Load and parse the TOML config file
    fn load_config_file(config_dir: &std::path::Path) -> ConfigFile {
        let config_path = config_dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(
                "No config file found at {}, using defaults",
                config_path.display()
            );
            return ConfigFile::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    );
                    ConfigFile::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                ConfigFile::default()
            }
        }
    }

    /// Build configuration from config file with environment overrides
    fn build(config_file: ConfigFile) -> Self {
        let paths = AppPaths::new(&config_file.paths);

        let port = Self::env_port().unwrap_or(config_file.server.port);
        let bind_address =
            Self::env_bind_address().unwrap_or_else(|| config_file.server.bind_address.clone());

        Self {
            paths,
            port,
            bind_address,
            sorting: config_file.sorting,
        }
    }

    fn env_port() -> Option<u16> {
        std::env::var("ADVANCED_SORTING_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
    }

    fn env_bind_address() -> Option<String> {
        std::env::var("ADVANCED_SORTING_BIND_ADDRESS").ok()
    }

    /// Get the database URL, with override from DATABASE_URL env var
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.paths.database_url())
    }

    /// Log configuration status
    pub fn log_config(&self) {
        self.paths.log_paths();
        tracing::info!("Server listening on {}:{}", self.bind_address, self.port);
        tracing::debug!(
            "Sorting defaults: limit={}, imdb limit={}, max={}, include unranked={}",
            self.sorting.default_limit,
            self.sorting.imdb_default_limit,
            self.sorting.max_limit,
            self.sorting.include_unranked
        );
    }
}
