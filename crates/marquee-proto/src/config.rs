use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Movie catalog API (TMDB v3) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    /// Bearer token sent with every catalog request.
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

/// Click-counter document store (Appwrite) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed query is sent, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where the favorites slot and the log file live.
    #[serde(default = "platform::data_dir")]
    pub data_dir: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            api_token: String::new(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            endpoint: default_counter_endpoint(),
            project_id: String::new(),
            database_id: String::new(),
            collection_id: String::new(),
            api_key: None,
        }
    }
}

impl CounterConfig {
    /// True when every id needed to address the collection is present.
    pub fn is_configured(&self) -> bool {
        !self.project_id.is_empty() && !self.database_id.is_empty() && !self.collection_id.is_empty()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::data_dir(),
        }
    }
}

fn default_catalog_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_counter_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// `load()`, falling back to defaults. The error comes back alongside so
    /// the caller can log it once the subscriber is up.
    pub fn load_or_default() -> (Self, Option<anyhow::Error>) {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: anyhow::Result<Self>) -> (Self, Option<anyhow::Error>) {
        match loaded {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Read `path`, writing defaults there first when it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config = if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            config
        } else {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Overlay secrets and ids from the environment so they never need to
    /// live in the config file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("MARQUEE_TMDB_TOKEN") {
            self.catalog.api_token = token;
        }
        if let Some(project) = non_empty("MARQUEE_APPWRITE_PROJECT") {
            self.counter.project_id = project;
        }
        if let Some(database) = non_empty("MARQUEE_APPWRITE_DATABASE") {
            self.counter.database_id = database;
        }
        if let Some(collection) = non_empty("MARQUEE_APPWRITE_COLLECTION") {
            self.counter.collection_id = collection;
        }
        if let Some(key) = non_empty("MARQUEE_APPWRITE_KEY") {
            self.counter.api_key = Some(key);
        }
    }
}
