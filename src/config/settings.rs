//! Settings structures for storefront search configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub search: SearchSettings,
    pub history: HistorySettings,
    pub routes: RouteSettings,
    pub ui: UiSettings,
    pub outgoing: OutgoingSettings,
    /// Store ids known at startup (seed for the store directory)
    pub stores: Vec<String>,
    /// Store context the search box starts in (none = cross-store)
    pub store_id: Option<String>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (STOREFRONT_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("STOREFRONT_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("STOREFRONT_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("STOREFRONT_HISTORY_DIR") {
            self.history.storage_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STOREFRONT_PAGE_SIZE") {
            if let Ok(size) = val.parse::<u32>() {
                self.search.page_size = size.max(1);
            }
        }
        if let Ok(val) = std::env::var("STOREFRONT_STORE_ID") {
            self.store_id = if val.trim().is_empty() { None } else { Some(val) };
        }
    }

    /// Directory holding the recent-search blob
    pub fn history_dir(&self) -> PathBuf {
        self.history.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("storefront-search")
        })
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Storefront name shown in the prompt
    pub storefront_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            storefront_name: "Storefront".to_string(),
        }
    }
}

/// Backend API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every path below is joined onto
    pub base_url: String,
    /// Single-store suggestion search
    pub store_search_path: String,
    /// Cross-store suggestion search
    pub cross_store_search_path: String,
    pub popular_path: String,
    pub recommended_path: String,
    pub featured_path: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            store_search_path: "/api/products/search".to_string(),
            cross_store_search_path: "/api/products/search/multi-store".to_string(),
            popular_path: "/api/products/popular".to_string(),
            recommended_path: "/api/products/recommended".to_string(),
            featured_path: "/api/products/featured".to_string(),
        }
    }
}

impl ApiSettings {
    /// Join a configured path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Suggestions requested per page
    pub page_size: u32,
    /// Maximum number of recent searches kept
    pub history_limit: usize,
    /// Distance from the bottom (px) that counts as "near bottom"
    pub scroll_threshold: f64,
    /// Lifetime of memoized idle lists (seconds)
    pub idle_cache_ttl: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: crate::DEFAULT_PAGE_SIZE,
            history_limit: crate::history::DEFAULT_LIMIT,
            scroll_threshold: 50.0,
            idle_cache_ttl: 600,
        }
    }
}

/// Recent-search persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Directory for the key-value blobs (none = platform data dir)
    pub storage_dir: Option<PathBuf>,
    /// Key the recent-search list is stored under
    pub storage_key: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: "recentSearches".to_string(),
        }
    }
}

/// Navigation path templates.
///
/// Placeholders: `{store_id}`, `{query}` (URL-encoded on expansion) and
/// `{product_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    pub store_search: String,
    pub global_search: String,
    pub store_product: String,
    pub global_product: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            store_search: "/store/{store_id}/search?q={query}".to_string(),
            global_search: "/search?q={query}".to_string(),
            store_product: "/store/{store_id}/product/{product_id}".to_string(),
            global_product: "/product/{product_id}".to_string(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Image shown when a suggestion has no usable image URL
    pub placeholder_image: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            placeholder_image: "/images/placeholder.png".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.search.page_size, 10);
        assert_eq!(settings.search.history_limit, 5);
        assert_eq!(settings.history.storage_key, "recentSearches");
        assert!(settings.store_id.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
api:
  base_url: "https://shop.example.com/"
stores: ["S1", "S2"]
search:
  page_size: 20
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.search.page_size, 20);
        assert_eq!(settings.search.history_limit, 5);
        assert_eq!(settings.stores, vec!["S1", "S2"]);
        assert_eq!(
            settings.api.url(&settings.api.store_search_path),
            "https://shop.example.com/api/products/search"
        );
    }

    #[test]
    fn test_history_dir_override() {
        let mut settings = Settings::default();
        settings.history.storage_dir = Some(PathBuf::from("/tmp/history"));
        assert_eq!(settings.history_dir(), PathBuf::from("/tmp/history"));
    }
}
