//! Layered configuration: defaults, `~/.rms/config.toml`, environment, flags

use anyhow::{Context, Result, bail};
use rms_client::{ApiClient, CsrfInterceptor};
use rms_search::{ControllerOptions, EndpointMap, ResponseOrdering, SearchType};
use rms_ui::{RefreshPolicy, check_required};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BASE_URL_ENV: &str = "RMS_BASE_URL";
pub const CSRF_TOKEN_ENV: &str = "RMS_CSRF_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    pub timeout_secs: u64,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub ordering: ResponseOrdering,
    pub clear_on_short_query: bool,
    pub endpoints: EndpointConfig,
}

/// Endpoint path per search type; an empty string disables that type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointConfig {
    pub customers: String,
    pub menu: String,
    pub orders: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub toast_ms: u64,
    pub refresh_secs: u64,
    pub refresh_pages: Vec<String>,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_token: None,
            timeout_secs: 30,
            search: SearchConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_chars: rms_search::DEFAULT_MIN_QUERY_CHARS,
            ordering: ResponseOrdering::default(),
            clear_on_short_query: false,
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            customers: SearchType::Customers.default_endpoint().to_string(),
            menu: SearchType::Menu.default_endpoint().to_string(),
            orders: SearchType::Orders.default_endpoint().to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn get(&self, search_type: SearchType) -> &str {
        match search_type {
            SearchType::Customers => &self.customers,
            SearchType::Menu => &self.menu,
            SearchType::Orders => &self.orders,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let policy = RefreshPolicy::default();
        Self {
            toast_ms: rms_ui::DEFAULT_TOAST_DURATION.as_millis() as u64,
            refresh_secs: policy.period.as_secs(),
            refresh_pages: policy.pages,
            currency: "USD".to_string(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(rms_dir()?.join("config.toml"))
}

/// `~/.rms`, where the config file and the TUI log live
pub fn rms_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home_dir.join(".rms"))
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = default_config_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    log::debug!("no config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `RMS_*` overrides found through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(CSRF_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.csrf_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_required(&[
            ("base_url", self.base_url.as_str()),
            ("ui.currency", self.ui.currency.as_str()),
        ])
        .map_err(|missing| anyhow::anyhow!("{missing}: {}", missing.names.join(", ")))?;
        url::Url::parse(&self.base_url)
            .with_context(|| format!("base_url '{}' is not a valid URL", self.base_url))?;
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.search.debounce_ms == 0 {
            bail!("search.debounce_ms must be greater than zero");
        }
        if self.search.min_query_chars == 0 {
            bail!("search.min_query_chars must be greater than zero");
        }
        if self.ui.refresh_secs == 0 {
            bail!("ui.refresh_secs must be greater than zero");
        }
        for ty in SearchType::ALL {
            let endpoint = self.search.endpoints.get(*ty);
            if !endpoint.is_empty() && !endpoint.starts_with('/') {
                bail!("search.endpoints.{ty} must start with '/', got '{endpoint}'");
            }
        }
        Ok(())
    }

    pub fn endpoint_map(&self) -> EndpointMap {
        SearchType::ALL
            .iter()
            .fold(EndpointMap::empty(), |map, ty| {
                match self.search.endpoints.get(*ty) {
                    "" => map,
                    path => map.with(*ty, path),
                }
            })
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            debounce: Duration::from_millis(self.search.debounce_ms),
            ordering: self.search.ordering,
            clear_on_short_query: self.search.clear_on_short_query,
        }
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            pages: self.ui.refresh_pages.clone(),
            period: Duration::from_secs(self.ui.refresh_secs),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.ui.toast_ms)
    }

    /// HTTP client for the configured server, with the CSRF token installed if set
    pub fn client(&self) -> Result<ApiClient> {
        let mut client = ApiClient::new(&self.base_url, Duration::from_secs(self.timeout_secs))
            .with_context(|| format!("Failed to create client for {}", self.base_url))?;
        if let Some(token) = &self.csrf_token {
            client = client.with_interceptor(
                CsrfInterceptor::new(token).context("CSRF token is not a valid header value")?,
            );
        }
        Ok(client)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_web_app() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.search.ordering, ResponseOrdering::LatestWins);
        assert!(!config.search.clear_on_short_query);
        assert_eq!(config.ui.toast_ms, 5000);
        assert_eq!(config.ui.refresh_secs, 120);
        assert_eq!(config.ui.refresh_pages, vec!["/orders/", "/dashboard/"]);
        assert_eq!(
            config.endpoint_map().endpoint(SearchType::Menu),
            Some("/menu/ajax/search/")
        );
        config.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
base_url = "https://rms.example.com"

[search]
debounce_ms = 150
ordering = "arrival-order"

[search.endpoints]
orders = ""
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://rms.example.com");
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.ordering, ResponseOrdering::ArrivalOrder);
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.timeout_secs, 30);

        let endpoints = config.endpoint_map();
        assert_eq!(endpoints.endpoint(SearchType::Orders), None);
        assert_eq!(
            endpoints.endpoint(SearchType::Customers),
            Some("/customers/ajax/search/")
        );
        assert_eq!(config.controller_options().debounce, Duration::from_millis(150));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("base_uri = \"http://x\"").is_err());
        assert!(Config::parse("[search]\nordering = \"random\"").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (BASE_URL_ENV, "http://10.0.0.5:8000"),
            (CSRF_TOKEN_ENV, "from-env"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::parse("base_url = \"http://file\"").unwrap();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.csrf_token.as_deref(), Some("from-env"));

        let mut untouched = Config::default();
        untouched.apply_env(|_| Some(String::new()));
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn validation_rules() {
        let mut config = Config::default();
        config.base_url = "localhost".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.debounce_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.endpoints.menu = "menu/search".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("search.endpoints.menu"));

        let mut config = Config::default();
        config.ui.refresh_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_required_settings_are_named() {
        let mut config = Config::default();
        config.base_url = "  ".into();
        config.ui.currency = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: base_url, ui.currency"
        );
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rms.toml");
        fs::write(&path, "timeout_secs = 5\n[ui]\ncurrency = \"EUR\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.ui.currency, "EUR");

        let missing = dir.path().join("absent.toml");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn printed_config_parses_back() {
        let mut config = Config::default();
        config.csrf_token = Some("abc".into());
        let printed = config.to_toml().unwrap();
        assert_eq!(Config::parse(&printed).unwrap(), config);
    }
}
