//! Menuhub: client core for restaurant discovery and restaurant management.
//!
//! Menuhub provides the logic behind two views of a food-ordering product:
//! - A restaurant search page: filter state, query planning with de-duplication and
//!   stale-response suppression
//! - A "manage my restaurant" page: form model, validation and a lossless codec
//!   between the server's integer minor-unit prices and the major units people type
//! - A typed endpoint client over pluggable HTTP and authentication seams

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI shell (main.rs)                                │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Page handlers
//! │  - SearchPage / ManageRestaurantPage                │
//! │  - Event → state mutation → Vec<Action>             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ search/       │   │ query/        │   │ form/         │
//! │ - SearchState │   │ - Request     │   │ - Form model  │
//! │ - SortOption  │   │ - Executor    │   │ - Codec       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and backend access (api/)         │
//! │  - Restaurant, MinorUnits, CuisineSet, errors       │
//! │  - RestaurantApi over HttpTransport + auth seams    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, JSON-lines span export       │
//! │  - traceparent propagation                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: page handlers with the event/action model
//! - [`domain`]: entities, money, errors
//! - [`search`]: search state transitions
//! - [`query`]: request derivation and fetch planning
//! - [`form`]: restaurant form model and codec
//! - [`api`]: backend endpoint client and transports
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! Configuration is read from an optional TOML file and overlaid by environment
//! variables:
//!
//! ```toml
//! api_base_url = "https://api.example.com"
//! auth_token = "..."
//! trace_level = "debug"
//! trace_file = "/tmp/menuhub-spans.jsonl"
//! ```
//!
//! | Variable | Field |
//! |---|---|
//! | `MENUHUB_API_BASE_URL` | `api_base_url` |
//! | `MENUHUB_AUTH_TOKEN` | `auth_token` |
//! | `MENUHUB_TRACE_LEVEL` | `trace_level` |
//! | `MENUHUB_TRACE_FILE` | `trace_file` |
//!
//! # Example
//!
//! ```rust
//! use menuhub::form::{decode, encode};
//! use menuhub::domain::Restaurant;
//!
//! let restaurant: Restaurant = serde_json::from_str(r#"{
//!     "restaurantName": "Casa Taco", "city": "Austin", "country": "USA",
//!     "deliveryPrice": 299, "estimatedDeliveryTime": 30,
//!     "cuisines": ["Mexican"],
//!     "menuItems": [{"name": "Taco", "price": 399}],
//!     "imageUrl": "https://img.example/taco.png"
//! }"#)?;
//!
//! let form = decode(Some(&restaurant));
//! assert_eq!(form.delivery_price, 2.99);
//!
//! let payload = encode(&form)?;
//! assert_eq!(payload.text("deliveryPrice"), Some("299"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod form;
pub mod observability;
pub mod query;
pub mod search;

pub use api::{ReqwestTransport, RestaurantApi, StaticTokenProvider};
pub use app::{
    handle_manage_event, handle_search_event, Action, ManageEvent, ManageRestaurantPage,
    SearchEvent, SearchPage,
};
pub use domain::{MenuhubError, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:7000";

/// Prefix of the environment variables that override configuration.
pub const ENV_PREFIX: &str = "MENUHUB_";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root URL of the restaurant backend. Default: `http://localhost:7000`
    pub api_base_url: String,

    /// Bearer token for the "my restaurant" endpoints.
    pub auth_token: Option<String>,

    /// Filter directives for tracing, e.g. `debug` or `menuhub=trace`.
    /// `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// When set, finished spans are appended to this file as JSON lines.
    pub trace_file: Option<PathBuf>,

    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            trace_level: None,
            trace_file: None,
            user_agent: format!("menuhub/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Reads a TOML configuration file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`MenuhubError::Io`] if the file cannot be read, [`MenuhubError::Config`] if it
    /// is not valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| MenuhubError::Config(format!("{}: {e}", path.display())))
    }

    /// Overlays `MENUHUB_*` values from `vars`. Blank values are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use menuhub::Config;
    ///
    /// let mut vars = BTreeMap::new();
    /// vars.insert("MENUHUB_API_BASE_URL".to_string(), "https://api.example.com".to_string());
    /// vars.insert("MENUHUB_TRACE_LEVEL".to_string(), " ".to_string());
    ///
    /// let config = Config::default().apply_env(&vars);
    /// assert_eq!(config.api_base_url, "https://api.example.com");
    /// assert_eq!(config.trace_level, None);
    /// ```
    #[must_use]
    pub fn apply_env(mut self, vars: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(&format!("{ENV_PREFIX}{key}"))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        if let Some(url) = get("API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(token) = get("AUTH_TOKEN") {
            self.auth_token = Some(token);
        }
        if let Some(level) = get("TRACE_LEVEL") {
            self.trace_level = Some(level);
        }
        if let Some(file) = get("TRACE_FILE") {
            self.trace_file = Some(PathBuf::from(file));
        }
        self
    }

    /// Loads `path` (if given) and overlays the process environment.
    ///
    /// # Errors
    ///
    /// As for [`Config::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let vars: BTreeMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        Ok(base.apply_env(&vars))
    }

    /// Parsed and checked [`Config::api_base_url`].
    ///
    /// # Errors
    ///
    /// [`MenuhubError::Config`] unless the value is an absolute `http` or `https` URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| MenuhubError::Config(format!("invalid api_base_url {:?}: {e}", self.api_base_url)))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(MenuhubError::Config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        Ok(url)
    }
}

/// Builds the production endpoint client for `config`.
///
/// # Errors
///
/// [`MenuhubError::Config`] if the base URL is invalid or the HTTP client cannot be
/// built.
///
/// # Example
///
/// ```rust
/// use menuhub::{initialize, Config};
///
/// let api = initialize(&Config::default())?;
/// assert_eq!(api.base_url().as_str(), "http://localhost:7000/");
/// # Ok::<(), menuhub::MenuhubError>(())
/// ```
pub fn initialize(config: &Config) -> Result<RestaurantApi<StaticTokenProvider, ReqwestTransport>> {
    let base_url = config.base_url()?;
    tracing::debug!(base_url = %base_url, has_token = config.auth_token.is_some(), "initializing menuhub");

    let transport = ReqwestTransport::new(&config.user_agent)?;
    let auth = StaticTokenProvider::new(config.auth_token.clone());
    Ok(RestaurantApi::new(base_url, auth, transport))
}
