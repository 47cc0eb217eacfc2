//! Libris: a Zellij plugin for searching Google Books and keeping bookmarks.
//!
//! Libris provides:
//! - Query-driven search against the Google Books volumes API
//! - Twelve-result pages with previous/next navigation
//! - Bookmarks persisted to a local JSON file, with a fuzzy-filtered view
//! - Themed ANSI rendering with windowed scrolling
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Search controller (query, page, request tags)    │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Search Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (search/)     │
//! │ - Rendering   │   │ - JSON file   │   │ - URL builder │
//! │ - Theming     │   │ - Bookmark API│   │ - Wire models │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - BookRecord, Bookmark, errors (domain/)           │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - OTLP file tracing (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/libris.wasm" {
//!         api_key "AIza..."
//!         bookmarks_file "~/.config/libris/bookmarks.json"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `load` parses the configuration, starts tracing, builds `AppState` and
//!    requests `WebAccess` and `FullHdAccess`.
//! 2. Once permissions are granted the bookmark file is read.
//! 3. Submitting a query returns an `Action::Fetch`; the shim issues the HTTP
//!    request tagged with its request id.
//! 4. The `WebRequestResult` comes back as `Event::SearchResponse` and is
//!    committed only if it answers the latest request.
//!
//! # Example
//!
//! ```rust
//! use libris::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     bookmarks_file: Some(std::env::temp_dir().join("libris-lib-doc.json").display().to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! state.query_input = "Dune".to_string();
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(&actions[..], [Action::Fetch(req)] if req.offset == 0));
//! # Ok::<(), libris::LibrisError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchController, ViewMode};
pub use domain::{BookRecord, Bookmark, LibrisError, Result, SearchError};
pub use ui::Theme;

use search::{SearchClient, DEFAULT_ENDPOINT};
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::JsonBookmarkStore;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Google Books API key. Falls back to `GOOGLE_BOOKS_API_KEY` at build
    /// time; requests go out without a key when neither is set.
    pub api_key: Option<String>,

    /// Volumes endpoint. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Bookmark file path; `~` is mapped into the sandbox. Default:
    /// `bookmarks.json` in the data directory.
    pub bookmarks_file: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` loads.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

/// Build-time API key, if the crate was compiled with one.
fn build_time_api_key() -> Option<String> {
    option_env!("GOOGLE_BOOKS_API_KEY").map(str::to_string)
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: build_time_api_key(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            bookmarks_file: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the map Zellij passes to `load`.
    ///
    /// Recognized keys: `api_key`, `endpoint`, `bookmarks_file`, `theme`,
    /// `theme_file`, `trace_level`. Blank values count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use libris::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "secret".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("secret"));
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self {
            api_key: non_blank(config.get("api_key")).or_else(build_time_api_key),
            endpoint: non_blank(config.get("endpoint")).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            bookmarks_file: non_blank(config.get("bookmarks_file")),
            theme_name: non_blank(config.get("theme")),
            theme_file: non_blank(config.get("theme_file")),
            trace_level: non_blank(config.get("trace_level")),
        }
    }

    /// Resolved bookmark file location.
    #[must_use]
    pub fn bookmarks_path(&self) -> PathBuf {
        infrastructure::bookmarks_file(self.bookmarks_file.as_deref())
    }
}

/// Builds the initial `AppState` from configuration.
///
/// Resolves the theme and wires the search client and bookmark store. The
/// bookmark file is not read here; that waits for `Event::PermissionsGranted`.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, has_api_key = config.api_key.is_some(), "initializing libris");

    let theme_file = config
        .theme_file
        .as_deref()
        .map(|f| PathBuf::from(infrastructure::expand_tilde(f)));
    let theme = Theme::resolve(config.theme_name.as_deref(), theme_file.as_deref());

    let client = SearchClient::new(config.endpoint.clone(), config.api_key.clone());
    let store = JsonBookmarkStore::new(config.bookmarks_path());

    AppState::new(SearchController::new(client), Box::new(store), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api_key, build_time_api_key());
        assert!(config.bookmarks_path().ends_with("libris/bookmarks.json"));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_zellij(&map(&[("endpoint", "  "), ("theme", ""), ("api_key", " ")]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.theme_name, None);
        assert_eq!(config.api_key, build_time_api_key());
    }

    #[test]
    fn bookmarks_file_expands_tilde() {
        let config = Config::from_zellij(&map(&[("bookmarks_file", "~/saved.json")]));
        assert_eq!(config.bookmarks_path(), PathBuf::from("/host/saved.json"));
    }

    #[test]
    fn initialize_applies_theme_and_starts_idle() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            bookmarks_file: Some(dir.path().join("b.json").display().to_string()),
            ..Default::default()
        };

        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-frappe");
        assert!(state.bookmarks.bookmarks().is_empty());
        assert_eq!(state.controller.phase(), app::SearchPhase::Idle);
    }

    #[test]
    fn configured_endpoint_and_key_reach_request_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_key: Some("k".to_string()),
            endpoint: "http://localhost:9/volumes".to_string(),
            bookmarks_file: Some(dir.path().join("b.json").display().to_string()),
            ..Default::default()
        };

        let mut state = initialize(&config);
        let request = state.controller.submit_query("Dune").unwrap();
        assert!(request.url.starts_with("http://localhost:9/volumes?q=Dune"));
        assert!(request.url.ends_with("&key=k"));
    }
}
