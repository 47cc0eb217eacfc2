//! Zellij plugin wrapper and entry point.
//!
//! A thin layer between the Libris library and the Zellij plugin API: Zellij
//! events are translated into library [`Event`]s, and the [`Action`]s the
//! handler returns are turned into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` and `FullHdAccess`; on grant the
//!    bookmark file is read
//! 3. **Update**: Map keys and web responses to events, delegate to the library
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, editing, paging and bookmark events (see below)
//! - `WebRequestResult` → `Event::SearchResponse`, matched on the
//!   `request_id` echoed in the request context
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `PermissionsDenied`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Normal mode, results view:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `/` or `i`: Edit query
//! - `Enter`: Search again
//! - `b` or `Space`: Toggle bookmark
//! - `n`/`Right`/`PageDown`: Next page
//! - `p`/`Left`/`PageUp`: Previous page
//! - `Tab`: Bookmarks view
//! - `q`: Close
//!
//! Normal mode, bookmarks view:
//! - `d`/`x`/`b`: Remove bookmark
//! - `/`: Filter
//! - `Tab`: Results view
//!
//! While editing:
//! - Characters and `Backspace` edit the field
//! - `Enter` submits, `Esc` leaves the field

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use libris::{handle_event, Action, Config, Event, ViewMode};

register_plugin!(State);

/// Context key carrying the request tag through `web_request`.
const CONTEXT_REQUEST_ID: &str = "request_id";
const CONTEXT_OFFSET: &str = "offset";

/// Plugin state wrapper.
struct State {
    app: libris::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: libris::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        libris::observability::init_tracing(
            config.trace_level.as_deref(),
            &libris::infrastructure::get_data_dir(),
        );

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = libris::initialize(&config);
        tracing::debug!(bookmarks = ?config.bookmarks_path(), "app state initialized");

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_response(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                Event::PermissionsDenied
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        libris::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps a key to an event given the current mode and view.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if self.app.input_mode.is_editing() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Tab => Event::SwitchView,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        let common = match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Some(Event::KeyDown),
            BareKey::Up | BareKey::Char('k') => Some(Event::KeyUp),
            BareKey::Char('/') => Some(Event::FocusInput),
            BareKey::Tab => Some(Event::SwitchView),
            BareKey::Esc => Some(Event::Escape),
            BareKey::Char('q') => Some(Event::CloseFocus),
            _ => None,
        };
        if common.is_some() {
            return common;
        }

        match self.app.view_mode {
            ViewMode::Results => match key.bare_key {
                BareKey::Char('i') => Some(Event::FocusInput),
                BareKey::Enter => Some(Event::Submit),
                BareKey::Char('b' | ' ') => Some(Event::ToggleBookmark),
                BareKey::Char('n') | BareKey::Right | BareKey::PageDown => Some(Event::NextPage),
                BareKey::Char('p') | BareKey::Left | BareKey::PageUp => Some(Event::PreviousPage),
                _ => None,
            },
            ViewMode::Bookmarks => match key.bare_key {
                BareKey::Char('d' | 'x' | 'b') | BareKey::Delete => Some(Event::ToggleBookmark),
                _ => None,
            },
        }
    }

    /// Turns a web response into a search event, or `None` if it carries no
    /// request tag (not one of ours).
    fn map_web_response(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request_id) = context
            .get(CONTEXT_REQUEST_ID)
            .and_then(|id| id.parse::<u64>().ok())
        else {
            tracing::warn!(status = status, "web response without request id, ignoring");
            return None;
        };

        tracing::debug!(
            request_id = request_id,
            offset = context.get(CONTEXT_OFFSET).map(String::as_str),
            status = status,
            body_len = body.len(),
            "search response received"
        );

        Some(Event::SearchResponse {
            request_id,
            status,
            body,
        })
    }

    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                tracing::debug!(
                    request_id = request.request_id,
                    query = %request.query,
                    offset = request.offset,
                    "issuing web request"
                );

                let context = BTreeMap::from([
                    (CONTEXT_REQUEST_ID.to_string(), request.request_id.to_string()),
                    (CONTEXT_OFFSET.to_string(), request.offset.to_string()),
                ]);
                web_request(&request.url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
        }
    }
}
