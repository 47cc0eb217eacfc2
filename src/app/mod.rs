//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the search, storage and
//! domain layers.
//!
//! ```text
//! Keys / host events → Event → handle_event → state mutations → Actions → host calls
//!                        ↑                                          │
//!                        └────────── WebRequestResult ◄─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: The search-and-paginate state machine
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input and view mode types
//! - [`state`]: Application state container and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::{SearchController, SearchPhase, SearchRequest, SearchState};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use state::{AppState, Notice};
