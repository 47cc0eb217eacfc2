//! Search client for the Google Books volumes API.
//!
//! The plugin runtime performs HTTP asynchronously: a request is issued with
//! `web_request` and the response arrives later as an event. The client is
//! therefore split into the two halves of a call:
//!
//! - [`SearchClient::request_url`] builds the GET URL for a query and offset
//! - [`SearchClient::parse_response`] turns a status code and body into a
//!   [`SearchPage`] or a [`SearchError`](crate::domain::SearchError)
//!
//! # Modules
//!
//! - `client`: URL construction and response parsing
//! - `models`: Wire types for the API's JSON response

pub mod client;
pub mod models;

pub use client::{SearchClient, SearchPage, DEFAULT_ENDPOINT, PAGE_SIZE};
pub use models::{ImageLinks, VolumeInfo, VolumeItem, VolumesResponse};
