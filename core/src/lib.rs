//! Synchronous client core for the Meetup events API.
//!
//! # Overview
//! Builds authenticated GET requests for a group's events, runs them through
//! a caller-supplied `Transport`, and classifies each response into either a
//! decoded JSON value or a typed `ApiError`.
//!
//! # Design
//! - `MeetupClient` holds the API key and the per-instance headers. It
//!   never touches the network directly.
//! - `classify` is the only place that interprets status codes.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod classify;
pub mod client;
pub mod credentials;
pub mod error;
pub mod http;
pub mod types;

pub use client::{MeetupClient, DEFAULT_BASE_URL, DEFAULT_GROUP};
pub use credentials::ApiKey;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport};
pub use types::{Event, EventsQuery, Params, Scroll, Venue};
