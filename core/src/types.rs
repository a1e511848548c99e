//! Domain DTOs for the Meetup events endpoint.
//!
//! # Design
//! `Event` lists only the fields the exporter reads; anything else the API
//! returns is ignored on deserialization. `rsvp_limit` is optional on the
//! wire (absent means "no cap"); `rsvp_limit_or_default` reads it as `0`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Query parameters keyed by name. Ordered so that built URLs are stable.
pub type Params = BTreeMap<String, String>;

/// A single event returned by `GET /{group}/events`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Creation time in milliseconds since the epoch.
    pub created: i64,
    pub local_date: String,
    pub local_time: String,
    pub venue: Venue,
    pub name: String,
    pub yes_rsvp_count: u64,
    pub waitlist_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
}

impl Event {
    /// RSVP cap, with "no cap" reported as `0`.
    pub fn rsvp_limit_or_default(&self) -> u64 {
        self.rsvp_limit.unwrap_or(0)
    }

    /// Fill in `rsvp_limit = 0` when the event has no cap. Idempotent.
    pub fn with_default_rsvp_limit(mut self) -> Self {
        self.rsvp_limit = Some(self.rsvp_limit_or_default());
        self
    }
}

/// Time window selector understood by the events endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    RecentPast,
    NextUpcoming,
    FutureOrPast,
}

impl Scroll {
    pub fn as_str(self) -> &'static str {
        match self {
            Scroll::RecentPast => "recent_past",
            Scroll::NextUpcoming => "next_upcoming",
            Scroll::FutureOrPast => "future_or_past",
        }
    }
}

impl fmt::Display for Scroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed parameters for the events endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsQuery {
    /// Ask the API to sign the returned URLs.
    pub sign: bool,
    pub scroll: Option<Scroll>,
    /// Newest first.
    pub desc: bool,
    /// Maximum number of events to return.
    pub page: Option<u32>,
}

impl EventsQuery {
    /// The most recent past events, newest first.
    pub fn recent_past() -> Self {
        Self {
            sign: true,
            scroll: Some(Scroll::RecentPast),
            desc: true,
            page: None,
        }
    }

    /// Booleans are sent as lowercase `true`/`false`, unlike the capitalized
    /// `True` of older scripts against this API.
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("sign".to_string(), self.sign.to_string());
        params.insert("desc".to_string(), self.desc.to_string());
        if let Some(scroll) = self.scroll {
            params.insert("scroll".to_string(), scroll.to_string());
        }
        if let Some(page) = self.page {
            params.insert("page".to_string(), page.to_string());
        }
        params
    }
}
