//! CSV output of normalized events.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use meetup_core::Event;
use serde::Serialize;

/// Column names of `events.csv`, in `EventRow` field order.
pub const HEADER: [&str; 8] = [
    "announced",
    "date",
    "time",
    "venue",
    "name",
    "rsvp_limit",
    "rsvp_yes",
    "waitlist",
];

/// One line of `events.csv`. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub announced: i64,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub name: String,
    pub rsvp_limit: u64,
    pub rsvp_yes: u64,
    pub waitlist: u64,
}

impl From<Event> for EventRow {
    fn from(event: Event) -> Self {
        Self {
            rsvp_limit: event.rsvp_limit_or_default(),
            announced: event.created,
            date: event.local_date,
            time: event.local_time,
            venue: event.venue.name,
            name: event.name,
            rsvp_yes: event.yes_rsvp_count,
            waitlist: event.waitlist_count,
        }
    }
}

/// Write the header and one row per event to `writer`.
pub fn write_csv<W: io::Write>(events: Vec<Event>, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for event in events {
        wtr.serialize(EventRow::from(event))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create or truncate `path` and write the events to it.
pub fn write_csv_file(path: &Path, events: Vec<Event>) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(events, file).with_context(|| format!("failed to write {}", path.display()))
}
