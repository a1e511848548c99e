//! Export a Meetup group's recent events to CSV.
//!
//! `run` fetches the events and writes the CSV file in one pass. Missing RSVP
//! limits become `0` as each event is turned into a row. Any failure aborts
//! before the output file is touched.

pub mod config;
pub mod export;
pub mod transport;

use anyhow::{Context, Result};
use meetup_core::{EventsQuery, MeetupClient};

pub use config::ExportConfig;
pub use export::{write_csv, write_csv_file, EventRow, HEADER};
pub use transport::UreqTransport;

/// Fetch events and write them as CSV rows. Returns the number of rows written.
pub fn run(config: &ExportConfig) -> Result<usize> {
    let client = MeetupClient::new(config.api_key.clone(), UreqTransport::new())
        .with_base_url(&config.base_url)
        .with_group(&config.group);

    let events = client
        .list_events(&EventsQuery::recent_past())
        .with_context(|| format!("failed to fetch events for {}", config.group))?;

    let count = events.len();
    write_csv_file(&config.output, events)?;
    tracing::info!(rows = count, path = %config.output.display(), "wrote events");
    Ok(count)
}
