use chrono::NaiveDate;
use serde::Serialize;

use crate::core::Record;

/// Results of one session of an event, as exported by the site's CSV download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventResults {
    /// Event summary (series, track, start time, strength of field, ...), values as text.
    pub info: Record,
    /// One row per driver. Column names are lower-cased letters only (`finpos`, `custid`).
    pub rows: Vec<Record>,
}

/// Which part of the calendar the results archive searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// A racing season, optionally narrowed to one race week.
    Season {
        year: u16,
        quarter: u8,
        race_week: Option<u8>,
    },
    /// Sessions started between two days (midnight UTC, inclusive).
    Dates { start: NaiveDate, end: NaiveDate },
}
