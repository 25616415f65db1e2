//! Shared request enums and response containers.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::IrError;

/// A loosely typed row: column name to value, as the members site returns it.
pub type Record = Map<String, Value>;

/// One page of a paginated search plus the total number of matches on the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Rows on this page (at most 25).
    pub items: Vec<T>,
    /// Total rows matching the query across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    pub(crate) const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Racing discipline. Numeric ids are the site's `category`/`catId` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Oval,
    Road,
    DirtOval,
    DirtRoad,
}

impl Category {
    pub(crate) const fn id(self) -> u8 {
        match self {
            Self::Oval => 1,
            Self::Road => 2,
            Self::DirtOval => 3,
            Self::DirtRoad => 4,
        }
    }
}

/// Which history a member's profile chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartType {
    IRating,
    TtRating,
    License,
}

impl ChartType {
    pub(crate) const fn id(self) -> u8 {
        match self {
            Self::IRating => 1,
            Self::TtRating => 2,
            Self::License => 3,
        }
    }
}

/// Licence class, ordered from rookie to pro/world championship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LicenseLevel {
    Rookie,
    D,
    C,
    B,
    A,
    Pro,
    ProWc,
}

impl LicenseLevel {
    pub const ALL: [Self; 7] = [
        Self::Rookie,
        Self::D,
        Self::C,
        Self::B,
        Self::A,
        Self::Pro,
        Self::ProWc,
    ];

    pub(crate) const fn id(self) -> u8 {
        match self {
            Self::Rookie => 1,
            Self::D => 2,
            Self::C => 3,
            Self::B => 4,
            Self::A => 5,
            Self::Pro => 6,
            Self::ProWc => 7,
        }
    }

    /// Form flag the results archive uses to include this class.
    pub(crate) const fn archive_flag(self) -> &'static str {
        match self {
            Self::Rookie => "showrookie",
            Self::D => "showclassd",
            Self::C => "showclassc",
            Self::B => "showclassb",
            Self::A => "showclassa",
            Self::Pro => "showpro",
            Self::ProWc => "showprowc",
        }
    }
}

/// Session kinds selectable in the results archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    Practice,
    Qualify,
    TimeTrial,
    Race,
}

impl EventType {
    pub const ALL: [Self; 4] = [Self::Race, Self::Qualify, Self::Practice, Self::TimeTrial];

    pub(crate) const fn archive_flag(self) -> &'static str {
        match self {
            Self::Practice => "showops",
            Self::Qualify => "showquals",
            Self::TimeTrial => "showtts",
            Self::Race => "showraces",
        }
    }
}

/// Sort column for the paginated searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    IRating,
    StartTime,
    Points,
}

impl SortField {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::IRating => "irating",
            Self::StartTime => "start_time",
            Self::Points => "points",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The site's "no filter" sentinel for numeric fields.
pub(crate) const ANY: i64 = -1;

/// Renders an optional numeric filter, mapping `None` to the site's "any" sentinel.
pub(crate) fn bound(v: Option<impl Into<i64>>) -> String {
    v.map_or(ANY, Into::into).to_string()
}

/// 1-based inclusive row window for a 1-based `page`.
pub(crate) fn page_bounds(page: u32) -> (u32, u32) {
    use crate::core::client::NUM_ENTRIES;
    let lower = NUM_ENTRIES * page.max(1).saturating_sub(1) + 1;
    (lower, lower + NUM_ENTRIES - 1)
}

/// Midnight UTC of `start` and `end` in epoch milliseconds, the way date filters are sent.
pub(crate) fn day_span_ms(start: NaiveDate, end: NaiveDate) -> Result<(i64, i64), IrError> {
    if start > end {
        return Err(IrError::InvalidDates);
    }
    let ms = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    Ok((ms(start), ms(end)))
}
