use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate results of a driver in one category (career) or one category-year.
///
/// Averages and percentages are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerStats {
    /// Discipline label as the site reports it (e.g. `Road`).
    pub category: String,
    pub starts: u32,
    pub wins: u32,
    pub win_percentage: f64,
    pub top5: u32,
    pub top5_percentage: f64,
    pub poles: u32,
    pub avg_start: f64,
    pub avg_finish: f64,
    pub total_laps: u32,
    pub laps_led: u32,
    pub laps_led_percentage: f64,
    pub avg_incidents_per_race: f64,
    pub avg_points_per_race: f64,
    pub total_club_points: u32,
}

/// [`CareerStats`] restricted to a single calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyStats {
    pub year: Option<u32>,
    pub stats: CareerStats,
}

/// One of the member's most recent races.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastRaceStats {
    pub date: Option<String>,
    pub track_id: Option<i64>,
    pub car_id: Option<i64>,
    pub series_id: Option<i64>,
    pub season_id: Option<i64>,
    pub subsession_id: Option<i64>,
    pub start_pos: Option<u32>,
    pub finish_pos: Option<u32>,
    pub incidents: Option<u32>,
    pub laps_led: Option<u32>,
    pub champ_points: Option<f64>,
    pub strength_of_field: Option<u32>,
    pub winner_name: Option<String>,
}

/// A point of a profile chart (iRating, TT rating or licence history).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub at: DateTime<Utc>,
    pub value: f64,
}
