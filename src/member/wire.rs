use serde::Deserialize;

use crate::core::wire::{de_opt_clean, de_opt_f64, de_opt_i64, de_opt_u32};

/// One row of `GetCareerStats` / `GetYearlyStats`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsRow {
    #[serde(default, deserialize_with = "de_opt_clean")]
    pub(crate) category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_clean")]
    pub(crate) year: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) starts: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) wins: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) win_perc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) top5: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) top5_perc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) poles: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) avg_start: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) avg_finish: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) total_laps: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) laps_led: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) laps_led_perc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) avg_inc_per_race: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) avg_pts_per_race: Option<f64>,
    #[serde(default, rename = "totalclubpoints", deserialize_with = "de_opt_u32")]
    pub(crate) total_club_points: Option<u32>,
}

/// One row of `GetLastRacesStats`.
#[derive(Deserialize)]
pub(crate) struct LastRaceRow {
    #[serde(default, deserialize_with = "de_opt_clean")]
    pub(crate) date: Option<String>,
    #[serde(default, rename = "trackID", deserialize_with = "de_opt_i64")]
    pub(crate) track_id: Option<i64>,
    #[serde(default, rename = "carID", deserialize_with = "de_opt_i64")]
    pub(crate) car_id: Option<i64>,
    #[serde(default, rename = "seriesID", deserialize_with = "de_opt_i64")]
    pub(crate) series_id: Option<i64>,
    #[serde(default, rename = "seasonID", deserialize_with = "de_opt_i64")]
    pub(crate) season_id: Option<i64>,
    #[serde(default, rename = "subsessionID", deserialize_with = "de_opt_i64")]
    pub(crate) subsession_id: Option<i64>,
    #[serde(default, rename = "startPos", deserialize_with = "de_opt_u32")]
    pub(crate) start_pos: Option<u32>,
    #[serde(default, rename = "finishPos", deserialize_with = "de_opt_u32")]
    pub(crate) finish_pos: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub(crate) incidents: Option<u32>,
    #[serde(default, rename = "lapsLed", deserialize_with = "de_opt_u32")]
    pub(crate) laps_led: Option<u32>,
    #[serde(default, rename = "champPoints", deserialize_with = "de_opt_f64")]
    pub(crate) champ_points: Option<f64>,
    #[serde(default, rename = "sof", deserialize_with = "de_opt_u32")]
    pub(crate) strength_of_field: Option<u32>,
    #[serde(default, rename = "winnerName", deserialize_with = "de_opt_clean")]
    pub(crate) winner_name: Option<String>,
}
