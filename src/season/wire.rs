use serde::Deserialize;

use crate::core::wire::{de_opt_clean, de_opt_i64};

#[derive(Deserialize)]
pub(crate) struct SeriesRow {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub(crate) seriesid: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_clean")]
    pub(crate) seriesname: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub(crate) catid: Option<i64>,
    #[serde(default)]
    pub(crate) cars: Vec<CarRow>,
}

#[derive(Deserialize)]
pub(crate) struct CarRow {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub(crate) id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_clean")]
    pub(crate) name: Option<String>,
}
