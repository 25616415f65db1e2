//! Series and seasons: listings, standings, race sessions and schedules.

mod api;
mod model;
mod wire;

pub use model::{Car, Series};

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::{IrClient, IrError, Order, Page, Record, RetryConfig, SortField};

/// Builder for the championship standings of one car class in a season.
pub struct SeasonStandingsBuilder {
    client: IrClient,
    pub(crate) season: i64,
    pub(crate) car_class: i64,
    pub(crate) club: Option<i64>,
    pub(crate) race_week: Option<u8>,
    pub(crate) division: Option<i64>,
    pub(crate) sort: SortField,
    pub(crate) order: Order,
    pub(crate) page: u32,
    retry_override: Option<RetryConfig>,
}

impl SeasonStandingsBuilder {
    pub fn new(client: &IrClient, season: i64, car_class: i64) -> Self {
        Self {
            client: client.clone(),
            season,
            car_class,
            club: None,
            race_week: None,
            division: None,
            sort: SortField::Points,
            order: Order::Desc,
            page: 1,
            retry_override: None,
        }
    }

    #[must_use]
    pub const fn club(mut self, club_id: i64) -> Self {
        self.club = Some(club_id);
        self
    }

    /// Standings after a single race week instead of the whole season.
    #[must_use]
    pub const fn race_week(mut self, week: u8) -> Self {
        self.race_week = Some(week);
        self
    }

    #[must_use]
    pub const fn division(mut self, division: i64) -> Self {
        self.division = Some(division);
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortField, order: Order) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// # Errors
    ///
    /// Returns an error if logging in or the request fails, or the data is malformed.
    #[tracing::instrument(skip(self), err, fields(season = self.season, page = self.page))]
    pub async fn fetch(self) -> Result<Page<Record>, IrError> {
        api::season_standings(&self.client, &self, self.retry_override.as_ref()).await
    }
}

impl IrClient {
    /// Every series listed on the series statistics page, with its cars.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails, or the page has no season
    /// listing.
    #[tracing::instrument(skip(self), err)]
    pub async fn all_seasons(&self) -> Result<Vec<Series>, IrError> {
        api::all_seasons(self, None).await
    }

    /// Race sessions of a season in one race week, one row per split with its
    /// `sessionid`, `subsessionid`, `strengthoffield` and start time.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails, or the data is malformed.
    #[tracing::instrument(skip(self), err)]
    pub async fn race_sessions(&self, season: i64, race_week: u8) -> Result<Vec<Record>, IrError> {
        api::race_sessions(self, season, race_week, None).await
    }

    /// Current and upcoming sessions (practice, qualifying, race) of a season between
    /// `start` and `end`, passed through as the site expects them.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn session_times(&self, season: i64, start: &str, end: &str) -> Result<Value, IrError> {
        api::session_times(self, season, start, end, None).await
    }

    /// Logo file of every current series, keyed by season id.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn current_series_images(&self) -> Result<BTreeMap<String, String>, IrError> {
        api::current_series_images(self, None).await
    }
}
