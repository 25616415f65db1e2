//! Race results: the searchable archive, per-session results and lap data.

mod api;
mod model;

pub use model::{EventResults, Period};

use chrono::NaiveDate;
use serde_json::Value;

use crate::core::{
    Category, EventType, IrClient, IrError, LicenseLevel, Order, Page, Record, RetryConfig,
    SortField,
};

/// Builder for the results archive search.
///
/// Without a season or date range no period filter is sent. Results come 25 per page,
/// newest first.
///
/// # Example
///
/// ```no_run
/// # use irwebstats_rs::{EventType, IrClient, ResultsArchiveBuilder};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IrClient::builder().credentials("me@example.com", "secret").build()?;
/// let page = ResultsArchiveBuilder::new(&client)
///     .driver(123_456)
///     .event_types(&[EventType::Race])
///     .season(2016, 3, None)
///     .fetch()
///     .await?;
/// for row in &page.items {
///     println!("{:?}", row.get("subsessionid"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct ResultsArchiveBuilder {
    client: IrClient,
    pub(crate) driver: Option<u64>,
    pub(crate) category: Category,
    pub(crate) events: Vec<EventType>,
    pub(crate) official: bool,
    pub(crate) unofficial: bool,
    pub(crate) licenses: Vec<LicenseLevel>,
    pub(crate) car: Option<i64>,
    pub(crate) track: Option<i64>,
    pub(crate) series: Option<i64>,
    pub(crate) period: Option<Period>,
    pub(crate) page: u32,
    pub(crate) sort: SortField,
    pub(crate) order: Order,
    retry_override: Option<RetryConfig>,
}

impl ResultsArchiveBuilder {
    pub fn new(client: &IrClient) -> Self {
        Self {
            client: client.clone(),
            driver: None,
            category: Category::Road,
            events: EventType::ALL.to_vec(),
            official: true,
            unofficial: true,
            licenses: LicenseLevel::ALL.to_vec(),
            car: None,
            track: None,
            series: None,
            period: None,
            page: 1,
            sort: SortField::StartTime,
            order: Order::Desc,
            retry_override: None,
        }
    }

    /// Whose results to search. Default: the logged-in member.
    #[must_use]
    pub const fn driver(mut self, custid: u64) -> Self {
        self.driver = Some(custid);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn event_types(mut self, events: &[EventType]) -> Self {
        self.events = events.to_vec();
        self
    }

    #[must_use]
    pub const fn official_only(mut self) -> Self {
        self.official = true;
        self.unofficial = false;
        self
    }

    #[must_use]
    pub const fn unofficial_only(mut self) -> Self {
        self.official = false;
        self.unofficial = true;
        self
    }

    #[must_use]
    pub fn licenses(mut self, levels: &[LicenseLevel]) -> Self {
        self.licenses = levels.to_vec();
        self
    }

    #[must_use]
    pub const fn car(mut self, car_id: i64) -> Self {
        self.car = Some(car_id);
        self
    }

    #[must_use]
    pub const fn track(mut self, track_id: i64) -> Self {
        self.track = Some(track_id);
        self
    }

    #[must_use]
    pub const fn series(mut self, series_id: i64) -> Self {
        self.series = Some(series_id);
        self
    }

    /// Search one season (`quarter` 1-4), optionally one race week of it.
    #[must_use]
    pub const fn season(mut self, year: u16, quarter: u8, race_week: Option<u8>) -> Self {
        self.period = Some(Period::Season {
            year,
            quarter,
            race_week,
        });
        self
    }

    /// Search sessions started between two days. Replaces any season set before.
    #[must_use]
    pub const fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = Some(Period::Dates { start, end });
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

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Returns [`IrError::InvalidDates`] for a date range that ends before it starts,
    /// and an error if logging in or the request fails.
    #[tracing::instrument(skip(self), err, fields(page = self.page))]
    pub async fn fetch(self) -> Result<Page<Record>, IrError> {
        api::results_archive(&self.client, &self, self.retry_override.as_ref()).await
    }
}

/// One subsession (a single split of an event) and the data recorded for it.
pub struct Subsession {
    client: IrClient,
    id: u64,
    retry_override: Option<RetryConfig>,
}

impl Subsession {
    pub fn new(client: &IrClient, id: u64) -> Self {
        Self {
            client: client.clone(),
            id,
            retry_override: None,
        }
    }

    /// Overrides the client's transport retry policy for calls made through this handle.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Results table of one session of the event.
    ///
    /// `sim_session` is `0` for the main event, `-1` for qualifying and `-2` for
    /// practice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the CSV is truncated.
    #[tracing::instrument(skip(self), err, fields(subsession = self.id))]
    pub async fn results(&self, sim_session: i32) -> Result<EventResults, IrError> {
        api::event_results(&self.client, self.id, sim_session, self.retry_override.as_ref())
            .await
    }

    /// A member's result details from the event result page, including time-trial
    /// rating and safety rating changes, which the CSV lacks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the page has no result object.
    #[tracing::instrument(skip(self), err, fields(subsession = self.id))]
    pub async fn result_detail(&self, custid: u64) -> Result<Record, IrError> {
        api::event_result_detail(&self.client, self.id, custid, self.retry_override.as_ref())
            .await
    }

    /// All result rows of the subsession as the site's JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no `rows`.
    #[tracing::instrument(skip(self), err, fields(subsession = self.id))]
    pub async fn rows(&self) -> Result<Vec<Value>, IrError> {
        api::subsession_results(&self.client, self.id, self.retry_override.as_ref()).await
    }

    /// Lap times of one driver in one session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), err, fields(subsession = self.id))]
    pub async fn laps(&self, custid: u64, sim_session: i32) -> Result<Value, IrError> {
        api::laps(
            &self.client,
            self.id,
            custid,
            sim_session,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Lap-by-lap positions of every car.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), err, fields(subsession = self.id))]
    pub async fn lap_chart(&self) -> Result<Value, IrError> {
        api::lap_chart(&self.client, self.id, self.retry_override.as_ref()).await
    }

    /// Best lap of a driver in the main event, as the site reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the driver has no laps.
    pub async fn best_lap(&self, custid: u64) -> Result<Value, IrError> {
        let laps = self.laps(custid, 0).await?;
        api::best_lap_of(&laps)
    }
}

impl IrClient {
    /// Current world record lap, in seconds, for a car at a track in a given season.
    ///
    /// `None` when the season has no record or the time is in an unknown format.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn world_record(
        &self,
        year: u16,
        quarter: u8,
        car_id: i64,
        track_id: i64,
    ) -> Result<Option<f64>, IrError> {
        api::world_record(self, year, quarter, car_id, track_id).await
    }
}
