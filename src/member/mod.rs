mod api;
mod model;
mod wire;

pub use model::{CareerStats, ChartPoint, LastRaceStats, YearlyStats};

use serde_json::Value;

use crate::core::{Category, ChartType, IrClient, IrError, Record, RetryConfig};

/// Statistics of a single member, addressed by customer id.
///
/// Every call logs in first if needed and retries once with a fresh login when the
/// site silently drops the session.
///
/// # Example
///
/// ```no_run
/// # use irwebstats_rs::{Category, ChartType, Driver, IrClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IrClient::builder().credentials("me@example.com", "secret").build()?;
/// let driver = Driver::new(&client, 123_456);
///
/// for s in driver.career_stats().await? {
///     println!("{}: {} starts, {} wins", s.category, s.starts, s.wins);
/// }
/// let irating = driver.chart(Category::Road, ChartType::IRating).await?;
/// println!("{} iRating samples", irating.len());
/// # Ok(())
/// # }
/// ```
pub struct Driver {
    client: IrClient,
    custid: u64,
    retry_override: Option<RetryConfig>,
}

impl Driver {
    /// Creates a handle for the member with customer id `custid`.
    pub fn new(client: &IrClient, custid: u64) -> Self {
        Self {
            client: client.clone(),
            custid,
            retry_override: None,
        }
    }

    /// A handle for the logged-in member itself.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in fails.
    pub async fn current(client: &IrClient) -> Result<Self, IrError> {
        let custid = client.require_custid().await?;
        Ok(Self::new(client, custid))
    }

    /// Overrides the client's transport retry policy for calls made through this handle.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    pub const fn custid(&self) -> u64 {
        self.custid
    }

    /// Rating or licence history, as drawn on the member's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the data is malformed.
    #[tracing::instrument(skip(self), err, fields(custid = self.custid))]
    pub async fn chart(
        &self,
        category: Category,
        chart_type: ChartType,
    ) -> Result<Vec<ChartPoint>, IrError> {
        api::chart(
            &self.client,
            self.custid,
            category,
            chart_type,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Career totals per category (starts, wins, top 5s, laps led, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the data is malformed.
    #[tracing::instrument(skip(self), err, fields(custid = self.custid))]
    pub async fn career_stats(&self) -> Result<Vec<CareerStats>, IrError> {
        api::career_stats(&self.client, self.custid, self.retry_override.as_ref()).await
    }

    /// The same totals broken down per year.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the data is malformed.
    #[tracing::instrument(skip(self), err, fields(custid = self.custid))]
    pub async fn yearly_stats(&self) -> Result<Vec<YearlyStats>, IrError> {
        api::yearly_stats(&self.client, self.custid, self.retry_override.as_ref()).await
    }

    /// The most recent races (the site caps the list at about ten).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the data is malformed.
    #[tracing::instrument(skip(self), err, fields(custid = self.custid))]
    pub async fn last_races(&self) -> Result<Vec<LastRaceStats>, IrError> {
        api::last_races(&self.client, self.custid, self.retry_override.as_ref()).await
    }

    /// Car ids the member has raced.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), err, fields(custid = self.custid))]
    pub async fn cars_driven(&self) -> Result<Value, IrError> {
        api::cars_driven(&self.client, self.custid, self.retry_override.as_ref()).await
    }

    /// Personal best times in official events with `car_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), err, fields(custid = self.custid))]
    pub async fn personal_bests(&self, car_id: i64) -> Result<Value, IrError> {
        api::personal_bests(
            &self.client,
            self.custid,
            car_id,
            self.retry_override.as_ref(),
        )
        .await
    }
}

impl IrClient {
    /// Counters shown in the members site header (friends online, notifications).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not an object.
    #[tracing::instrument(skip(self), err)]
    pub async fn driver_counts(&self) -> Result<Record, IrError> {
        api::driver_counts(self, None).await
    }

    /// Look a member up by display name (e.g. `"Jane Doe"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn driver_status(&self, name: &str) -> Result<Value, IrError> {
        api::driver_status(self, name, None).await
    }
}
