mod api;

use crate::core::{Category, IrClient, IrError, LicenseLevel, Order, Page, Record, RetryConfig, SortField};

/// An inclusive `low..=high` filter; `None` on either side leaves that side open.
pub type Span<T> = (Option<T>, Option<T>);

/// Builder for the driver search (the "Driver Stats" table of the members site).
///
/// Each range filter is open-ended on any side left as `None`. Results come 25 per
/// page; request further pages until `total` rows have been collected.
///
/// # Example
///
/// ```no_run
/// # use irwebstats_rs::{Category, DriverSearchBuilder, IrClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IrClient::builder().credentials("me@example.com", "secret").build()?;
/// let page = DriverSearchBuilder::new(&client)
///     .category(Category::Oval)
///     .irating(Some(2000), Some(3000))
///     .active(true)
///     .fetch()
///     .await?;
/// println!("{} of {} drivers", page.items.len(), page.total);
/// # Ok(())
/// # }
/// ```
pub struct DriverSearchBuilder {
    client: IrClient,
    pub(crate) category: Category,
    pub(crate) country: Option<String>,
    pub(crate) license: Span<LicenseLevel>,
    pub(crate) irating: Span<u32>,
    pub(crate) ttrating: Span<u32>,
    pub(crate) avg_start: Span<u32>,
    pub(crate) avg_finish: Span<u32>,
    pub(crate) avg_points: Span<u32>,
    pub(crate) avg_incidents: Span<u32>,
    pub(crate) active: bool,
    pub(crate) sort: SortField,
    pub(crate) order: Order,
    pub(crate) page: u32,
    retry_override: Option<RetryConfig>,
}

impl DriverSearchBuilder {
    pub fn new(client: &IrClient) -> Self {
        Self {
            client: client.clone(),
            category: Category::Road,
            country: None,
            license: (Some(LicenseLevel::Rookie), None),
            irating: (Some(0), None),
            ttrating: (Some(0), None),
            avg_start: (Some(0), None),
            avg_finish: (Some(0), None),
            avg_points: (Some(0), None),
            avg_incidents: (Some(0), None),
            active: false,
            sort: SortField::IRating,
            order: Order::Desc,
            page: 1,
            retry_override: None,
        }
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Restrict to one country code (e.g. `"US"`). Default: everywhere.
    #[must_use]
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    #[must_use]
    pub const fn license(mut self, low: Option<LicenseLevel>, high: Option<LicenseLevel>) -> Self {
        self.license = (low, high);
        self
    }

    #[must_use]
    pub const fn irating(mut self, low: Option<u32>, high: Option<u32>) -> Self {
        self.irating = (low, high);
        self
    }

    #[must_use]
    pub const fn ttrating(mut self, low: Option<u32>, high: Option<u32>) -> Self {
        self.ttrating = (low, high);
        self
    }

    #[must_use]
    pub const fn avg_start(mut self, low: Option<u32>, high: Option<u32>) -> Self {
        self.avg_start = (low, high);
        self
    }

    #[must_use]
    pub const fn avg_finish(mut self, low: Option<u32>, high: Option<u32>) -> Self {
        self.avg_finish = (low, high);
        self
    }

    #[must_use]
    pub const fn avg_points(mut self, low: Option<u32>, high: Option<u32>) -> Self {
        self.avg_points = (low, high);
        self
    }

    #[must_use]
    pub const fn avg_incidents(mut self, low: Option<u32>, high: Option<u32>) -> Self {
        self.avg_incidents = (low, high);
        self
    }

    /// Only members who raced recently.
    #[must_use]
    pub const fn active(mut self, yes: bool) -> Self {
        self.active = yes;
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
    /// The site prepends the logged-in member's own row to every page; it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if logging in or the request fails, or the data is malformed.
    #[tracing::instrument(skip(self), err, fields(page = self.page))]
    pub async fn fetch(self) -> Result<Page<Record>, IrError> {
        api::driver_search(&self.client, &self, self.retry_override.as_ref()).await
    }
}
