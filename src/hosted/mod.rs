//! Results of hosted (private) sessions.

mod api;

use chrono::NaiveDate;
use serde_json::Value;

use crate::core::{IrClient, IrError, Order, Page, RetryConfig, SortField};

/// Builder for the hosted session results search.
pub struct HostedResultsBuilder {
    client: IrClient,
    pub(crate) host: Option<String>,
    pub(crate) session_name: Option<String>,
    pub(crate) dates: Option<(NaiveDate, NaiveDate)>,
    pub(crate) sort: SortField,
    pub(crate) order: Order,
    pub(crate) page: u32,
    retry_override: Option<RetryConfig>,
}

impl HostedResultsBuilder {
    pub fn new(client: &IrClient) -> Self {
        Self {
            client: client.clone(),
            host: None,
            session_name: None,
            dates: None,
            sort: SortField::StartTime,
            order: Order::Desc,
            page: 1,
            retry_override: None,
        }
    }

    /// Display name of the member who hosted the session.
    #[must_use]
    pub fn host(mut self, name: impl Into<String>) -> Self {
        self.host = Some(name.into());
        self
    }

    #[must_use]
    pub fn session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = Some(name.into());
        self
    }

    /// Sessions started between two days (midnight UTC).
    #[must_use]
    pub const fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.dates = Some((start, end));
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
    /// Returns [`IrError::InvalidDates`] for a date range that ends before it starts,
    /// and an error if logging in or the request fails.
    #[tracing::instrument(skip(self), err, fields(page = self.page))]
    pub async fn fetch(self) -> Result<Page<Value>, IrError> {
        api::hosted_results(&self.client, &self, self.retry_override.as_ref()).await
    }
}
