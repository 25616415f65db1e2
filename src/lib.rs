//! irwebstats-rs: async client for the iRacing members site statistics.
//!
//! The site has no public API; this crate drives the same endpoints its pages use.
//! An [`IrClient`] logs in on first use (or reuses a saved session), paces requests,
//! and logs in again once if the site drops the session mid-way.
//!
//! ```no_run
//! # use irwebstats_rs::{Driver, IrClient};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IrClient::builder()
//!     .credentials("me@example.com", "secret")
//!     .session_file("ir_session.txt")
//!     .build()?;
//! let me = Driver::current(&client).await?;
//! for race in me.last_races().await? {
//!     println!("{:?}: P{:?}", race.date, race.finish_pos);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod hosted;
pub mod member;
pub mod results;
pub mod search;
pub mod season;
pub mod service;

pub use crate::core::{
    Backoff, Category, ChartType, EventType, IrClient, IrClientBuilder, IrError, LicenseLevel,
    Order, Page, Record, RetryConfig, SortField,
};
pub use hosted::HostedResultsBuilder;
pub use member::{CareerStats, ChartPoint, Driver, LastRaceStats, YearlyStats};
pub use results::{EventResults, Period, ResultsArchiveBuilder, Subsession};
pub use search::{DriverSearchBuilder, Span};
pub use season::{Car, SeasonStandingsBuilder, Series};
pub use service::{Listing, ServiceInfo};
