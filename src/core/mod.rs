//! Core components of the `irwebstats-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`IrClient`] and its builder, which own the login/session lifecycle.
//! - The primary [`IrError`] type.
//! - Shared request enums and the loosely typed [`Record`] row.
//! - Internal networking, throttling and decoding logic.

/// The main client (`IrClient`), builder, and configuration.
pub mod client;
/// The primary error type (`IrError`) for the crate.
pub mod error;
/// Shared enums and containers used across multiple endpoint families.
pub mod models;
pub(crate) mod session;
pub(crate) mod wire;

pub(crate) mod net;

pub use client::{Backoff, IrClient, IrClientBuilder, RetryConfig};
pub use error::IrError;
pub use models::{
    Category, ChartType, EventType, LicenseLevel, Order, Page, Record, SortField,
};
