//! # scholarsync
//!
//! Turns a Google Scholar author profile into the deduplicated, classified,
//! sorted TypeScript data module consumed by the academic site.
//!
//! ## Modules
//!
//! - [`scholar`] - Author profile scraping and per-record detail fill
//! - [`record`] - Raw, untrusted record shapes from the source
//! - [`publication`] - Normalized publication model and parser
//! - [`classify`] - Keyword-based publication type classifier
//! - [`dedupe`] - Duplicate detection by normalized title
//! - [`emit`] - Sorting, stats snapshot, TypeScript rendering
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholarsync::scholar::{FetchOptions, ScholarClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScholarClient::new(&FetchOptions::default())?;
//!     let (profile, records) = client.fetch_author("eydLJrwAAAAJ").await?;
//!     println!("{}: {} publications", profile.name, records.len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod dedupe;
pub mod emit;
pub mod error;
pub mod publication;
pub mod record;
pub mod scholar;

pub use error::{Result, SyncError};
