//! Stop and route record retrieval.
//!
//! Records are the static half of a stop panel: the stop's name and
//! position, the lines that call there. They change rarely, so the page
//! fetches each at most once per session through a bounded cache.

mod cached;
mod client;
mod error;

pub use cached::{CachedRecordClient, RecordCacheConfig};
pub use client::{RecordClient, RecordConfig, RouteRecord, StopRecord};
pub use error::RecordError;
