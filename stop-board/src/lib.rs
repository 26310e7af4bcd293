//! Live-data engine for a transit-stop departure page.
//!
//! This crate renders nothing. It acquires departure predictions for a
//! stop, keeps them fresh on a fixed cadence, re-projects remaining waits
//! from the wall clock when the network lets it down, and bounds the
//! memory of the record lookups a page performs. Presentation code is a
//! pure consumer, driven by [`refresh::RefreshScheduler`] events and
//! read-only views.

pub mod board;
pub mod cache;
pub mod domain;
pub mod records;
pub mod refresh;
