//! Live departures network boundary.
//!
//! This module provides the HTTP client for the departures endpoint, the
//! wire DTOs it decodes, and the conversion into validated domain
//! snapshots.
//!
//! Key characteristics of the boundary:
//! - One request fetches the whole board for a stop; there is no
//!   incremental endpoint.
//! - Predictions carry absolute expected times; remaining waits are
//!   always computed client-side, so a snapshot stays usable after the
//!   network goes away.
//! - Malformed responses fail the fetch loudly rather than producing a
//!   partially-guessed board.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{BoardClient, BoardConfig};
pub use convert::{ConversionError, convert_board};
pub use error::FetchError;
pub use mock::MockDepartureSource;
pub use types::{BoardResponse, DepartureEntry, ServiceEntry};
