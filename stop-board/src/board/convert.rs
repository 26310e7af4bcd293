//! Conversion from board DTOs to domain snapshots.
//!
//! Transforms the raw departures response into validated domain types,
//! parsing identifiers and timestamps and projecting waits as of the fetch
//! instant. A response that fails here is malformed and the whole board is
//! rejected; guessing around a bad field would corrupt the snapshot.

use chrono::{DateTime, Utc};

use crate::domain::{Departure, DepartureSnapshot, ServiceDeparture, StopId, reproject};

use super::types::BoardResponse;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// The board's stop id failed validation.
    #[error("invalid stop id: {0}")]
    InvalidStopId(String),

    /// A timestamp was not valid ISO 8601.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Convert a board response into a domain snapshot, with waits projected
/// as of `now`.
///
/// Departures whose expected time has already passed are dropped here, so
/// a fresh snapshot never shows a vehicle that left before the fetch
/// completed. Board order is preserved.
pub fn convert_board(
    board: &BoardResponse,
    now: DateTime<Utc>,
) -> Result<DepartureSnapshot, ConversionError> {
    let stop = StopId::parse(&board.stop_id)
        .map_err(|_| ConversionError::InvalidStopId(board.stop_id.clone()))?;

    let requested_at = parse_timestamp(&board.requested_at)?;

    let mut services = Vec::with_capacity(board.services.len());
    for entry in &board.services {
        let mut departures = Vec::with_capacity(entry.departures.len());
        for departure in &entry.departures {
            departures.push(Departure {
                seconds_remaining: 0,
                is_live: departure.is_live,
                expected_at: parse_timestamp(&departure.expected_at)?,
            });
        }

        // Sources usually send departures soonest-first, but the snapshot
        // invariant does not depend on it.
        departures.sort_by_key(|d| d.expected_at);

        services.push(ServiceDeparture {
            line_name: entry.line_name.clone(),
            destination: entry.destination.clone(),
            operator_code: entry.operator_code.clone(),
            departures,
        });
    }

    Ok(DepartureSnapshot {
        stop,
        requested_at,
        services: reproject(&services, now),
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ConversionError::InvalidTimestamp(s.to_string()))
}
