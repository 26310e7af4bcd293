//! Departures API response DTOs.
//!
//! These types map directly to the departures JSON endpoint. Timestamps
//! stay as ISO 8601 strings here; parsing and validation happen in
//! `convert`, so a decode failure can always point at the offending field.

use serde::Deserialize;

/// Response from the departures endpoint for one stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Stop the board was requested for.
    pub stop_id: String,

    /// When the server generated this board (ISO 8601 datetime).
    pub requested_at: String,

    /// Services with upcoming departures, in board order.
    pub services: Vec<ServiceEntry>,
}

/// One line/destination grouping on the board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    /// Line name as displayed on the vehicle.
    pub line_name: String,

    /// Destination as displayed on the vehicle.
    pub destination: String,

    /// Operator code, when the source knows it.
    pub operator_code: Option<String>,

    /// Predicted departures, soonest first.
    pub departures: Vec<DepartureEntry>,
}

/// A single predicted departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureEntry {
    /// Whether the prediction comes from live vehicle tracking.
    pub is_live: bool,

    /// Expected departure time (ISO 8601 datetime).
    pub expected_at: String,
}
