//! Departure board snapshot types.
//!
//! A snapshot is everything one successful fetch said about a stop. It is
//! replaced wholesale on each refresh and re-projected (never mutated) as
//! it ages, so a renderer holding one can read it without coordination.

use chrono::{DateTime, Utc};

use super::stop::StopId;

/// A single predicted arrival for a service at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Whole seconds until the vehicle is expected, relative to the moment
    /// the snapshot was last projected. Negative values never survive
    /// projection.
    pub seconds_remaining: i64,

    /// Whether the prediction came from live vehicle tracking rather than
    /// the static timetable. Display concern only; carried through
    /// re-projection untouched.
    pub is_live: bool,

    /// Absolute expected time, fixed when the prediction was fetched.
    /// All wait recomputation derives from this.
    pub expected_at: DateTime<Utc>,
}

/// Upcoming departures of one line towards one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDeparture {
    /// Line name as shown on the vehicle (e.g. "25", "N155").
    pub line_name: String,

    /// Destination shown on the vehicle.
    pub destination: String,

    /// Operator code, when the source provides one.
    pub operator_code: Option<String>,

    /// Ascending by `seconds_remaining`. Never empty while the service is
    /// part of a snapshot; projection removes emptied services.
    pub departures: Vec<Departure>,
}

impl ServiceDeparture {
    /// Seconds until the soonest departure of this service.
    pub fn soonest(&self) -> Option<i64> {
        self.departures.first().map(|d| d.seconds_remaining)
    }
}

/// Everything one successful fetch said about a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureSnapshot {
    /// The stop this board belongs to.
    pub stop: StopId,

    /// Server-side label for when the board was generated.
    pub requested_at: DateTime<Utc>,

    /// Services in board order, re-sortable by soonest departure.
    pub services: Vec<ServiceDeparture>,
}

impl DepartureSnapshot {
    /// Whether the board has no departures left to show.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Total number of individual departures across all services.
    pub fn departure_count(&self) -> usize {
        self.services.iter().map(|s| s.departures.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DepartureSnapshot {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        DepartureSnapshot {
            stop: StopId::parse("490008660N").unwrap(),
            requested_at: now,
            services: vec![ServiceDeparture {
                line_name: "25".to_string(),
                destination: "Ilford".to_string(),
                operator_code: None,
                departures: vec![
                    Departure {
                        seconds_remaining: 60,
                        is_live: true,
                        expected_at: now + chrono::Duration::seconds(60),
                    },
                    Departure {
                        seconds_remaining: 300,
                        is_live: false,
                        expected_at: now + chrono::Duration::seconds(300),
                    },
                ],
            }],
        }
    }

    #[test]
    fn soonest_is_first_departure() {
        let snapshot = sample();
        assert_eq!(snapshot.services[0].soonest(), Some(60));
    }

    #[test]
    fn counts() {
        let snapshot = sample();
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.departure_count(), 2);
    }
}
