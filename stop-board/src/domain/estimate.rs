//! Wait-time re-projection for aging snapshots.
//!
//! When a refresh fails, the last good snapshot is still usable: every
//! departure carries its absolute `expected_at`, so remaining waits can be
//! recomputed from the wall clock alone. Projection is pure and
//! copy-on-write; the input snapshot is never touched, so a renderer can
//! keep reading it while a new value is built.

use chrono::{DateTime, Utc};

use super::snapshot::{Departure, DepartureSnapshot, ServiceDeparture};

/// Re-projects `previous` as of `now`.
///
/// Remaining waits are recomputed from each departure's `expected_at`,
/// departures that have passed are dropped (never clamped to zero),
/// services with nothing left are removed, and the survivors are re-sorted
/// by soonest departure. Ties keep their relative order.
///
/// Repeated projection with an advancing clock is monotone: a wait never
/// grows and a dropped departure never reappears.
pub fn estimate(previous: &DepartureSnapshot, now: DateTime<Utc>) -> DepartureSnapshot {
    let mut services = reproject(&previous.services, now);
    services.sort_by_key(|s| s.soonest().unwrap_or(i64::MAX));

    DepartureSnapshot {
        stop: previous.stop.clone(),
        requested_at: previous.requested_at,
        services,
    }
}

/// Recomputes waits and prunes passed departures without reordering.
///
/// Used at conversion time, where the board should keep server order, and
/// as the first half of [`estimate`].
pub(crate) fn reproject(services: &[ServiceDeparture], now: DateTime<Utc>) -> Vec<ServiceDeparture> {
    services
        .iter()
        .filter_map(|service| {
            let departures: Vec<Departure> = service
                .departures
                .iter()
                .filter_map(|departure| {
                    let seconds = seconds_until(departure.expected_at, now);
                    (seconds >= 0).then(|| Departure {
                        seconds_remaining: seconds,
                        ..departure.clone()
                    })
                })
                .collect();

            (!departures.is_empty()).then(|| ServiceDeparture {
                departures,
                ..service.clone()
            })
        })
        .collect()
}

/// Whole seconds from `now` until `expected`, rounded to the nearest second.
fn seconds_until(expected: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = expected.signed_duration_since(now).num_milliseconds();
    (millis as f64 / 1000.0).round() as i64
}
