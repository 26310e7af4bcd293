//! Polling refresh engine for live departure boards.
//!
//! A [`RefreshScheduler`] keeps one stop's board fresh: it fetches on
//! start, counts down a fixed interval one second at a time, refetches at
//! zero, and falls back to wall-clock re-projection of the last good
//! snapshot when a fetch fails. The presentation layer is a pure consumer:
//! it subscribes a [`RefreshListener`] for lifecycle events and reads the
//! current [`BoardView`] whenever it wants to draw.
//!
//! The loop has three phases. `Idle` is the rest state. `start` moves the
//! loop to `Active`; `stop` arms a deferred end (`Ending`), letting the
//! current countdown drain before the loop goes back to `Idle`. Calling
//! `start` on a loop that is already running re-attaches the caller,
//! swapping where the output goes without disturbing the fetch cadence.

mod scheduler;

pub use scheduler::RefreshScheduler;

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::board::FetchError;
use crate::domain::{DepartureSnapshot, StopId, estimate};

/// Default seconds between board refreshes.
pub const DEFAULT_INTERVAL_SECS: u32 = 60;

/// Configuration for a refresh scheduler.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Seconds between refreshes. Values below 1 are treated as 1.
    pub interval_secs: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl RefreshConfig {
    /// Set the refresh interval.
    pub fn with_interval_secs(mut self, secs: u32) -> Self {
        self.interval_secs = secs;
        self
    }
}

/// Where a scheduler currently is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    /// Not running; `start` begins a new loop.
    Idle,
    /// Fetching and counting down.
    Active,
    /// `stop` was requested; the current countdown drains, then the loop
    /// goes idle.
    Ending,
}

/// Read-only picture of a scheduler's state.
///
/// Published on every state change; renderers read it, never write it.
#[derive(Debug, Clone)]
pub struct BoardView {
    /// Last known board, if any fetch ever succeeded. Shared, immutable.
    pub snapshot: Option<Arc<DepartureSnapshot>>,

    /// Whether `snapshot` came straight from the most recent fetch. False
    /// means the board is a wall-clock re-projection and should be marked
    /// stale.
    pub is_live: bool,

    /// Seconds until the next refresh.
    pub countdown: u32,

    /// Current loop phase.
    pub phase: RefreshPhase,
}

impl BoardView {
    /// Whether there is any board to show.
    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The board re-projected to `now`.
    ///
    /// A stale view's waits age between refreshes; a renderer drawing a
    /// non-live board calls this to get current numbers instead of the
    /// ones frozen at the last failed refresh.
    pub fn projected(&self, now: DateTime<Utc>) -> Option<DepartureSnapshot> {
        self.snapshot.as_ref().map(|snapshot| estimate(snapshot, now))
    }
}

/// Supplies departure snapshots to a scheduler.
///
/// This abstraction lets the engine run against the HTTP client in
/// production and scripted data in tests. Futures must be `Send` because
/// the scheduler task owns the source.
pub trait DepartureSource: Send + Sync + 'static {
    /// Fetch the current departure board for one stop.
    fn fetch(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<DepartureSnapshot, FetchError>> + Send;
}

/// Receives a scheduler's lifecycle events.
///
/// Events fire on the scheduler's task, after the engine state they
/// describe has been applied, so reading the view inside a callback never
/// observes a half-updated cycle.
pub trait RefreshListener: Send + 'static {
    /// A periodic refresh completed (successfully or not) and the view
    /// was updated.
    fn on_interval(&mut self, view: &BoardView);

    /// The loop started, or this listener was attached to an already
    /// running loop. Defaults to [`on_interval`](Self::on_interval) so a
    /// listener that treats both alike only implements one method.
    fn on_start(&mut self, view: &BoardView) {
        self.on_interval(view);
    }

    /// One second of the countdown elapsed; `remaining` seconds until the
    /// next refresh.
    fn on_tick(&mut self, remaining: u32) {
        let _ = remaining;
    }

    /// The loop drained after a `stop` request and went idle.
    fn on_end(&mut self) {}
}

/// The silent listener, for callers that only poll the view.
impl RefreshListener for () {
    fn on_interval(&mut self, _view: &BoardView) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval_secs, DEFAULT_INTERVAL_SECS);
    }

    #[test]
    fn config_builder() {
        let config = RefreshConfig::default().with_interval_secs(30);
        assert_eq!(config.interval_secs, 30);
    }

    #[test]
    fn empty_view_has_no_data() {
        let view = BoardView {
            snapshot: None,
            is_live: false,
            countdown: 0,
            phase: RefreshPhase::Idle,
        };
        assert!(!view.has_data());
        assert!(view.projected(Utc::now()).is_none());
    }

    #[test]
    fn projected_ages_the_stored_board() {
        let now = Utc::now();
        let snapshot = DepartureSnapshot {
            stop: StopId::parse("490008660N").unwrap(),
            requested_at: now,
            services: vec![crate::domain::ServiceDeparture {
                line_name: "25".to_string(),
                destination: "Ilford".to_string(),
                operator_code: None,
                departures: vec![crate::domain::Departure {
                    seconds_remaining: 300,
                    is_live: true,
                    expected_at: now + chrono::Duration::seconds(300),
                }],
            }],
        };
        let view = BoardView {
            snapshot: Some(Arc::new(snapshot)),
            is_live: false,
            countdown: 42,
            phase: RefreshPhase::Active,
        };

        let aged = view
            .projected(now + chrono::Duration::seconds(120))
            .unwrap();
        assert_eq!(aged.services[0].soonest(), Some(180));
    }
}
