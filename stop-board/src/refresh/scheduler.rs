//! The refresh loop itself.
//!
//! All mutable state lives in a driver task spawned at construction; the
//! public [`RefreshScheduler`] is a handle that sends it commands and
//! reads its published view. Commands, ticks and fetch completions
//! interleave on that one task, which gives the ordering guarantees the
//! engine promises for free: no tick observes a half-applied fetch, and
//! two fetches for the same scheduler can never overlap, because a fetch
//! is awaited inline before the loop polls anything else.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::domain::{DepartureSnapshot, StopId, estimate};

use super::{BoardView, DepartureSource, RefreshConfig, RefreshListener, RefreshPhase};

/// Countdown granularity.
const TICK_PERIOD: Duration = Duration::from_secs(1);

enum Command {
    Start(Box<dyn RefreshListener>),
    Stop,
}

/// Periodically refreshes one stop's departure board.
///
/// Dropping the handle tears the loop down without the end event; a
/// deliberate [`stop`](Self::stop) drains the current cycle first.
pub struct RefreshScheduler {
    commands: mpsc::UnboundedSender<Command>,
    views: watch::Receiver<BoardView>,
}

impl RefreshScheduler {
    /// Create a scheduler for `stop`, fetching through `source`.
    ///
    /// The scheduler starts idle; nothing happens until
    /// [`start`](Self::start).
    pub fn new<S: DepartureSource>(source: S, stop: StopId, config: RefreshConfig) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (view_tx, views) = watch::channel(BoardView {
            snapshot: None,
            is_live: false,
            countdown: 0,
            phase: RefreshPhase::Idle,
        });

        let driver = Driver {
            source,
            stop,
            interval_secs: config.interval_secs.max(1),
            commands: command_rx,
            views: view_tx,
            listener: None,
            phase: RefreshPhase::Idle,
            countdown: 0,
            snapshot: None,
            is_live: false,
        };
        tokio::spawn(driver.run());

        Self { commands, views }
    }

    /// Start the loop, or re-attach to it if it is already running.
    ///
    /// From idle: fetches immediately, then begins the countdown; the
    /// listener's `on_start` fires once the fetch has been applied. While
    /// running (including while draining after [`stop`](Self::stop)): the
    /// pending end is cancelled, `listener` replaces the previous one and
    /// its `on_start` fires with the current state; no new fetch, no
    /// countdown reset.
    pub fn start(&self, listener: impl RefreshListener) {
        let _ = self.commands.send(Command::Start(Box::new(listener)));
    }

    /// Ask the loop to end at the next cycle boundary.
    ///
    /// The current countdown finishes first, so a caller can hand a stop
    /// off mid-cycle without an abrupt cut; `on_end` fires when the loop
    /// actually goes idle. No-op while idle.
    pub fn stop(&self) {
        let _ = self.commands.send(Command::Stop);
    }

    /// Current engine state.
    pub fn view(&self) -> BoardView {
        self.views.borrow().clone()
    }

    /// Subscribe to state changes. Every applied fetch, countdown tick
    /// and phase change publishes a fresh view.
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.views.clone()
    }
}

/// Owns all loop state; runs until the handle is dropped.
struct Driver<S> {
    source: S,
    stop: StopId,
    interval_secs: u32,
    commands: mpsc::UnboundedReceiver<Command>,
    views: watch::Sender<BoardView>,
    listener: Option<Box<dyn RefreshListener>>,
    phase: RefreshPhase,
    countdown: u32,
    snapshot: Option<Arc<DepartureSnapshot>>,
    is_live: bool,
}

impl<S: DepartureSource> Driver<S> {
    async fn run(mut self) {
        let mut tick = tokio::time::interval(TICK_PERIOD);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Start(listener)) => self.handle_start(listener, &mut tick).await,
                    Some(Command::Stop) => self.handle_stop(),
                    // Handle dropped: tear down without the end event.
                    None => break,
                },
                _ = tick.tick(), if self.phase != RefreshPhase::Idle => {
                    self.handle_tick(&mut tick).await;
                }
            }
        }
    }

    async fn handle_start(&mut self, listener: Box<dyn RefreshListener>, tick: &mut Interval) {
        match self.phase {
            RefreshPhase::Idle => {
                debug!(stop = %self.stop, "starting refresh loop");
                self.phase = RefreshPhase::Active;
                self.listener = Some(listener);
                self.countdown = self.interval_secs;
                self.fetch_once().await;
                self.publish();
                self.notify(|listener, view| listener.on_start(view));
                tick.reset();
            }
            RefreshPhase::Active | RefreshPhase::Ending => {
                // Re-attach: redirect the loop's output without touching
                // its cadence, and cancel any pending end.
                debug!(stop = %self.stop, "re-attaching listener to running loop");
                self.phase = RefreshPhase::Active;
                self.listener = Some(listener);
                self.publish();
                self.notify(|listener, view| listener.on_start(view));
            }
        }
    }

    fn handle_stop(&mut self) {
        if self.phase == RefreshPhase::Active {
            debug!(stop = %self.stop, "stop requested; draining current cycle");
            self.phase = RefreshPhase::Ending;
            self.publish();
        }
    }

    async fn handle_tick(&mut self, tick: &mut Interval) {
        self.countdown = self.countdown.saturating_sub(1);

        if self.countdown > 0 {
            self.publish();
            let remaining = self.countdown;
            if let Some(listener) = self.listener.as_mut() {
                listener.on_tick(remaining);
            }
            return;
        }

        if self.phase == RefreshPhase::Ending {
            debug!(stop = %self.stop, "refresh loop drained");
            self.phase = RefreshPhase::Idle;
            self.publish();
            if let Some(mut listener) = self.listener.take() {
                listener.on_end();
            }
            return;
        }

        self.countdown = self.interval_secs;
        self.fetch_once().await;
        self.publish();
        self.notify(|listener, view| listener.on_interval(view));
        tick.reset();
    }

    /// One fetch, applied to engine state. On failure the last good board
    /// is kept, re-projected to the current wall clock and marked stale.
    async fn fetch_once(&mut self) {
        match self.source.fetch(&self.stop).await {
            Ok(snapshot) => {
                debug!(
                    stop = %self.stop,
                    services = snapshot.services.len(),
                    "board refreshed"
                );
                self.snapshot = Some(Arc::new(snapshot));
                self.is_live = true;
            }
            Err(err) => {
                if err.is_malformed() {
                    error!(stop = %self.stop, error = %err, "departures response malformed");
                } else {
                    warn!(stop = %self.stop, error = %err, "departures fetch failed");
                }
                self.is_live = false;
                if let Some(previous) = &self.snapshot {
                    self.snapshot = Some(Arc::new(estimate(previous, Utc::now())));
                }
            }
        }
    }

    fn current_view(&self) -> BoardView {
        BoardView {
            snapshot: self.snapshot.clone(),
            is_live: self.is_live,
            countdown: self.countdown,
            phase: self.phase,
        }
    }

    fn publish(&self) {
        self.views.send_replace(self.current_view());
    }

    fn notify(&mut self, f: impl FnOnce(&mut Box<dyn RefreshListener>, &BoardView)) {
        let view = self.current_view();
        if let Some(listener) = self.listener.as_mut() {
            f(listener, &view);
        }
    }
}
