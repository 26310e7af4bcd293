//! Scripted departure source for tests and offline development.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{DepartureSnapshot, StopId};
use crate::refresh::DepartureSource;

use super::error::FetchError;

/// One scripted fetch result.
enum Reply {
    Board(DepartureSnapshot),
    Failure { status: u16, message: String },
}

/// Departure source that replays a scripted sequence of results.
///
/// Replies are consumed in push order. Once the script runs out, the most
/// recently served board is repeated (a stable stop, useful for long loop
/// tests); if no board was ever served, fetches fail.
///
/// Cloning shares the script, so a test can keep a handle to push replies
/// or read the fetch count while the scheduler owns the other.
#[derive(Clone)]
pub struct MockDepartureSource {
    inner: Arc<Mutex<Inner>>,
    delay: Duration,
}

struct Inner {
    script: VecDeque<Reply>,
    last_board: Option<DepartureSnapshot>,
    fetches: usize,
}

impl MockDepartureSource {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                script: VecDeque::new(),
                last_board: None,
                fetches: 0,
            })),
            delay: Duration::ZERO,
        }
    }

    /// Make every fetch take `delay` before resolving.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queue a successful board reply.
    pub fn push_board(&self, board: DepartureSnapshot) {
        self.lock().script.push_back(Reply::Board(board));
    }

    /// Queue a failed fetch.
    pub fn push_failure(&self, status: u16, message: impl Into<String>) {
        self.lock().script.push_back(Reply::Failure {
            status,
            message: message.into(),
        });
    }

    /// How many fetches have been issued against this source.
    pub fn fetch_count(&self) -> usize {
        self.lock().fetches
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("mock script lock poisoned")
    }
}

impl Default for MockDepartureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DepartureSource for MockDepartureSource {
    async fn fetch(&self, stop: &StopId) -> Result<DepartureSnapshot, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut inner = self.lock();
        inner.fetches += 1;

        match inner.script.pop_front() {
            Some(Reply::Board(board)) => {
                inner.last_board = Some(board.clone());
                Ok(board)
            }
            Some(Reply::Failure { status, message }) => Err(FetchError::Api { status, message }),
            None => match &inner.last_board {
                Some(board) => Ok(board.clone()),
                None => Err(FetchError::Api {
                    status: 404,
                    message: format!("no scripted board for stop {stop}"),
                }),
            },
        }
    }
}
