//! Runs a search on its own thread and hands the result back over a channel.
use crate::cancel::CancellationToken;
use crate::engine::Board;
use crate::error::WorkerError;
use crate::solver::{solve, SearchOptions, SearchResult};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error};

/// Handle to a search running in the background.
///
/// Exactly one [`SearchResult`] is sent per handle, after the search has fully terminated.
/// Once received it is kept in the handle, so it can be polled for and then waited on.
#[derive(Debug)]
pub struct SolveHandle {
    cancel: CancellationToken,
    rx: mpsc::Receiver<SearchResult>,
    join: Option<JoinHandle<()>>,
    received: Option<SearchResult>,
}

impl SolveHandle {
    /// Asks the search to stop at its next checkpoint. The result will be `Cancelled`
    /// unless the search finished first.
    pub fn cancel(&self) {
        self.cancel.request_stop();
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Returns the result if the search has already finished, `Ok(None)` while it runs.
    ///
    /// # Errors
    /// `WorkerError` if the search thread ended without sending a result.
    pub fn try_recv(&mut self) -> Result<Option<SearchResult>, WorkerError> {
        if self.received.is_none() {
            match self.rx.try_recv() {
                Ok(result) => self.received = Some(result),
                Err(mpsc::TryRecvError::Empty) => return Ok(None),
                Err(mpsc::TryRecvError::Disconnected) => return Err(self.worker_failure()),
            }
        }
        Ok(self.received.clone())
    }

    /// Waits up to `timeout` for the result. `Ok(None)` means the search is still running.
    ///
    /// # Errors
    /// `WorkerError` if the search thread ended without sending a result.
    pub fn wait_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<SearchResult>, WorkerError> {
        if self.received.is_none() {
            match self.rx.recv_timeout(timeout) {
                Ok(result) => self.received = Some(result),
                Err(mpsc::RecvTimeoutError::Timeout) => return Ok(None),
                Err(mpsc::RecvTimeoutError::Disconnected) => return Err(self.worker_failure()),
            }
        }
        Ok(self.received.clone())
    }

    /// Blocks until the search terminates and joins its thread.
    ///
    /// Returns the result even if it was already seen through
    /// [`try_recv`](Self::try_recv) or [`wait_timeout`](Self::wait_timeout).
    pub fn wait(mut self) -> Result<SearchResult, WorkerError> {
        let result = match self.received.take() {
            Some(result) => result,
            None => match self.rx.recv() {
                Ok(result) => result,
                Err(_) => return Err(self.worker_failure()),
            },
        };
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        Ok(result)
    }

    /// Joins the dead search thread and turns its panic message, if any, into an error.
    fn worker_failure(&mut self) -> WorkerError {
        let Some(join) = self.join.take() else {
            return WorkerError::Disconnected;
        };
        match join.join() {
            Ok(()) => WorkerError::Disconnected,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(%message, "search thread panicked");
                WorkerError::Panicked(message)
            }
        }
    }
}

/// Starts solving `start` on a new thread with a fresh cancellation token.
pub fn spawn_solve(start: Board, options: SearchOptions) -> SolveHandle {
    spawn_solve_with_token(start, options, CancellationToken::new())
}

/// Starts solving `start` on a new thread, observing the given `cancel` token.
///
/// Useful when the token must exist before the search does, e.g. to share it with a
/// deadline timer.
pub fn spawn_solve_with_token(
    start: Board,
    options: SearchOptions,
    cancel: CancellationToken,
) -> SolveHandle {
    let cancel_for_thread = cancel.clone();
    let (tx, rx) = mpsc::channel::<SearchResult>();
    let join = std::thread::spawn(move || {
        let result = solve(&start, &options, &cancel_for_thread);
        debug!("search thread finished");
        let _ = tx.send(result);
    });
    SolveHandle {
        cancel,
        rx,
        join: Some(join),
        received: None,
    }
}
