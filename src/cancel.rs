use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared, single-shot request to abandon a running search.
///
/// Clones share one flag: the caller keeps a clone and calls [`request_stop`](Self::request_stop),
/// the search polls its own clone once per iteration. Only eventual visibility is needed,
/// so a few extra iterations may run after the request.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    stop: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}
