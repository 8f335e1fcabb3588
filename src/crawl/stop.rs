// src/crawl/stop.rs
// =============================================================================
// When to stop fetching.
//
// Two things end a crawl early: the cancellation token (Ctrl-C) and the
// optional overall deadline. Both the page loop and the image loop ask the
// same StopSignal before every request, so neither can run past the other.
//
// Nothing is interrupted mid-request; a download that has started is allowed
// to finish and write its file.
// =============================================================================

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    Deadline,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Cancelled => write!(f, "Crawl cancelled"),
            StopReason::Deadline => write!(f, "Crawl deadline reached"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl StopSignal {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    // Adds a deadline `limit` from now
    //
    // A limit too large to represent is treated as no deadline
    pub fn with_limit(mut self, limit: Option<Duration>) -> Self {
        self.deadline = limit.and_then(|limit| Instant::now().checked_add(limit));
        self
    }

    /// `Some` once the crawl should not start another request.
    pub fn check(&self) -> Option<StopReason> {
        if self.cancel.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        match self.deadline {
            Some(at) if Instant::now() >= at => Some(StopReason::Deadline),
            _ => None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.check().is_some()
    }
}
