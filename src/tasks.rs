//! Async task management for non-blocking page fetches.
//!
//! Fetches run on background tokio tasks while the UI keeps rendering. Each
//! fetch is tagged with a sequence number from a [`RequestSequencer`]; when
//! the result comes back through the channel, the main loop applies it only
//! if it is still the latest request issued. Responses to superseded
//! requests are dropped, so paging quickly can never regress the screen to
//! older data.
//!
//! # Flow
//!
//! 1. A page change asks the sequencer for a new sequence number
//! 2. `TaskSpawner::spawn_fetch_page` runs the request in the background
//! 3. The task sends `ApiMessage::PageFetched` through the channel
//! 4. The main loop polls with `try_recv()` and hands the message to `App`

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::api::{ApiError, ArticClient, Artwork, Page};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Result of a page fetch.
    PageFetched {
        /// Sequence number the request was issued with.
        seq: u64,
        /// One-based page number that was requested.
        page_number: u32,
        /// Page size that was requested.
        page_size: u32,
        /// The page, or why it could not be fetched.
        result: Result<Page<Artwork>, ApiError>,
    },
}

/// Issues monotonically increasing request sequence numbers.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    /// The most recently issued sequence number (0 = none yet).
    latest: u64,
}

impl RequestSequencer {
    /// Create a sequencer that has issued nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number, superseding all earlier ones.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// The most recently issued sequence number.
    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Check if `seq` is the latest issued request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq != 0 && seq == self.latest
    }
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to fetch one page of artworks.
    pub fn spawn_fetch_page(&self, client: &ArticClient, seq: u64, page_number: u32, page_size: u32) {
        debug!(seq, page_number, page_size, "Spawning page fetch");
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .fetch_page(page_number, page_size)
                .await
                .inspect_err(|e| error!(seq, page_number, error = %e, "Page fetch failed"));
            let _ = tx.send(ApiMessage::PageFetched {
                seq,
                page_number,
                page_size,
                result,
            });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
