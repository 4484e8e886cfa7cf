//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `cluster_notify::adapters::mock` and adds a
//! builder that wires them into an [`EventRouter`].

pub use cluster_notify::adapters::mock::{
    MockHttpClient, MockResponse, RecordedRequest, RecordingSink, StaticFetcher,
};
pub use cluster_notify::traits::{Headers, HttpClient, HttpError, Response};

use std::sync::Arc;

use cluster_notify::policy::WatchPolicy;
use cluster_notify::router::EventRouter;

/// Router over mock collaborators; the mocks stay reachable for assertions.
pub struct TestRouter {
    pub router: EventRouter,
    pub fetcher: StaticFetcher,
    pub sink: RecordingSink,
}

impl TestRouter {
    pub fn new(policy: WatchPolicy, fetcher: StaticFetcher, sink: RecordingSink) -> Self {
        let router = EventRouter::new(
            Arc::new(policy),
            Arc::new(fetcher.clone()),
            Arc::new(sink.clone()),
        );
        Self {
            router,
            fetcher,
            sink,
        }
    }

    pub fn with_tail_lines(mut self, n: usize) -> Self {
        self.router = self.router.with_tail_lines(n);
        self
    }
}
