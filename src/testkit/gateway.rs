//! Mock [`EmoteGateway`] with scripted replies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

use crate::relay::gateway::{AttemptError, EmoteGateway, GatewayReply};

/// A gateway whose calls pop the next scripted result from a queue.
///
/// When the queue is exhausted further calls report a connection error, so
/// a test that scripts too few results fails loudly instead of hanging on
/// an implicit success. Call counts and requested URLs are exposed through
/// shared handles for call-count assertions.
pub struct ScriptedGateway {
    results: Mutex<VecDeque<Result<GatewayReply, AttemptError>>>,
    call_count: Arc<AtomicU32>,
    requested_urls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            call_count: Arc::new(AtomicU32::new(0)),
            requested_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_results(self, results: Vec<Result<GatewayReply, AttemptError>>) -> Self {
        *self.results.lock() = results.into();
        self
    }

    /// Shorthand for a scripted reply with the given status and body.
    #[must_use]
    pub fn ok(status: u16, body: &str) -> Result<GatewayReply, AttemptError> {
        Ok(GatewayReply {
            status,
            body: body.to_string(),
            elapsed: Duration::from_millis(12),
        })
    }

    /// Shared counter of `get` calls made so far.
    #[must_use]
    pub fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    /// Shared list of every URL requested, in call order.
    #[must_use]
    pub fn requested_urls_handle(&self) -> Arc<Mutex<Vec<String>>> {
        self.requested_urls.clone()
    }

    #[must_use]
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmoteGateway for ScriptedGateway {
    async fn get(&self, url: &Url, _timeout: Duration) -> Result<GatewayReply, AttemptError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requested_urls.lock().push(url.to_string());

        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AttemptError::Connect))
    }
}
