use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::ElementError;

// Defaults applied when a handle or query carries no explicit wait.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Condition-polling engine.
///
/// Blocks the caller until the supplied predicate reports true or the
/// timeout elapses; there is no external cancel signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    timeout: Duration,
    interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Wait {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll the predicate until it reports true.
    ///
    /// A predicate error of `NotFound` or `Stale` is transient while the
    /// page rebuilds and is retried; any other error propagates unchanged.
    pub async fn until<F, Fut>(&self, mut condition: F) -> Result<(), ElementError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, ElementError>>,
    {
        let start = Instant::now();

        loop {
            match condition().await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(error @ (ElementError::NotFound(_) | ElementError::Stale(_))) => {
                    debug!("Retrying transient failure while waiting: {error}");
                }
                Err(error) => return Err(error),
            }

            if start.elapsed() >= self.timeout {
                return Err(ElementError::Timeout(format!(
                    "Timed out after {:?} waiting for condition",
                    self.timeout
                )));
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
