use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::trace;

/// Quiet period after the last keystroke before a search is sent.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Trailing-edge debouncer for one trigger.
///
/// Each [`schedule`](Debouncer::schedule) aborts the pending timer before
/// arming a new one, so at most one timer is outstanding and only a timer
/// that runs its full delay fires. Once fired, the action runs as its own
/// task and is not cancelled by later calls.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer for `action`, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
            trace!("debounce timer re-armed");
        }

        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action());
        }));
    }

    /// Drops the pending timer without firing it.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::sleep;

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    fn record(
        calls: &Calls,
        term: &'static str,
    ) -> impl FnOnce() -> std::future::Ready<()> + Send + 'static {
        let calls = Arc::clone(calls);
        move || {
            calls.lock().push(term);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn keystrokes_inside_window_fire_once_with_last_term() {
        let calls = Calls::default();
        let debouncer = Debouncer::default();

        debouncer.schedule(record(&calls, "s"));
        sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(&calls, "sp"));
        sleep(Duration::from_millis(450)).await;
        assert!(calls.lock().is_empty());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(*calls.lock(), ["sp"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separated_keystrokes_fire_separately() {
        let calls = Calls::default();
        let debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(&calls, "a"));
        sleep(Duration::from_millis(600)).await;
        debouncer.schedule(record(&calls, "ab"));
        sleep(Duration::from_millis(600)).await;

        assert_eq!(*calls.lock(), ["a", "ab"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_timer() {
        let calls = Calls::default();
        let debouncer = Debouncer::default();

        debouncer.schedule(record(&calls, "x"));
        assert!(debouncer.is_pending());
        debouncer.cancel();
        sleep(Duration::from_secs(2)).await;

        assert!(calls.lock().is_empty());
    }
}
