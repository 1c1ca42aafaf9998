//! Generic async operation controller.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use ghkit_domain::{OperationEvent, OperationState, Reply};
use tokio::sync::watch;
use tracing::debug;

/// How overlapping invocations settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettlePolicy {
    /// Whichever call settles last determines the state.
    #[default]
    LastSettled,
    /// Only the most recent invocation may settle; older results are dropped.
    LatestInvocation,
}

/// Wraps one asynchronous unit of work behind an observable
/// idle/loading/success/error state.
///
/// There is no in-flight guard: every invocation runs.
pub struct AsyncOperation<T> {
    name: &'static str,
    policy: SettlePolicy,
    invocations: AtomicU64,
    state: watch::Sender<OperationState<T>>,
}

impl<T> AsyncOperation<T> {
    /// Creates an idle operation. `name` only appears in logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            policy: SettlePolicy::default(),
            invocations: AtomicU64::new(0),
            state: watch::Sender::new(OperationState::Idle),
        }
    }

    /// Sets the settle policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SettlePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current settle policy.
    #[must_use]
    pub const fn policy(&self) -> SettlePolicy {
        self.policy
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OperationState<T>> {
        self.state.subscribe()
    }

    /// Runs `work`, moving to `Loading` first and settling on its outcome.
    ///
    /// Returns the state after settlement, which under
    /// [`SettlePolicy::LatestInvocation`] may belong to a newer invocation.
    pub async fn run<F>(&self, work: F) -> OperationState<T>
    where
        T: Clone,
        F: Future<Output = Reply<T>>,
    {
        let ticket = self.begin();
        let outcome = work.await;
        self.settle(ticket, outcome);
        self.state()
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> OperationState<T>
    where
        T: Clone,
    {
        self.state.borrow().clone()
    }

    fn begin(&self) -> u64 {
        let ticket = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(operation = self.name, ticket, "operation started");
        self.apply(OperationEvent::Started);
        ticket
    }

    fn settle(&self, ticket: u64, outcome: Reply<T>) {
        if self.policy == SettlePolicy::LatestInvocation
            && ticket != self.invocations.load(Ordering::SeqCst)
        {
            debug!(operation = self.name, ticket, "dropping stale result");
            return;
        }

        let event = match outcome {
            Ok(value) => {
                debug!(operation = self.name, ticket, "operation succeeded");
                OperationEvent::Succeeded(value)
            }
            Err(message) => {
                debug!(operation = self.name, ticket, error = %message, "operation failed");
                OperationEvent::Failed(message)
            }
        };
        self.apply(event);
    }

    fn apply(&self, event: OperationEvent<T>) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).transition(event));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_success_and_error() {
        let op = AsyncOperation::new("test");
        assert!(op.state().is_idle());

        let state = op.run(async { Ok(1) }).await;
        assert_eq!(state, OperationState::Success(1));

        let state = op.run(async { Err("boom".to_string()) }).await;
        assert_eq!(state.error(), Some("boom"));
        assert_eq!(state.success(), None);
    }

    #[tokio::test]
    async fn test_loading_while_pending() {
        let op = Arc::new(AsyncOperation::<u32>::new("test"));
        let (tx, rx) = oneshot::channel::<u32>();
        let mut watcher = op.subscribe();

        let task = {
            let op = Arc::clone(&op);
            tokio::spawn(async move { op.run(async { Ok(rx.await.unwrap()) }).await })
        };
        watcher.changed().await.unwrap();
        assert!(watcher.borrow_and_update().is_loading());

        tx.send(7).unwrap();
        assert_eq!(task.await.unwrap(), OperationState::Success(7));
    }

    async fn overlap(policy: SettlePolicy) -> OperationState<&'static str> {
        let op = Arc::new(AsyncOperation::new("test").with_policy(policy));
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();

        let first = {
            let op = Arc::clone(&op);
            tokio::spawn(async move { op.run(async { Ok(first_rx.await.unwrap()) }).await })
        };
        let mut watcher = op.subscribe();
        while !watcher.borrow_and_update().is_loading() {
            watcher.changed().await.unwrap();
        }
        let second = {
            let op = Arc::clone(&op);
            tokio::spawn(async move { op.run(async { Ok(second_rx.await.unwrap()) }).await })
        };
        watcher.changed().await.unwrap();

        second_tx.send("second").unwrap();
        second.await.unwrap();
        first_tx.send("first").unwrap();
        first.await.unwrap();

        op.state()
    }

    #[tokio::test]
    async fn test_last_settled_wins_by_default() {
        assert_eq!(
            overlap(SettlePolicy::LastSettled).await,
            OperationState::Success("first")
        );
    }

    #[tokio::test]
    async fn test_latest_invocation_drops_stale_results() {
        assert_eq!(
            overlap(SettlePolicy::LatestInvocation).await,
            OperationState::Success("second")
        );
    }
}
