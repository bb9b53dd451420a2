// ── Coalescing query worker ──
//
// Query states arrive through a single-slot `watch` mailbox. The worker
// waits for input to settle, computes the view for the newest state only,
// and publishes it on an output `watch`. Intermediate states that were
// overwritten before the worker looked are never computed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::catalog::Catalog;
use crate::query::{QueryState, QueryView};
use crate::stream::ViewStream;

/// Handle to a running query worker.
///
/// Dropping the handle drops the input sender, which stops the worker.
pub struct QueryWorker {
    input: watch::Sender<QueryState>,
    output: watch::Receiver<Arc<QueryView>>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl QueryWorker {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// The view for `initial` is computed synchronously so subscribers
    /// always have something to render.
    pub fn spawn(
        catalog: Arc<Catalog>,
        initial: QueryState,
        suggestion_limit: usize,
        settle: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let first = Arc::new(catalog.view(&initial, suggestion_limit));
        let (input, input_rx) = watch::channel(initial);
        let (output_tx, output) = watch::channel(first);

        let handle = tokio::spawn(query_task(
            catalog,
            input_rx,
            output_tx,
            suggestion_limit,
            settle,
            cancel.clone(),
        ));

        Self {
            input,
            output,
            cancel,
            handle,
        }
    }

    /// Replace the pending query state.
    pub fn submit(&self, state: QueryState) {
        self.input.send_replace(state);
    }

    /// Edit the pending query state in place.
    pub fn update(&self, edit: impl FnOnce(&mut QueryState)) {
        self.input.send_modify(edit);
    }

    /// The state most recently submitted (not necessarily computed yet).
    pub fn pending(&self) -> QueryState {
        self.input.borrow().clone()
    }

    /// The most recently published view.
    pub fn current(&self) -> Arc<QueryView> {
        self.output.borrow().clone()
    }

    pub fn subscribe(&self) -> ViewStream {
        ViewStream::new(self.output.clone())
    }

    /// Cancel the worker and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

async fn query_task(
    catalog: Arc<Catalog>,
    mut input: watch::Receiver<QueryState>,
    output: watch::Sender<Arc<QueryView>>,
    suggestion_limit: usize,
    settle: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = input.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        if !settle.is_zero() {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(settle) => {}
            }
        }

        // Anything sent during the settle interval is folded into this read.
        let state = input.borrow_and_update().clone();
        let view = catalog.view(&state, suggestion_limit);
        debug!(
            search = %state.search,
            lines = state.lines.len(),
            matched = view.filtered.filtered_count(),
            "recomputed query view"
        );
        output.send_replace(Arc::new(view));
    }
    debug!("query worker stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::view_mode::ViewMode;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_json(
            r#"{ "devices": [
                { "id": "a", "product": { "name": "Switch Pro" }, "line": { "id": "switching", "name": "Switching" } },
                { "id": "b", "product": { "name": "Access Point" }, "line": { "id": "wireless", "name": "Wireless" } }
            ] }"#,
        ))
    }

    fn spawn(settle: Duration) -> QueryWorker {
        QueryWorker::spawn(
            catalog(),
            QueryState::new(),
            8,
            settle,
            CancellationToken::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn initial_view_is_available_immediately() {
        let worker = spawn(Duration::from_millis(50));
        let view = worker.current();
        assert_eq!(view.filtered.filtered_count(), 2);
        assert_eq!(view.suggestions.len(), 2);
        worker.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_view_for_submitted_state() {
        let worker = spawn(Duration::ZERO);
        let mut views = worker.subscribe();

        worker.submit(QueryState::new().with_search("switch"));
        let view = views.changed().await.unwrap();

        assert_eq!(view.state.search, "switch");
        assert_eq!(view.filtered.filtered_count(), 1);
        worker.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn coalesces_bursts_into_latest_state() {
        let worker = spawn(Duration::from_millis(50));
        let mut views = worker.subscribe();

        worker.submit(QueryState::new().with_search("s"));
        worker.submit(QueryState::new().with_search("sw"));
        worker.update(|state| state.search.push_str("itch"));
        worker.update(|state| state.view = ViewMode::Grid);

        let view = views.changed().await.unwrap();
        assert_eq!(view.state.search, "switch");
        assert_eq!(view.state.view, ViewMode::Grid);
        assert_eq!(view.filtered.filtered_count(), 1);

        // Nothing else is pending.
        let idle = tokio::time::timeout(Duration::from_millis(200), views.changed()).await;
        assert!(idle.is_err());
        worker.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stream_yields_current_view_then_updates() {
        use tokio_stream::StreamExt;

        let worker = spawn(Duration::ZERO);
        let mut stream = worker.subscribe().into_stream();

        let first = stream.next().await.unwrap();
        assert_eq!(first.filtered.filtered_count(), 2);

        worker.submit(QueryState::new().with_search("switch"));
        let next = stream.next().await.unwrap();
        assert_eq!(next.state.search, "switch");
        assert_eq!(next.filtered.filtered_count(), 1);

        drop(worker);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_cancel() {
        let cancel = CancellationToken::new();
        let worker = QueryWorker::spawn(
            catalog(),
            QueryState::new(),
            8,
            Duration::ZERO,
            cancel.clone(),
        );
        let mut views = worker.subscribe();

        cancel.cancel();
        tokio::time::sleep(Duration::from_millis(1)).await;
        worker.submit(QueryState::new().with_search("switch"));

        assert!(views.changed().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_handle_dropped() {
        let worker = spawn(Duration::ZERO);
        let mut views = worker.subscribe();
        drop(worker);
        assert!(views.changed().await.is_none());
    }
}
