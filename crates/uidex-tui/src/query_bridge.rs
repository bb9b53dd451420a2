//! Query bridge: forwards recomputed views from the query worker into the
//! TUI action channel.

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use uidex_core::ViewStream;

use crate::action::Action;

/// Send the current view, then every recomputation, until cancelled or the
/// worker stops.
pub async fn spawn_query_bridge(
    views: ViewStream,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut views = views.into_stream();

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            next = views.next() => {
                let Some(view) = next else { break };
                debug!(
                    matched = view.filtered.filtered_count(),
                    suggestions = view.suggestions.len(),
                    "dispatching ViewUpdated"
                );
                if action_tx.send(Action::ViewUpdated(view)).is_err() {
                    break;
                }
            }
        }
    }

    debug!("query bridge shut down");
}
