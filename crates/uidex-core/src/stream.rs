// ── Query view streams ──
//
// Subscription type for consuming recomputed views from the query worker.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::query::QueryView;

/// A subscription to the query worker's output.
///
/// Await [`changed()`](Self::changed) for each recomputation, or convert
/// with [`into_stream()`](Self::into_stream) to also receive the view that
/// is current at subscription time.
pub struct ViewStream {
    receiver: watch::Receiver<Arc<QueryView>>,
}

impl ViewStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<QueryView>>) -> Self {
        Self { receiver }
    }

    /// Wait for the next recomputation. Returns `None` once the worker has
    /// stopped.
    pub async fn changed(&mut self) -> Option<Arc<QueryView>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn into_stream(self) -> ViewWatchStream {
        ViewWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding each published view, starting with the
/// current one.
pub struct ViewWatchStream {
    inner: WatchStream<Arc<QueryView>>,
}

impl Stream for ViewWatchStream {
    type Item = Arc<QueryView>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
