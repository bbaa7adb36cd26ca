//! Cancellation signal for in-flight confirmation waits.
//!
//! The deadline is the loop's primary exit; the token lets callers abort
//! early when shutting down a service or abandoning a transaction that was
//! replaced. Built on a watch channel so one handle can fan out to any
//! number of waits.

use tokio::sync::watch;

/// Sender half of a cancellation pair.
///
/// Dropping the handle without calling [`cancel`](Self::cancel) never
/// cancels outstanding waits.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Fires the cancellation signal. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiver half of a cancellation pair, passed into
/// [`ConfirmationTracker::await_confirmation_with_cancel`](crate::ConfirmationTracker::await_confirmation_with_cancel).
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Creates a connected handle/token pair.
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx })
    }

    /// Returns true once the handle has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves when the handle fires; never resolves if the handle was
    /// dropped without firing.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // handle dropped without firing: stay pending forever
                std::future::pending::<()>().await;
            }
        }
    }
}
