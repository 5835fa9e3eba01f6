//! Cooperative cancellation for transpile runs.
//!
//! A [`Canceller`] is held by whoever may stop the run (the binary's signal
//! handler); the paired [`CancelSignal`] is checked by the orchestrator
//! between units. A unit already being written is never interrupted.

use std::fmt;

use tokio::sync::watch;

/// Why a run was stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// An OS signal such as SIGINT or SIGTERM.
    Signal(String),
    /// Requested programmatically.
    Requested(String),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(name) => write!(f, "received {}", name),
            Self::Requested(msg) => f.write_str(msg),
        }
    }
}

/// Create a connected canceller and signal.
pub fn channel() -> (Canceller, CancelSignal) {
    let (tx, rx) = watch::channel(None);
    (Canceller { tx }, CancelSignal { rx })
}

/// Requests cancellation. Only the first reason is kept.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<Option<CancelReason>>,
}

impl Canceller {
    pub fn cancel(&self, reason: CancelReason) {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }
}

/// Read side of a cancellation channel.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<Option<CancelReason>>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(None);
        // Dropping the sender keeps the value at `None` forever.
        drop(tx);
        Self { rx }
    }

    /// The cancellation reason, if cancellation has been requested.
    pub fn reason(&self) -> Option<CancelReason> {
        self.rx.borrow().clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait until cancellation is requested.
    ///
    /// Never resolves if the canceller is dropped without cancelling.
    pub async fn cancelled(&mut self) -> CancelReason {
        loop {
            if let Some(reason) = self.rx.borrow_and_update().clone() {
                return reason;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_cancelled_initially() {
        let (_canceller, signal) = channel();
        assert!(!signal.is_cancelled());
        assert_eq!(signal.reason(), None);
    }

    #[test]
    fn test_first_reason_wins() {
        let (canceller, signal) = channel();
        canceller.cancel(CancelReason::Requested("first".into()));
        canceller.cancel(CancelReason::Signal("SIGTERM".into()));
        assert_eq!(signal.reason(), Some(CancelReason::Requested("first".into())));
    }

    #[test]
    fn test_never_stays_clear() {
        assert!(!CancelSignal::never().is_cancelled());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            CancelReason::Signal("SIGINT".into()).to_string(),
            "received SIGINT"
        );
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let (canceller, mut signal) = channel();
        let waiter = tokio::spawn(async move { signal.cancelled().await });
        canceller.cancel(CancelReason::Signal("SIGINT".into()));
        let reason = waiter.await.expect("waiter panicked");
        assert_eq!(reason, CancelReason::Signal("SIGINT".into()));
    }
}
