//! Trailing-edge debouncer built on a cancellable delayed task.
//!
//! [`Debouncer::schedule`] arms a timer that publishes its value once the
//! quiescence window elapses. Scheduling again before then aborts the
//! pending task, so a burst of values collapses into a single publication
//! of the last one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delays publication of a value until no newer value arrived for a full
/// window.
///
/// Publishes into a [`watch`] channel; values equal to the currently
/// published one are not re-published, so receivers only wake for real
/// changes. Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    sender: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a debouncer whose channel initially holds `initial`.
    #[must_use]
    pub fn new(window: Duration, initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            window,
            sender: Arc::new(sender),
            pending: None,
        }
    }

    /// Schedules `value` for publication, cancelling any pending one.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let sender = Arc::clone(&self.sender);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            sender.send_if_modified(|current| {
                if *current == value {
                    return false;
                }
                *current = value;
                true
            });
        }));
    }

    /// Drops the pending value, if any, without publishing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Returns `true` while a scheduled value has not been published yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Returns a clone of the last published value.
    #[must_use]
    pub fn current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Creates a receiver for future publications.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn burst_publishes_only_last_value() {
        let mut debouncer = Debouncer::new(WINDOW, String::new());
        let mut rx = debouncer.subscribe();

        for text in ["w", "wi", "wid", "widg", "widget"] {
            debouncer.schedule(text.to_string());
            tokio::time::advance(Duration::from_millis(50)).await;
        }
        assert!(!rx.has_changed().unwrap_or(true));

        let Ok(()) = rx.changed().await else {
            panic!("sender dropped");
        };
        assert_eq!(*rx.borrow_and_update(), "widget");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!rx.has_changed().unwrap_or(true));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_published_inside_window() {
        let mut debouncer = Debouncer::new(WINDOW, 0_u32);
        let rx = debouncer.subscribe();

        debouncer.schedule(1);
        assert!(debouncer.is_pending());
        tokio::time::advance(Duration::from_millis(299)).await;
        assert!(!rx.has_changed().unwrap_or(true));
        assert_eq!(debouncer.current(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(WINDOW, 0_u32);
        let rx = debouncer.subscribe();

        debouncer.schedule(7);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!rx.has_changed().unwrap_or(true));
    }

    #[tokio::test(start_paused = true)]
    async fn equal_value_is_not_republished() {
        let mut debouncer = Debouncer::new(WINDOW, 5_u32);
        let rx = debouncer.subscribe();

        debouncer.schedule(5);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!rx.has_changed().unwrap_or(true));
    }
}
