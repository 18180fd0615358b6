//! Cancelable delayed task.
//!
//! Arming schedules an action after a delay on the ambient tokio runtime.
//! Re-arming or cancelling supersedes the pending action. Every arm gets a
//! fresh generation number which is handed to the action, so an action that
//! races with a cancel can check [`DelayedTask::is_current`] under the same
//! lock the canceller holds and back off.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct DelayedTask {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending action and schedule `action` after `delay`.
    ///
    /// Returns the generation of the new arm, or `None` when there is no
    /// tokio runtime to run the timer on (nothing is scheduled then).
    pub fn arm<F>(&mut self, delay: Duration, action: F) -> Option<u64>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();

        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("No tokio runtime; delayed task not armed");
            return None;
        };

        let generation = self.generation;
        self.handle = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action(generation);
        }));
        Some(generation)
    }

    /// Abort the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `generation` is the live, not yet settled arm.
    pub fn is_current(&self, generation: u64) -> bool {
        self.handle.is_some() && self.generation == generation
    }

    /// Mark the live arm as done without aborting it.
    ///
    /// Called by the action itself once it has decided to run.
    pub fn settle(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.handle = None;
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Whether an action is scheduled and not yet settled or cancelled.
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const DELAY: Duration = Duration::from_millis(150);

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
        let count = Arc::new(AtomicUsize::new(0));
        let read = {
            let count = Arc::clone(&count);
            move || count.load(Ordering::SeqCst)
        };
        (count, read)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (count, fired) = counter();
        let mut task = DelayedTask::new();
        task.arm(DELAY, move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        assert!(task.is_armed());

        tokio::time::sleep(Duration::from_millis(149)).await;
        assert_eq!(fired(), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_supersedes_previous() {
        let (count, fired) = counter();
        let mut task = DelayedTask::new();
        for _ in 0..3 {
            let count = Arc::clone(&count);
            task.arm(DELAY, move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(fired(), 0, "each re-arm restarts the delay");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_action() {
        let (count, fired) = counter();
        let mut task = DelayedTask::new();
        task.arm(DELAY, move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        task.cancel();
        assert!(!task.is_armed());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(fired(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn generation_check_rejects_stale_arm() {
        let task = Arc::new(Mutex::new(DelayedTask::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let generation = {
            let task_for_action = Arc::clone(&task);
            let seen = Arc::clone(&seen);
            task.lock().arm(DELAY, move |generation| {
                let mut task = task_for_action.lock();
                seen.lock().push(task.is_current(generation));
                task.settle(generation);
            })
        }
        .unwrap();

        assert!(task.lock().is_current(generation));
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(*seen.lock(), vec![true]);
        assert!(!task.lock().is_current(generation));
    }

    #[test]
    fn arm_without_runtime_is_a_no_op() {
        let mut task = DelayedTask::new();
        assert_eq!(task.arm(DELAY, |_| {}), None);
        assert!(!task.is_armed());
    }
}
