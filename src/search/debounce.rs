//! Cancellable delayed tasks and a single-slot debouncer.

use std::future::Future;

use tokio::{
    task::JoinHandle,
    time::{Duration, Instant},
};

/// Handle to a scheduled task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TaskHandle {
    inner: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub(crate) fn finished() -> Self {
        Self { inner: None }
    }

    /// Aborts the task if it has not completed.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.inner.take() {
            handle.abort();
        }
    }

    /// True once the task ran to completion or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs `task` once `delay` has elapsed from now, on the current tokio runtime.
pub fn schedule<F>(delay: Duration, task: F) -> TaskHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let deadline = Instant::now() + delay;
    let handle = tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        task.await;
    });
    TaskHandle {
        inner: Some(handle),
    }
}

/// Owns at most one pending [`TaskHandle`]; each schedule replaces the last.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: Option<TaskHandle>,
}

impl Debouncer {
    /// Creates a debouncer with a fixed quiet period.
    pub fn new(delay: Duration) -> Self {
        Self { delay, slot: None }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancels any pending task and schedules `task` after the quiet period.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.slot = Some(schedule(self.delay, task));
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(mut handle) = self.slot.take() {
            handle.cancel();
        }
    }

    /// True while a scheduled task has not yet finished.
    pub fn is_pending(&self) -> bool {
        self.slot.as_ref().is_some_and(|h| !h.is_finished())
    }
}
