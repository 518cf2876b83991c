use std::time::Duration;

use endpoint_core::TimerGeneration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A live recurring timer. Dropping it stops the task.
pub(crate) struct RefreshTimer {
    generation: TimerGeneration,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshTimer {
    /// First tick fires one full `period` after spawning.
    pub(crate) fn spawn<F>(
        runtime: &Handle,
        generation: TimerGeneration,
        period: Duration,
        on_tick: F,
    ) -> Self
    where
        F: Fn(TimerGeneration) -> bool + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let period = period.max(MIN_PERIOD);
        let task = runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if !on_tick(generation) {
                            break;
                        }
                    }
                }
            }
        });
        Self {
            generation,
            cancel,
            task,
        }
    }

    pub(crate) fn generation(&self) -> TimerGeneration {
        self.generation
    }

    pub(crate) fn cancel(self) {
        drop(self);
    }
}

impl Drop for RefreshTimer {
    // Both calls are idempotent, so a timer whose task already ended is fine.
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}
