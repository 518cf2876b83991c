//! Arm/disarm state machine for the recurring re-validation timer.
//!
//! The scheduler never touches a clock. It decides when a timer should
//! exist and hands out generations; the runtime owns the actual timer and
//! tags every tick with the generation it was armed with.

use std::time::Duration;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(10_000);

pub type TimerGeneration = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    #[default]
    Disabled,
    Armed {
        generation: TimerGeneration,
    },
    /// Owner was torn down; no timer may ever be armed again.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Arm {
        generation: TimerGeneration,
        period: Duration,
    },
    Cancel {
        generation: TimerGeneration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshScheduler {
    phase: RefreshPhase,
    period: Duration,
    last_generation: TimerGeneration,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_PERIOD)
    }
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            phase: RefreshPhase::Disabled,
            period,
            last_generation: 0,
        }
    }

    pub fn phase(&self) -> RefreshPhase {
        self.phase
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, RefreshPhase::Armed { .. })
    }

    /// Tears down any live timer and arms a fresh one when `should_run`.
    ///
    /// An existing timer is never reused, even when it would stay armed.
    pub fn rearm(&mut self, should_run: bool) -> Vec<TimerCommand> {
        if self.phase == RefreshPhase::Terminated {
            return Vec::new();
        }
        let mut commands = self.disarm();
        if should_run {
            self.last_generation += 1;
            let generation = self.last_generation;
            self.phase = RefreshPhase::Armed { generation };
            commands.push(TimerCommand::Arm {
                generation,
                period: self.period,
            });
        }
        commands
    }

    /// Cancels the live timer, if any, and returns to `Disabled`.
    pub fn disarm(&mut self) -> Vec<TimerCommand> {
        match self.phase {
            RefreshPhase::Armed { generation } => {
                self.phase = RefreshPhase::Disabled;
                vec![TimerCommand::Cancel { generation }]
            }
            RefreshPhase::Disabled | RefreshPhase::Terminated => Vec::new(),
        }
    }

    /// Final transition; every later call is inert.
    pub fn terminate(&mut self) -> Vec<TimerCommand> {
        let commands = self.disarm();
        self.phase = RefreshPhase::Terminated;
        commands
    }

    /// Whether a tick tagged with `generation` comes from the live timer.
    pub fn accepts_tick(&self, generation: TimerGeneration) -> bool {
        self.phase == RefreshPhase::Armed { generation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_cancels_before_arming_new_generation() {
        let mut scheduler = RefreshScheduler::default();
        assert_eq!(
            scheduler.rearm(true),
            vec![TimerCommand::Arm {
                generation: 1,
                period: DEFAULT_REFRESH_PERIOD
            }]
        );
        assert_eq!(
            scheduler.rearm(true),
            vec![
                TimerCommand::Cancel { generation: 1 },
                TimerCommand::Arm {
                    generation: 2,
                    period: DEFAULT_REFRESH_PERIOD
                },
            ]
        );
        assert!(!scheduler.accepts_tick(1));
        assert!(scheduler.accepts_tick(2));
    }

    #[test]
    fn rearm_without_conditions_only_disarms() {
        let mut scheduler = RefreshScheduler::default();
        scheduler.rearm(true);
        assert_eq!(
            scheduler.rearm(false),
            vec![TimerCommand::Cancel { generation: 1 }]
        );
        assert_eq!(scheduler.phase(), RefreshPhase::Disabled);
        assert!(scheduler.rearm(false).is_empty());
    }

    #[test]
    fn terminated_scheduler_never_rearms() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(50));
        scheduler.rearm(true);
        assert_eq!(
            scheduler.terminate(),
            vec![TimerCommand::Cancel { generation: 1 }]
        );
        assert!(scheduler.rearm(true).is_empty());
        assert!(scheduler.terminate().is_empty());
        assert!(!scheduler.accepts_tick(1));
    }
}
