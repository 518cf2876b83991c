use crate::{CycleId, CycleOrigin, TimerCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe `url`; report back with `Msg::CheckCompleted { cycle, .. }`.
    CheckAvailability {
        cycle: CycleId,
        url: String,
        origin: CycleOrigin,
    },
    /// Hand the accepted URL to the host.
    Submit { url: String },
    /// Tell the user why `url` was rejected.
    NotifyRejection { url: String, reason: String },
    Timer(TimerCommand),
    /// Abort any check still running.
    CancelChecks,
}
