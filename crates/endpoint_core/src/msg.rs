use crate::{CycleId, TimerGeneration, ValidationOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL field.
    InputChanged(String),
    /// User picked the suggestion at this index.
    SuggestionAccepted(usize),
    /// User asked for the first suggestion (e.g. Tab).
    AcceptTopSuggestion,
    /// Suggestion list lost focus or was escaped.
    SuggestionsDismissed,
    /// User submitted the field.
    SubmitClicked,
    /// Current value of the host-owned auto-refresh toggle.
    AutoRefreshChanged(bool),
    /// The refresh timer armed with `generation` fired.
    RefreshTick { generation: TimerGeneration },
    /// An availability check finished.
    CheckCompleted {
        cycle: CycleId,
        outcome: ValidationOutcome,
    },
    /// Owning component is going away.
    TornDown,
    /// Fallback for placeholder wiring.
    NoOp,
}
