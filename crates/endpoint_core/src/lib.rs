//! Endpoint core: suggestion lookup, URL format rule, and the pure field
//! state machine that drives availability checks and auto-refresh.
mod effect;
mod msg;
mod outcome;
mod refresh;
mod state;
mod suggest;
mod table;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{ProbeFailure, ValidationOutcome};
pub use refresh::{
    RefreshPhase, RefreshScheduler, TimerCommand, TimerGeneration, DEFAULT_REFRESH_PERIOD,
};
pub use state::{CycleId, CycleOrigin, FieldState, InFlightCycle};
pub use suggest::{InputState, SuggestionEngine, MAX_SUGGESTIONS};
pub use table::UrlSuggestionTable;
pub use update::update;
pub use validate::{is_valid_url, validate_url_format, FormatError};
pub use view_model::FieldViewModel;
