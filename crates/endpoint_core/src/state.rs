use std::time::Duration;

use crate::view_model::FieldViewModel;
use crate::{
    FormatError, InputState, RefreshPhase, RefreshScheduler, SuggestionEngine, UrlSuggestionTable,
};

pub type CycleId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOrigin {
    Manual,
    Refresh,
}

/// The single validate/submit cycle allowed to run at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightCycle {
    pub cycle: CycleId,
    pub url: String,
    pub origin: CycleOrigin,
}

/// Values whose change forces the refresh timer to be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RefreshDependencies {
    value: String,
    auto_refresh: bool,
    busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    input: InputState,
    engine: SuggestionEngine,
    format_error: Option<FormatError>,
    in_flight: Option<InFlightCycle>,
    last_cycle: CycleId,
    auto_refresh: bool,
    refresh: RefreshScheduler,
    torn_down: bool,
    dirty: bool,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refresh_period(mut self, period: Duration) -> Self {
        self.refresh = RefreshScheduler::new(period);
        self
    }

    pub fn with_suggestion_table(mut self, table: UrlSuggestionTable) -> Self {
        self.engine = SuggestionEngine::new(table);
        self
    }

    pub fn view(&self) -> FieldViewModel {
        let origin = self.in_flight.as_ref().map(|cycle| cycle.origin);
        FieldViewModel {
            value: self.input.value.clone(),
            suggestions: self.input.suggestions.clone(),
            suggestions_visible: self.input.suggestions_visible,
            format_error: self.format_error.as_ref().map(ToString::to_string),
            loading: origin == Some(CycleOrigin::Manual),
            refreshing: origin == Some(CycleOrigin::Refresh),
            auto_refresh: self.auto_refresh,
            refresh_armed: self.refresh.is_armed(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn format_error(&self) -> Option<&FormatError> {
        self.format_error.as_ref()
    }

    pub fn in_flight(&self) -> Option<&InFlightCycle> {
        self.in_flight.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh
    }

    pub fn refresh(&self) -> &RefreshScheduler {
        &self.refresh
    }

    pub fn refresh_phase(&self) -> RefreshPhase {
        self.refresh.phase()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub(crate) fn set_value(&mut self, value: String) {
        if self.input.value == value {
            return;
        }
        self.input.value = value;
        self.engine.refresh(&mut self.input);
        self.format_error = None;
        self.dirty = true;
    }

    pub(crate) fn accept_suggestion(&mut self, index: usize) {
        if self.engine.accept(&mut self.input, index) {
            self.format_error = None;
            self.dirty = true;
        }
    }

    pub(crate) fn dismiss_suggestions(&mut self) {
        if self.input.suggestions_visible {
            self.input.suggestions_visible = false;
            self.dirty = true;
        }
    }

    pub(crate) fn clear_suggestions(&mut self) {
        self.input.clear_suggestions();
        self.dirty = true;
    }

    pub(crate) fn set_format_error(&mut self, error: Option<FormatError>) {
        if self.format_error != error {
            self.format_error = error;
            self.dirty = true;
        }
    }

    pub(crate) fn set_auto_refresh(&mut self, enabled: bool) {
        if self.auto_refresh != enabled {
            self.auto_refresh = enabled;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_cycle(&mut self, url: String, origin: CycleOrigin) -> CycleId {
        self.last_cycle += 1;
        let cycle = self.last_cycle;
        self.in_flight = Some(InFlightCycle { cycle, url, origin });
        self.dirty = true;
        cycle
    }

    /// Closes the in-flight cycle if `cycle` is the one running.
    pub(crate) fn finish_cycle(&mut self, cycle: CycleId) -> Option<InFlightCycle> {
        if self.in_flight.as_ref().map(|running| running.cycle) != Some(cycle) {
            return None;
        }
        self.dirty = true;
        self.in_flight.take()
    }

    pub(crate) fn refresh_mut(&mut self) -> &mut RefreshScheduler {
        &mut self.refresh
    }

    pub(crate) fn refresh_dependencies(&self) -> RefreshDependencies {
        RefreshDependencies {
            value: self.input.value.clone(),
            auto_refresh: self.auto_refresh,
            busy: self.is_busy(),
        }
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
        self.in_flight = None;
        self.dirty = true;
    }
}
