use crate::{is_valid_url, validate_url_format, CycleOrigin, Effect, FieldState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FieldState, msg: Msg) -> (FieldState, Vec<Effect>) {
    if state.is_torn_down() {
        return (state, Vec::new());
    }

    let tracked_before = state.refresh_dependencies();

    let mut effects = match msg {
        Msg::InputChanged(value) => {
            state.set_value(value);
            Vec::new()
        }
        Msg::SuggestionAccepted(index) => {
            state.accept_suggestion(index);
            Vec::new()
        }
        Msg::AcceptTopSuggestion => {
            state.accept_suggestion(0);
            Vec::new()
        }
        Msg::SuggestionsDismissed => {
            state.dismiss_suggestions();
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            let url = state.input().value.clone();
            match validate_url_format(&url) {
                Ok(_) => {
                    state.set_format_error(None);
                    let cycle = state.begin_cycle(url.clone(), CycleOrigin::Manual);
                    vec![Effect::CheckAvailability {
                        cycle,
                        url,
                        origin: CycleOrigin::Manual,
                    }]
                }
                Err(err) => {
                    state.set_format_error(Some(err));
                    Vec::new()
                }
            }
        }
        Msg::AutoRefreshChanged(enabled) => {
            state.set_auto_refresh(enabled);
            Vec::new()
        }
        Msg::RefreshTick { generation } => {
            // Ticks from cancelled timers and ticks that would overlap a
            // running cycle are dropped, never queued.
            if !state.refresh().accepts_tick(generation) || state.is_busy() {
                return (state, Vec::new());
            }
            let url = state.input().value.clone();
            if !is_valid_url(&url) {
                return (state, Vec::new());
            }
            let cycle = state.begin_cycle(url.clone(), CycleOrigin::Refresh);
            vec![Effect::CheckAvailability {
                cycle,
                url,
                origin: CycleOrigin::Refresh,
            }]
        }
        Msg::CheckCompleted { cycle, outcome } => match state.finish_cycle(cycle) {
            None => Vec::new(),
            Some(finished) => match outcome.reason() {
                None => {
                    if finished.origin == CycleOrigin::Manual {
                        state.clear_suggestions();
                    }
                    vec![Effect::Submit { url: finished.url }]
                }
                Some(reason) => vec![Effect::NotifyRejection {
                    url: finished.url,
                    reason,
                }],
            },
        },
        Msg::TornDown => {
            let had_cycle = state.is_busy();
            let mut effects: Vec<Effect> = state
                .refresh_mut()
                .terminate()
                .into_iter()
                .map(Effect::Timer)
                .collect();
            if had_cycle {
                effects.push(Effect::CancelChecks);
            }
            state.tear_down();
            return (state, effects);
        }
        Msg::NoOp => Vec::new(),
    };

    if state.refresh_dependencies() != tracked_before {
        let should_run = state.auto_refresh_enabled() && is_valid_url(&state.input().value);
        effects.extend(
            state
                .refresh_mut()
                .rearm(should_run)
                .into_iter()
                .map(Effect::Timer),
        );
    }

    (state, effects)
}
