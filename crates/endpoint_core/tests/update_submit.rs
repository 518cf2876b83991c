use std::sync::Once;

use endpoint_core::{
    update, CycleOrigin, Effect, FieldState, Msg, ProbeFailure, ValidationOutcome,
};
use pretty_assertions::assert_eq;

const URL: &str = "https://server.example.com/metrics";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(endpoint_logging::initialize_for_tests);
}

fn typed(input: &str) -> FieldState {
    let (state, effects) = update(FieldState::new(), Msg::InputChanged(input.to_string()));
    assert!(effects.is_empty());
    state
}

fn submitted(input: &str) -> (FieldState, Vec<Effect>) {
    update(typed(input), Msg::SubmitClicked)
}

#[test]
fn typing_recomputes_suggestions_and_marks_dirty() {
    init_logging();
    let (mut state, effects) = update(
        FieldState::new(),
        Msg::InputChanged("https://server.example.com/met".to_string()),
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.suggestions, vec!["rics"]);
    assert!(view.suggestions_visible);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::AcceptTopSuggestion);
    assert_eq!(state.view().value, URL);
}

#[test]
fn dismissing_hides_without_clearing() {
    init_logging();
    let (state, _) = update(typed("https://"), Msg::SuggestionsDismissed);
    let view = state.view();
    assert!(!view.suggestions_visible);
    assert_eq!(view.suggestions.len(), 5);

    let (state, _) = update(state, Msg::SuggestionAccepted(1));
    assert_eq!(state.view().value, "https://metrics.");
}

#[test]
fn invalid_value_shows_inline_error_without_probe() {
    init_logging();
    let (state, effects) = submitted("server.example.com/metrics");

    assert!(effects.is_empty());
    assert!(!state.is_busy());
    let view = state.view();
    assert!(view.format_error.is_some());
    assert!(!view.loading);

    let (state, _) = update(state, Msg::InputChanged(URL.to_string()));
    assert_eq!(state.view().format_error, None);
}

#[test]
fn valid_value_starts_a_manual_check() {
    init_logging();
    let (state, effects) = submitted(URL);

    assert_eq!(
        effects,
        vec![Effect::CheckAvailability {
            cycle: 1,
            url: URL.to_string(),
            origin: CycleOrigin::Manual,
        }]
    );
    assert!(state.view().loading);
    assert!(!state.view().refreshing);
}

#[test]
fn accepted_check_submits_raw_value_and_clears_suggestions() {
    init_logging();
    let (state, _) = submitted("https://api.co");
    let (state, effects) = update(
        state,
        Msg::CheckCompleted {
            cycle: 1,
            outcome: ValidationOutcome::Accepted,
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Submit {
            url: "https://api.co".to_string()
        }]
    );
    let view = state.view();
    assert!(!view.loading);
    assert!(view.suggestions.is_empty());
    assert!(!view.suggestions_visible);
    assert_eq!(view.value, "https://api.co");
}

#[test]
fn rejected_check_notifies_and_keeps_value() {
    init_logging();
    let (state, _) = submitted(URL);
    let (state, effects) = update(
        state,
        Msg::CheckCompleted {
            cycle: 1,
            outcome: ValidationOutcome::Rejected(ProbeFailure::HttpStatus { status: 503 }),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::NotifyRejection {
            url: URL.to_string(),
            reason: "HEAD request failed (503)".to_string(),
        }]
    );
    assert_eq!(state.view().value, URL);
    assert!(!state.is_busy());

    // Immediate retry is allowed.
    let (_, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::CheckAvailability {
            cycle: 2,
            url: URL.to_string(),
            origin: CycleOrigin::Manual,
        }]
    );
}

#[test]
fn second_submit_while_busy_is_skipped() {
    init_logging();
    let (state, _) = submitted(URL);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.in_flight().map(|c| c.cycle), Some(1));
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = submitted(URL);
    let (state, effects) = update(
        state,
        Msg::CheckCompleted {
            cycle: 7,
            outcome: ValidationOutcome::Accepted,
        },
    );

    assert!(effects.is_empty());
    assert!(state.is_busy());
}

#[test]
fn completion_after_teardown_never_submits() {
    init_logging();
    let (state, _) = submitted(URL);
    let (state, effects) = update(state, Msg::TornDown);
    assert_eq!(effects, vec![Effect::CancelChecks]);

    let (state, effects) = update(
        state,
        Msg::CheckCompleted {
            cycle: 1,
            outcome: ValidationOutcome::Accepted,
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_torn_down());
}

#[test]
fn custom_table_drives_field_suggestions() {
    init_logging();
    const PROTOCOLS: &[&str] = &["https://"];
    const SUBDOMAINS: &[&str] = &["node."];
    const TLDS: &[&str] = &[".lan"];
    const PATHS: &[&str] = &["/vars"];
    let state = FieldState::new().with_suggestion_table(endpoint_core::UrlSuggestionTable {
        protocols: PROTOCOLS,
        subdomains: SUBDOMAINS,
        tlds: TLDS,
        paths: PATHS,
    });

    let (state, _) = update(state, Msg::InputChanged("https://n".to_string()));
    assert_eq!(state.view().suggestions, vec!["ode."]);
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(state.format_error(), None);
    assert_eq!(
        effects,
        vec![Effect::CheckAvailability {
            cycle: 1,
            url: "https://n".to_string(),
            origin: CycleOrigin::Manual,
        }]
    );
}
