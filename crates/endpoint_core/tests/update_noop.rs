use endpoint_core::{update, FieldState, Msg};

#[test]
fn update_is_noop() {
    let state = FieldState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn accepting_without_suggestions_is_noop() {
    let state = FieldState::new();
    let (next, effects) = update(state.clone(), Msg::AcceptTopSuggestion);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
