use claimiq_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::default();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
