use annodash_core::{update, AppState, Msg};

#[test]
fn confirm_without_pending_delete_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::DeleteConfirmed);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
