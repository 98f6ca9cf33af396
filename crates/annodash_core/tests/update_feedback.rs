use std::time::Duration;

use annodash_core::{
    update, AppState, BannerKind, BannerPhase, Feedback, Msg, BANNER_FADE, BANNER_VISIBLE,
};

fn tick(state: AppState, millis: u64) -> AppState {
    update(
        state,
        Msg::Tick {
            elapsed: Duration::from_millis(millis),
        },
    )
    .0
}

#[test]
fn error_feedback_renders_danger_banner() {
    let (state, effects) = update(
        AppState::new(),
        Msg::FeedbackReceived(Feedback::new("error", "bad input")),
    );
    assert!(effects.is_empty());

    let banner = state.view().banner.expect("banner");
    assert_eq!(banner.kind, BannerKind::Danger);
    assert_eq!(banner.message, "bad input");
    assert_eq!(banner.phase, BannerPhase::Visible);
}

#[test]
fn other_feedback_renders_info_banner_that_auto_hides() {
    let (state, _) = update(
        AppState::new(),
        Msg::FeedbackReceived(Feedback::new("ok", "done")),
    );
    let banner = state.view().banner.expect("banner");
    assert_eq!(banner.kind, BannerKind::Info);
    assert_eq!(banner.message, "done");

    let state = tick(state, 1500);
    assert_eq!(state.view().banner.unwrap().phase, BannerPhase::Visible);

    let state = tick(state, 600);
    assert_eq!(state.view().banner.unwrap().phase, BannerPhase::Fading);

    let state = tick(state, 500);
    assert!(state.view().banner.is_none());
}

#[test]
fn total_lifetime_matches_visible_plus_fade() {
    let (mut state, _) = update(
        AppState::new(),
        Msg::FeedbackReceived(Feedback::error("x")),
    );
    assert!(state.consume_dirty());

    let total = (BANNER_VISIBLE + BANNER_FADE).as_millis() as u64;
    let mut state = tick(state, total - 1);
    assert!(state.consume_dirty());
    assert!(state.view().banner.is_some());

    let mut state = tick(state, 1);
    assert!(state.consume_dirty());
    assert!(state.view().banner.is_none());
}

#[test]
fn dismiss_hides_immediately() {
    let (state, _) = update(
        AppState::new(),
        Msg::FeedbackReceived(Feedback::error("bad input")),
    );
    let (state, _) = update(state, Msg::BannerDismissed);
    assert!(state.view().banner.is_none());
}

#[test]
fn new_feedback_replaces_and_restarts_clock() {
    let (state, _) = update(
        AppState::new(),
        Msg::FeedbackReceived(Feedback::error("first")),
    );
    let state = tick(state, 2200);
    let (state, _) = update(state, Msg::FeedbackReceived(Feedback::new("ok", "second")));

    let banner = state.view().banner.expect("banner");
    assert_eq!(banner.message, "second");
    assert_eq!(banner.phase, BannerPhase::Visible);
}

#[test]
fn ticks_without_banner_do_not_dirty_state() {
    let mut state = tick(AppState::new(), 75);
    assert!(!state.consume_dirty());
}
