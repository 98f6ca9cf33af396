use std::sync::Once;

use annodash_core::{
    update, AbstractEntry, AbstractMatch, AppState, BannerKind, Effect, LookupOutcome, Msg,
    RequestFailure, SearchPanel,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(annodash_logging::initialize_for_tests);
}

fn submit(state: AppState, query: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::SearchInputChanged(query.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn found(row_uid: &str, external_id: &str) -> LookupOutcome {
    LookupOutcome::Found(AbstractMatch {
        row_uid: row_uid.to_string(),
        external_id: external_id.to_string(),
    })
}

#[test]
fn blank_queries_issue_no_request() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "");
    assert!(effects.is_empty());
    let (state, effects) = submit(state, "   ");
    assert!(effects.is_empty());
    assert!(!state.view().loading);
}

#[test]
fn query_is_sent_as_typed() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "abc");
    assert_eq!(
        effects,
        vec![Effect::LookupAbstract {
            generation: 1,
            query: "abc".to_string(),
        }]
    );
    assert!(state.view().loading);
}

#[test]
fn found_mapping_shows_found_panel_with_values() {
    init_logging();
    let (state, _) = submit(AppState::new(), "12345");
    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 1,
            result: Ok(found("1", "2")),
        },
    );

    let view = state.view();
    assert!(view.search.found_visible());
    assert!(!view.search.not_found_visible());
    assert_eq!(
        view.search.panel,
        SearchPanel::Found(AbstractMatch {
            row_uid: "1".to_string(),
            external_id: "2".to_string(),
        })
    );
    assert!(!view.loading);
}

#[test]
fn empty_mapping_shows_not_found_panel() {
    init_logging();
    let (state, _) = submit(AppState::new(), "12345");
    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 1,
            result: Ok(found("1", "2")),
        },
    );
    let (state, _) = submit(state, "99999");
    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 2,
            result: Ok(LookupOutcome::NotFound),
        },
    );

    let view = state.view();
    assert!(!view.search.found_visible());
    assert!(view.search.not_found_visible());
}

#[test]
fn failed_lookup_leaves_panels_unchanged() {
    init_logging();
    let (state, _) = submit(AppState::new(), "12345");
    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 1,
            result: Ok(found("1", "2")),
        },
    );
    let (state, _) = submit(state, "77");
    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 2,
            result: Err(RequestFailure::new("timeout")),
        },
    );

    let view = state.view();
    assert!(view.search.found_visible());
    assert_eq!(view.banner.map(|b| b.kind), Some(BannerKind::Danger));
}

#[test]
fn stale_lookup_does_not_overwrite_newer_answer() {
    init_logging();
    let (state, _) = submit(AppState::new(), "first");
    let (state, _) = submit(state, "second");
    assert_eq!(state.indicator().in_flight(), 2);

    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 2,
            result: Ok(LookupOutcome::NotFound),
        },
    );
    let (state, _) = update(
        state,
        Msg::AbstractLookedUp {
            generation: 1,
            result: Ok(found("1", "2")),
        },
    );

    let view = state.view();
    assert!(view.search.not_found_visible());
    assert!(!view.loading);
}

#[test]
fn catalog_is_fetched_and_listed() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CatalogRequested);
    assert_eq!(effects, vec![Effect::FetchAbstractCatalog]);

    let entry = AbstractEntry {
        row_data: "12345 Title".to_string(),
        uid: "ck1".to_string(),
        external_id: "ext-1".to_string(),
    };
    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            result: Ok(vec![entry.clone()]),
        },
    );

    let view = state.view();
    assert_eq!(view.search.catalog, Some(vec![entry]));
    assert!(!view.loading);
}
