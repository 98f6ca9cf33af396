use annodash_logging::{dash_debug, dash_warn};

use crate::{AppState, Effect, Feedback, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every request effect returned here is counted by the request indicator,
/// and every engine completion message releases one count.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started | Msg::ReloadClicked => vec![load(&mut state)],
        Msg::TasksLoaded { generation, result } => {
            state.request_finished();
            match result {
                Ok(tasks) => state.apply_tasks(generation, tasks),
                Err(failure) => {
                    dash_warn!("Task list load failed: {}", failure);
                    state.apply_load_failure(generation, failure.message);
                }
            }
            Vec::new()
        }
        Msg::UpdateClicked { id } => {
            if !state.is_running_task(&id) {
                dash_debug!("Ignoring update for non-running or unknown task {}", id);
                return (state, Vec::new());
            }
            vec![request(&mut state, Effect::UpdateStatus { id })]
        }
        Msg::StatusUpdated { id, result } | Msg::TaskDeleted { id, result } => {
            state.request_finished();
            match result {
                Ok(feedback) => {
                    if let Some(feedback) = feedback {
                        state.show_feedback(feedback);
                    }
                    vec![load(&mut state)]
                }
                Err(failure) => {
                    dash_warn!("Action on task {} failed: {}", id, failure);
                    state.show_feedback(Feedback::error(failure.message));
                    Vec::new()
                }
            }
        }
        Msg::DeleteClicked { id } => {
            if state.is_deletable_task(&id) {
                state.set_pending_delete(Some(id));
            } else {
                dash_debug!("Ignoring delete for task {}", id);
            }
            Vec::new()
        }
        Msg::DeleteConfirmed => match state.take_pending_delete() {
            Some(id) if state.is_deletable_task(&id) => {
                vec![request(&mut state, Effect::DeleteTask { id })]
            }
            Some(id) => {
                dash_debug!("Task {} is no longer deletable; confirmation dropped", id);
                Vec::new()
            }
            None => Vec::new(),
        },
        Msg::DeleteCancelled => {
            state.set_pending_delete(None);
            Vec::new()
        }
        Msg::NextPage => {
            state.next_page();
            Vec::new()
        }
        Msg::PreviousPage => {
            state.previous_page();
            Vec::new()
        }
        Msg::SearchInputChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::SearchSubmitted => match state.begin_lookup() {
            Some((generation, query)) => vec![request(
                &mut state,
                Effect::LookupAbstract { generation, query },
            )],
            None => Vec::new(),
        },
        Msg::AbstractLookedUp { generation, result } => {
            state.request_finished();
            match result {
                Ok(outcome) => state.apply_lookup(generation, outcome),
                Err(failure) => {
                    dash_warn!("Abstract lookup failed: {}", failure);
                    if state.is_current_lookup(generation) {
                        state.show_feedback(Feedback::error(failure.message));
                    }
                }
            }
            Vec::new()
        }
        Msg::CatalogRequested => vec![request(&mut state, Effect::FetchAbstractCatalog)],
        Msg::CatalogLoaded { result } => {
            state.request_finished();
            match result {
                Ok(entries) => state.set_catalog(entries),
                Err(failure) => {
                    dash_warn!("Abstract catalog load failed: {}", failure);
                    state.show_feedback(Feedback::error(failure.message));
                }
            }
            Vec::new()
        }
        Msg::FeedbackReceived(feedback) => {
            state.show_feedback(feedback);
            Vec::new()
        }
        Msg::BannerDismissed => {
            state.dismiss_banner();
            Vec::new()
        }
        Msg::Tick { elapsed } => {
            state.advance_clock(elapsed);
            Vec::new()
        }
    };

    (state, effects)
}

fn load(state: &mut AppState) -> Effect {
    let generation = state.begin_load();
    request(state, Effect::LoadTasks { generation })
}

fn request(state: &mut AppState, effect: Effect) -> Effect {
    state.request_started();
    effect
}
