use std::sync::{mpsc, Arc};

use annodash_core::{
    AbstractEntry, AbstractMatch, Effect, Feedback, LookupOutcome, Msg, RequestFailure, TaskStatus,
    UploadTask,
};
use annodash_engine::{
    AbstractLookup, AbstractRecord, ActionReceipt, ApiError, ClientSettings, EngineEvent,
    EngineHandle, EventSink, UploadTaskRecord,
};
use annodash_logging::{dash_info, dash_warn};

use super::app::AppEvent;

/// Executes the effects returned by `update`.
pub trait EffectExecutor {
    fn run(&self, effects: Vec<Effect>);
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// Completions are delivered to `events` as `AppEvent::Msg`.
    pub fn new(settings: ClientSettings, events: mpsc::Sender<AppEvent>) -> Result<Self, ApiError> {
        dash_info!("Backend base url {}", settings.base_url);
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { tx: events }))?;
        Ok(Self { engine })
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

impl EffectExecutor for EffectRunner {
    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadTasks { generation } => {
                    dash_info!("LoadTasks generation={}", generation);
                    self.engine.load_tasks(generation);
                }
                Effect::UpdateStatus { id } => {
                    dash_info!("UpdateStatus id={}", id);
                    self.engine.update_status(id);
                }
                Effect::DeleteTask { id } => {
                    dash_info!("DeleteTask id={}", id);
                    self.engine.delete_task(id);
                }
                Effect::LookupAbstract { generation, query } => {
                    dash_info!(
                        "LookupAbstract generation={} query_len={}",
                        generation,
                        query.len()
                    );
                    self.engine.lookup_abstract(generation, query);
                }
                Effect::FetchAbstractCatalog => {
                    dash_info!("FetchAbstractCatalog");
                    self.engine.list_abstracts();
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TasksLoaded { generation, result } => Msg::TasksLoaded {
            generation,
            result: result
                .map(|records| records.into_iter().map(map_task).collect())
                .map_err(map_failure),
        },
        EngineEvent::StatusUpdated { id, result } => Msg::StatusUpdated {
            id,
            result: result.map(receipt_feedback).map_err(map_failure),
        },
        EngineEvent::TaskDeleted { id, result } => Msg::TaskDeleted {
            id,
            result: result.map(receipt_feedback).map_err(map_failure),
        },
        EngineEvent::AbstractLookedUp { generation, result } => Msg::AbstractLookedUp {
            generation,
            result: result.map(map_lookup).map_err(map_failure),
        },
        EngineEvent::CatalogLoaded { result } => Msg::CatalogLoaded {
            result: result
                .map(|records| records.into_iter().map(map_catalog_entry).collect())
                .map_err(map_failure),
        },
    }
}

fn map_task(record: UploadTaskRecord) -> UploadTask {
    UploadTask {
        status: TaskStatus::from_label(&record.status),
        id: record.id,
        project: record.project,
        date: record.date,
        submitted_by: record.submitted_by,
        description: record.description,
        task_id: record.task_id,
        upload_name: record.upload_name,
    }
}

/// Only receipts carrying a message produce a banner.
fn receipt_feedback(receipt: ActionReceipt) -> Option<Feedback> {
    let message = receipt.message?;
    let status = receipt.status.unwrap_or_else(|| "error".to_string());
    Some(Feedback::new(status, message))
}

fn map_lookup(lookup: AbstractLookup) -> LookupOutcome {
    match lookup {
        AbstractLookup::Found {
            row_uid,
            external_id,
        } => LookupOutcome::Found(AbstractMatch {
            row_uid,
            external_id,
        }),
        AbstractLookup::NotFound => LookupOutcome::NotFound,
    }
}

fn map_catalog_entry(record: AbstractRecord) -> AbstractEntry {
    AbstractEntry {
        row_data: record.row_data,
        uid: record.uid,
        external_id: record.external_id,
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    dash_warn!("Request failed: {}", err);
    RequestFailure::new(err.to_string())
}
