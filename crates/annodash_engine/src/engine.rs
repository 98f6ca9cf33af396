use std::sync::{mpsc, Arc};
use std::thread;

use annodash_logging::{dash_debug, dash_info, dash_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, DashboardApi, ReqwestApiClient};
use crate::{ApiError, EngineEvent, FailureKind, Generation};

/// Receives engine completions. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineCommand {
    LoadTasks { generation: Generation },
    UpdateStatus { id: String },
    DeleteTask { id: String },
    LookupAbstract { generation: Generation, query: String },
    ListAbstracts,
}

/// Runs backend requests on a dedicated tokio runtime thread.
///
/// Every submitted command produces exactly one `EngineEvent`, including
/// commands cut short by `shutdown`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestApiClient::new(settings)?);
        Self::with_api(api, sink)
    }

    pub fn with_api(api: Arc<dyn DashboardApi>, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let sink = sink.clone();
                let cancel = loop_cancel.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, sink.as_ref(), &cancel).await;
                });
            }
            dash_info!("Engine command channel closed; shutting down runtime");
            runtime.shutdown_background();
        });

        Ok(Self { cmd_tx, cancel })
    }

    pub fn load_tasks(&self, generation: Generation) {
        self.submit(EngineCommand::LoadTasks { generation });
    }

    pub fn update_status(&self, id: impl Into<String>) {
        self.submit(EngineCommand::UpdateStatus { id: id.into() });
    }

    pub fn delete_task(&self, id: impl Into<String>) {
        self.submit(EngineCommand::DeleteTask { id: id.into() });
    }

    pub fn lookup_abstract(&self, generation: Generation, query: impl Into<String>) {
        self.submit(EngineCommand::LookupAbstract {
            generation,
            query: query.into(),
        });
    }

    pub fn list_abstracts(&self) {
        self.submit(EngineCommand::ListAbstracts);
    }

    /// Cancels in-flight and future requests; each reports `Cancelled`.
    pub fn shutdown(&self) {
        dash_info!("Engine shutdown requested");
        self.cancel.cancel();
    }

    fn submit(&self, command: EngineCommand) {
        dash_debug!("Submitting {:?}", command);
        if self.cmd_tx.send(command).is_err() {
            dash_warn!("Engine thread is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(
    api: &dyn DashboardApi,
    command: EngineCommand,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) {
    let event = match command {
        EngineCommand::LoadTasks { generation } => EngineEvent::TasksLoaded {
            generation,
            result: cancellable(cancel, api.list_tasks()).await,
        },
        EngineCommand::UpdateStatus { id } => {
            let result = cancellable(cancel, api.update_status(&id)).await;
            EngineEvent::StatusUpdated { id, result }
        }
        EngineCommand::DeleteTask { id } => {
            let result = cancellable(cancel, api.delete_task(&id)).await;
            EngineEvent::TaskDeleted { id, result }
        }
        EngineCommand::LookupAbstract { generation, query } => EngineEvent::AbstractLookedUp {
            generation,
            result: cancellable(cancel, api.lookup_abstract(&query)).await,
        },
        EngineCommand::ListAbstracts => EngineEvent::CatalogLoaded {
            result: cancellable(cancel, api.list_abstracts()).await,
        },
    };
    sink.emit(event);
}

async fn cancellable<T>(
    cancel: &CancellationToken,
    request: impl std::future::Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ApiError::new(FailureKind::Cancelled, "engine shut down")),
        result = request => result,
    }
}
