//! Annodash engine: backend client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{endpoints, ClientSettings, DashboardApi, ReqwestApiClient};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{
    AbstractLookup, AbstractRecord, ActionReceipt, ApiError, EngineEvent, FailureKind, Generation,
    UploadTaskRecord,
};
