use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Monotonic counter the core attaches to loads and lookups.
pub type Generation = u64;

/// One row of `GET /upload-annotation-list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadTaskRecord {
    pub id: String,
    pub project: String,
    pub date: String,
    pub submitted_by: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default = "missing_task_id", deserialize_with = "lenient_string")]
    pub task_id: String,
    pub upload_name: String,
    pub status: String,
}

fn missing_task_id() -> String {
    "---".to_string()
}

/// Envelope around the task list; a present `message` signals a backend error.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TaskListEnvelope {
    #[serde(default)]
    pub data: Vec<UploadTaskRecord>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the update-status and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ActionReceipt {
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer of `POST /available-abstracts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractLookup {
    Found { row_uid: String, external_id: String },
    NotFound,
}

impl AbstractLookup {
    /// Presence is decided by key count alone; a non-empty mapping must
    /// carry both `row_uid` and `external_id`.
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self, ApiError> {
        if mapping.is_empty() {
            return Ok(AbstractLookup::NotFound);
        }
        let field = |name: &str| {
            mapping.get(name).map(value_to_string).ok_or_else(|| {
                ApiError::new(FailureKind::Decode, format!("lookup response missing `{name}`"))
            })
        };
        Ok(AbstractLookup::Found {
            row_uid: field("row_uid")?,
            external_id: field("external_id")?,
        })
    }
}

/// One row of `GET /available-abstracts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbstractRecord {
    pub row_data: String,
    #[serde(deserialize_with = "lenient_string")]
    pub uid: String,
    #[serde(deserialize_with = "lenient_string")]
    pub external_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AbstractCatalogEnvelope {
    #[serde(default)]
    pub data: Vec<AbstractRecord>,
}

/// Completion report for one engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TasksLoaded {
        generation: Generation,
        result: Result<Vec<UploadTaskRecord>, ApiError>,
    },
    StatusUpdated {
        id: String,
        result: Result<ActionReceipt, ApiError>,
    },
    TaskDeleted {
        id: String,
        result: Result<ActionReceipt, ApiError>,
    },
    AbstractLookedUp {
        generation: Generation,
        result: Result<AbstractLookup, ApiError>,
    },
    CatalogLoaded {
        result: Result<Vec<AbstractRecord>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    /// The backend answered but reported an error of its own.
    Backend,
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Backend => write!(f, "backend error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// The backend stores some ids as numbers (e.g. `task_id: 0` before an
// import request exists).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value_to_string(&value))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| value_to_string(&v)))
}
