use std::time::Duration;

use annodash_logging::{dash_debug, dash_trace};
use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::types::{AbstractCatalogEnvelope, TaskListEnvelope};
use crate::{AbstractLookup, AbstractRecord, ActionReceipt, ApiError, FailureKind, UploadTaskRecord};

/// Backend routes, relative to the configured base URL.
pub mod endpoints {
    pub const TASK_LIST: &str = "upload-annotation-list";
    pub const UPDATE_STATUS: &str = "update-status";
    pub const DELETE: &str = "delete";
    pub const AVAILABLE_ABSTRACTS: &str = "available-abstracts";
}

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ClientSettings {
    /// Settings with defaults for everything but the base URL.
    ///
    /// The base URL is normalized to end with `/` so relative endpoints keep
    /// any path prefix.
    pub fn for_base_url(base_url: &str) -> Result<Self, ApiError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1:5000/").expect("static default url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The dashboard's view of the annotation backend.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<UploadTaskRecord>, ApiError>;

    async fn update_status(&self, id: &str) -> Result<ActionReceipt, ApiError>;

    async fn delete_task(&self, id: &str) -> Result<ActionReceipt, ApiError>;

    async fn lookup_abstract(&self, query: &str) -> Result<AbstractLookup, ApiError>;

    async fn list_abstracts(&self) -> Result<Vec<AbstractRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, route: &str) -> Result<Url, ApiError> {
        self.settings
            .base_url
            .join(route)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn endpoint_with_id(&self, route: &str, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(route)?;
        url.query_pairs_mut().append_pair("id", id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        dash_debug!("GET {}", url);
        let request = self.client.get(url);
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }
        dash_trace!("Received {} bytes", body.len());

        // The backend serializes with `json.dumps`; the declared content type is not checked.
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    fn too_large(&self, actual: Option<u64>) -> ApiError {
        ApiError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl DashboardApi for ReqwestApiClient {
    async fn list_tasks(&self) -> Result<Vec<UploadTaskRecord>, ApiError> {
        let url = self.endpoint(endpoints::TASK_LIST)?;
        let envelope: TaskListEnvelope = self.get_json(url).await?;
        if let Some(message) = envelope.message {
            let status = envelope.status.unwrap_or_default();
            return Err(ApiError::new(
                FailureKind::Backend,
                format!("{status}: {message}"),
            ));
        }
        Ok(envelope.data)
    }

    async fn update_status(&self, id: &str) -> Result<ActionReceipt, ApiError> {
        let url = self.endpoint_with_id(endpoints::UPDATE_STATUS, id)?;
        self.get_json(url).await
    }

    async fn delete_task(&self, id: &str) -> Result<ActionReceipt, ApiError> {
        let url = self.endpoint_with_id(endpoints::DELETE, id)?;
        self.get_json(url).await
    }

    async fn lookup_abstract(&self, query: &str) -> Result<AbstractLookup, ApiError> {
        let url = self.endpoint(endpoints::AVAILABLE_ABSTRACTS)?;
        dash_debug!("POST {}", url);
        let body = serde_json::to_vec(&serde_json::json!({ "row_data": query }))
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .body(body);
        let mapping: Map<String, Value> = self.send_json(request).await?;
        AbstractLookup::from_mapping(&mapping)
    }

    async fn list_abstracts(&self) -> Result<Vec<AbstractRecord>, ApiError> {
        let url = self.endpoint(endpoints::AVAILABLE_ABSTRACTS)?;
        let envelope: AbstractCatalogEnvelope = self.get_json(url).await?;
        Ok(envelope.data)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
