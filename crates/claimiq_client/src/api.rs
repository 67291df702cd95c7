use std::time::Duration;

use async_trait::async_trait;
use client_logging::client_warn;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::Value;

use crate::{Answer, ApiError, ApiFailure, UploadReceipt};

/// Backend base URL used when the environment supplies none.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Collection searched when the caller does not name one.
pub const DEFAULT_COLLECTION: &str = "pdf_collection";

/// Substituted for a missing `thinking` field in query responses.
pub const REASONING_FALLBACK: &str =
    "Analysis completed using vector similarity search and document retrieval.";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The three backend operations. They are independent: no shared mutable
/// state, no ordering requirement, and nothing is retried automatically.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadReceipt, ApiError>;
    async fn query(&self, text: &str, collection_name: &str) -> Result<Answer, ApiError>;
    async fn health(&self) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Compatibility shim for callers that still pass a file id. The query
    /// endpoint scopes by collection, not by file, so the id is ignored.
    #[deprecated(note = "use `query`; the file id is not part of the query contract")]
    pub async fn ask_question(&self, query: &str, _file_id: &str) -> Result<Answer, ApiError> {
        self.query(query, DEFAULT_COLLECTION).await
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file_id: String,
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    status: String,
    #[serde(default)]
    data: Value,
}

#[async_trait]
impl DocumentApi for HttpApiClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadReceipt, ApiError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = require_success(response)?;

        let body: UploadResponse = response.json().await.map_err(map_transport_error)?;
        Ok(UploadReceipt {
            file_id: body.file_id,
            file_name: file_name.to_string(),
        })
    }

    async fn query(&self, text: &str, collection_name: &str) -> Result<Answer, ApiError> {
        let response = self
            .http
            .post(format!("{}/query", self.base_url))
            .json(&serde_json::json!({
                "query": text,
                "collection_name": collection_name,
            }))
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = require_success(response)?;

        let envelope: QueryEnvelope = response.json().await.map_err(map_transport_error)?;
        if envelope.status != "success" {
            client_warn!("query rejected by server: status={}", envelope.status);
            return Err(ApiError::new(
                ApiFailure::ServerLogic,
                format!("query failed on server (status \"{}\")", envelope.status),
            ));
        }
        Ok(answer_from_data(envelope.data))
    }

    async fn health(&self) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = require_success(response)?;
        response.json().await.map_err(map_transport_error)
    }
}

/// A missing `data.response` falls back to the serialized `data` value, and
/// a missing `thinking` to the fixed fallback string.
fn answer_from_data(data: Value) -> Answer {
    let thinking = data
        .get("thinking")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(REASONING_FALLBACK)
        .to_string();
    let response = match data.get("response") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => match data {
            Value::String(text) => text,
            other => other.to_string(),
        },
    };
    Answer { response, thinking }
}

fn require_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        // Keep the full status line so the server's status text reaches the
        // user verbatim.
        client_warn!("request to {} failed: {}", response.url(), status);
        Err(ApiError::new(
            ApiFailure::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
