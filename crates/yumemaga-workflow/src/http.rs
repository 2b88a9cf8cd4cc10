//! HTTP backend speaking the `{success, data|error}` envelope.
//!
//! Routes, relative to the base URL:
//!
//! - `GET  api/scopes/{scope}`
//! - `PUT  api/scopes/{scope}/units/{unit}/checklist/{item}` with `{"checked": bool}`
//! - `POST api/scopes/{scope}/units/{unit}/complete`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use yumemaga_models::{ChecklistItemId, Envelope, ScopeId, UnitId, UnitOfWork, Workflow};

use crate::backend::ProgressBackend;
use crate::error::{Result, WorkflowError};

/// Environment variable for the backend base URL.
pub const API_URL_ENV: &str = "YUMEMAGA_API_URL";

/// Base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8787";

/// Per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChecklistBody {
    checked: bool,
}

/// reqwest-based [`ProgressBackend`].
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    /// Creates a backend for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a backend with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(WorkflowError::Configuration(format!(
                "not a base url: {}",
                base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkflowError::Configuration(format!("http client: {}", e)))?;
        Ok(Self { client, base })
    }

    /// Creates a backend from `YUMEMAGA_API_URL`, falling back to the
    /// local default.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Joins percent-encoded path segments onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| WorkflowError::Configuration(format!("not a base url: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(%status, body = %body, "backend response");

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(WorkflowError::Transport(format!("unreadable response: {}", e)));
            }
            Err(_) => {
                return Err(WorkflowError::Transport(format!("HTTP {}", status)));
            }
        };

        envelope.into_result().map_err(|message| match status {
            StatusCode::NOT_FOUND => WorkflowError::NotFound(message),
            StatusCode::CONFLICT => WorkflowError::AlreadyCompleted(message),
            _ => WorkflowError::Rejected(message),
        })
    }
}

#[async_trait]
impl ProgressBackend for HttpBackend {
    async fn fetch(&self, scope: &ScopeId) -> Result<Workflow> {
        let url = self.endpoint(&["api", "scopes", scope.as_str()])?;
        debug!(%url, "fetching scope");

        self.send::<Workflow>(self.client.get(url))
            .await?
            .ok_or_else(|| WorkflowError::Transport("response carried no data".to_string()))
    }

    async fn set_checklist_item(
        &self,
        scope: &ScopeId,
        unit: &UnitId,
        item: &ChecklistItemId,
        checked: bool,
    ) -> Result<()> {
        let url = self.endpoint(&[
            "api",
            "scopes",
            scope.as_str(),
            "units",
            unit.as_str(),
            "checklist",
            item.as_str(),
        ])?;
        debug!(%url, checked, "writing checklist item");

        self.send::<serde_json::Value>(self.client.put(url).json(&ChecklistBody { checked }))
            .await?;
        Ok(())
    }

    async fn complete_unit(&self, scope: &ScopeId, unit: &UnitId) -> Result<UnitOfWork> {
        let url = self.endpoint(&[
            "api",
            "scopes",
            scope.as_str(),
            "units",
            unit.as_str(),
            "complete",
        ])?;
        debug!(%url, "completing unit");

        self.send::<UnitOfWork>(self.client.post(url))
            .await?
            .ok_or_else(|| WorkflowError::Transport("response carried no data".to_string()))
    }
}
