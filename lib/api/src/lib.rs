use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use snafu::ResultExt;
use url::Url;

use models::error::{DecodeSnafu, HttpSnafu};
use models::*;

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// REST surface of the processing server.
#[async_trait]
pub trait Api: Send + Sync {
    /// An empty `path` lets the server pick (its last browsed directory).
    async fn browse(&self, path: &str) -> Result<Listing, ClientError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;
    async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError>;
    async fn create_batch(&self, batch: &BatchRequest) -> Result<BatchCreated, ClientError>;
    async fn delete_task(&self, id: i64) -> Result<(), ClientError>;
    /// Streaming URL of a server-side media file.
    fn file_url(&self, path: &str) -> String;
}

pub struct HttpApi {
    base: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(server_url: &Url) -> Self {
        HttpApi {
            base: server_url.as_str().trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn read<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await.context(HttpSnafu { url })?;
        if !status.is_success() {
            return Err(server_error(status, &body));
        }
        serde_json::from_slice(&body).context(DecodeSnafu { url })
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn browse(&self, path: &str) -> Result<Listing, ClientError> {
        let url = self.endpoint("/api/browse");
        tracing::debug!(path, "browse");
        let response = self
            .client
            .get(&url)
            .query(&[("path", path)])
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        Self::read(&url, response).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let url = self.endpoint("/api/tasks");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        let tasks: Option<Vec<Task>> = Self::read(&url, response).await?;
        Ok(tasks.unwrap_or_default())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let url = self.endpoint("/api/tasks");
        tracing::info!(input = %task.input_path, output = %task.output_path, kind = %task.kind, "creating task");
        let response = self
            .client
            .post(&url)
            .json(task)
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        Self::read(&url, response).await
    }

    async fn create_batch(&self, batch: &BatchRequest) -> Result<BatchCreated, ClientError> {
        let url = self.endpoint("/api/tasks/batch");
        tracing::info!(directory = %batch.directory, recursive = batch.recursive, kind = %batch.kind, "creating batch");
        let response = self
            .client
            .post(&url)
            .json(batch)
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        Self::read(&url, response).await
    }

    async fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/tasks/{id}"));
        tracing::info!(id, "deleting task");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.context(HttpSnafu { url: &url })?;
        Err(server_error(status, &body))
    }

    fn file_url(&self, path: &str) -> String {
        file_url(&self.base, path)
    }
}

pub fn file_url(base: &str, path: &str) -> String {
    format!(
        "{}/api/files/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(path, URI_COMPONENT)
    )
}

/// Turns a failed response into the server's `{error}` text, or the status
/// reason when the body has none.
fn server_error(status: StatusCode, body: &[u8]) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_owned)
                .unwrap_or_else(|| status.to_string())
        });
    ClientError::Server {
        status: status.as_u16(),
        message,
    }
}
