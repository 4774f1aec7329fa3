use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::error::{EvaluatorError, Result};

const REPOSITORY_SERVICE: &str = "Repository reader";
const VIDEO_SERVICE: &str = "Video parser";
const NOT_AVAILABLE: &str = "N/A";

/// Documentation text gathered from a project repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEvidence {
    pub readme_text: String,
}

/// Metadata gathered from a project video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEvidence {
    pub title: String,
    pub description: String,
}

#[async_trait]
pub trait RepositoryReader: Send + Sync {
    async fn read_repository(&self, repository_link: &str) -> Result<RepositoryEvidence>;
}

#[async_trait]
pub trait VideoParser: Send + Sync {
    async fn parse_video(&self, video_link: &str) -> Result<VideoEvidence>;
}

#[derive(Deserialize)]
struct ReadRepoResponse {
    success: Option<bool>,
    readme_content: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ParseVideoResponse {
    success: Option<bool>,
    #[serde(default)]
    video_summary: VideoSummary,
    error: Option<String>,
}

#[derive(Deserialize, Default)]
struct VideoSummary {
    title: Option<String>,
    description: Option<String>,
}

/// Client for the repository reader service (`POST /read-repo`).
#[derive(Clone)]
pub struct HttpRepositoryReader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRepositoryReader {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl RepositoryReader for HttpRepositoryReader {
    #[instrument(skip(self), fields(service = REPOSITORY_SERVICE))]
    async fn read_repository(&self, repository_link: &str) -> Result<RepositoryEvidence> {
        let url = format!("{}/read-repo", self.base_url.trim_end_matches('/'));
        let body = json!({ "github_link": repository_link });
        let response: ReadRepoResponse =
            post_json(&self.client, REPOSITORY_SERVICE, &url, &body).await?;

        ensure_success(REPOSITORY_SERVICE, response.success, response.error)?;

        let readme_text = response.readme_content.unwrap_or_default();
        debug!(readme_len = readme_text.len(), "Repository evidence received");
        Ok(RepositoryEvidence { readme_text })
    }
}

/// Client for the video parser service (`POST /parse-video`).
#[derive(Clone)]
pub struct HttpVideoParser {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVideoParser {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl VideoParser for HttpVideoParser {
    #[instrument(skip(self), fields(service = VIDEO_SERVICE))]
    async fn parse_video(&self, video_link: &str) -> Result<VideoEvidence> {
        let url = format!("{}/parse-video", self.base_url.trim_end_matches('/'));
        let body = json!({ "video_link": video_link });
        let response: ParseVideoResponse =
            post_json(&self.client, VIDEO_SERVICE, &url, &body).await?;

        ensure_success(VIDEO_SERVICE, response.success, response.error)?;

        let summary = response.video_summary;
        Ok(VideoEvidence {
            title: summary.title.unwrap_or_else(|| NOT_AVAILABLE.into()),
            description: summary.description.unwrap_or_else(|| NOT_AVAILABLE.into()),
        })
    }
}

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| EvaluatorError::Client(e.to_string()))
}

/// POST a JSON body and decode a JSON answer, mapping every transport,
/// status and decoding failure to `ServiceCommunication`.
async fn post_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    service: &'static str,
    url: &str,
    body: &serde_json::Value,
) -> Result<T> {
    let service_error = |message: String| EvaluatorError::ServiceCommunication { service, message };

    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| service_error(describe_transport_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let detail = upstream_error_detail(&text);
        return Err(service_error(if detail.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {detail}")
        }));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| service_error(format!("malformed response body: {e}")))
}

fn ensure_success(
    service: &'static str,
    success: Option<bool>,
    error: Option<String>,
) -> Result<()> {
    if success == Some(false) {
        return Err(EvaluatorError::ServiceCommunication {
            service,
            message: error.unwrap_or_else(|| "service reported failure".into()),
        });
    }
    Ok(())
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".into()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

/// Prefer the upstream's `error` field; fall back to a bounded slice of the raw body.
fn upstream_error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(error) = value.get("error").and_then(|e| e.as_str())
    {
        return error.to_string();
    }
    body.trim().chars().take(200).collect()
}
