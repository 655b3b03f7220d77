//! Search/download API client
//!
//! The backend exposes two endpoints:
//! - `GET  /api/youtube/search?query=...` returning a JSON array of results
//! - `POST /api/youtube/download` (form encoded) returning the file body
//!
//! Non-2xx answers may carry `{ "error": "..." }`; when they don't, a fixed
//! fallback message is reported instead.

use async_trait::async_trait;
use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request, Response};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::config::ApiConfig;
use crate::core::models::{
    ApiErrorBody, AppError, AppResult, DownloadRequest, DownloadedFile, SearchResultItem,
};

pub const SEARCH_PATH: &str = "/api/youtube/search";
pub const DOWNLOAD_PATH: &str = "/api/youtube/download";

pub const SEARCH_FALLBACK_ERROR: &str = "Search failed.";
pub const DOWNLOAD_FALLBACK_ERROR: &str = "Failed to download file.";

#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>>;

    async fn download(&self, request: &DownloadRequest) -> AppResult<DownloadedFile>;
}

/// reqwest-backed implementation of [`VideoApi`]
#[derive(Debug, Clone)]
pub struct HttpVideoApi {
    client: Client,
    base_url: Url,
}

impl HttpVideoApi {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("Invalid API base URL: {}", e)))?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Config(format!("Invalid endpoint {}: {}", path, e)))
    }

    pub fn build_search_request(&self, query: &str) -> AppResult<Request> {
        let request = self
            .client
            .get(self.endpoint(SEARCH_PATH)?)
            .query(&[("query", query)])
            .build()?;
        Ok(request)
    }

    pub fn build_download_request(&self, download: &DownloadRequest) -> AppResult<Request> {
        let request = self
            .client
            .post(self.endpoint(DOWNLOAD_PATH)?)
            .form(&[
                ("videoId", download.video_id.as_str()),
                ("title", download.title.as_str()),
                ("format", download.format.as_str()),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl VideoApi for HttpVideoApi {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>> {
        let request = self.build_search_request(query)?;
        debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        let response = ensure_success(response, SEARCH_FALLBACK_ERROR).await?;

        let body = response.bytes().await?;
        let items: Vec<SearchResultItem> = serde_json::from_slice(&body)?;
        info!("Search for {:?} returned {} results", query, items.len());
        Ok(items)
    }

    async fn download(&self, download: &DownloadRequest) -> AppResult<DownloadedFile> {
        let request = self.build_download_request(download)?;
        debug!("POST {} for video {}", request.url(), download.video_id);

        let response = self.client.execute(request).await?;
        let response = ensure_success(response, DOWNLOAD_FALLBACK_ERROR).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }

        info!(
            "Downloaded {} bytes for video {}",
            buffer.len(),
            download.video_id
        );

        Ok(DownloadedFile {
            bytes: buffer.freeze(),
            content_type,
        })
    }
}

async fn ensure_success(response: Response, fallback: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = error_message_from_body(&body, fallback);
    warn!("API answered {}: {}", status, message);

    Err(AppError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Extract the `error` field from a failure body, or fall back when it is absent
pub fn error_message_from_body(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
