//! Core data models for the video search client

use serde::{Deserialize, Serialize};

/// A single row returned by the search endpoint

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub video_id: String,

    pub title: String,
}

impl SearchResultItem {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
        }
    }
}

/// The current selection: at most one video plus the chosen output format

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_video: Option<SearchResultItem>,

    pub selected_format: String,
}

impl SelectionState {
    pub fn new(default_format: impl Into<String>) -> Self {
        Self {
            selected_video: None,
            selected_format: default_format.into(),
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

/// Format used when nothing else is configured
pub const DEFAULT_FORMAT: &str = "mp3";

/// Form payload posted to the download endpoint

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub video_id: String,

    pub title: String,

    pub format: String,
}

impl DownloadRequest {
    pub fn for_item(item: &SearchResultItem, format: impl Into<String>) -> Self {
        Self {
            video_id: item.video_id.clone(),
            title: item.title.clone(),
            format: format.into(),
        }
    }

    /// File name the payload is saved under: `<title>.<format>`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.title, self.format)
    }
}

/// Binary payload returned by a successful download

#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub bytes: bytes::Bytes,

    pub content_type: Option<String>,
}

/// Optional JSON body the API sends with non-2xx responses

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx answer from the API; displays as the server's message only
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("System error: {0}")]
    System(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
