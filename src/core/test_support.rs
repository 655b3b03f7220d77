//! Shared fixtures for controller and runtime tests

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::api::VideoApi;
use crate::core::controller::{Controller, ControllerSettings};
use crate::core::file_sink::MemoryFileSink;
use crate::core::models::{
    AppError, AppResult, DownloadRequest, DownloadedFile, SearchResultItem,
};
use crate::core::runtime::RequestExecutor;
use crate::core::storage::MemoryQueryStore;

/// Scripted [`VideoApi`] that records every call
#[derive(Default)]
pub struct MockVideoApi {
    search_response: Mutex<Option<AppResult<Vec<SearchResultItem>>>>,
    download_response: Mutex<Option<AppResult<Bytes>>>,
    pub searches: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<DownloadRequest>>,
}

impl MockVideoApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, items: Vec<SearchResultItem>) -> Self {
        *self.search_response.lock() = Some(Ok(items));
        self
    }

    pub fn with_search_error(self, status: u16, message: &str) -> Self {
        *self.search_response.lock() = Some(Err(server_error(status, message)));
        self
    }

    pub fn with_payload(self, payload: &'static [u8]) -> Self {
        *self.download_response.lock() = Some(Ok(Bytes::from_static(payload)));
        self
    }

    pub fn with_download_error(self, status: u16, message: &str) -> Self {
        *self.download_response.lock() = Some(Err(server_error(status, message)));
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().len()
    }

    pub fn download_count(&self) -> usize {
        self.downloads.lock().len()
    }
}

fn server_error(status: u16, message: &str) -> AppError {
    AppError::Server {
        status,
        message: message.to_string(),
    }
}

fn replay<T: Clone>(slot: &Mutex<Option<AppResult<T>>>) -> AppResult<T> {
    match &*slot.lock() {
        Some(Ok(value)) => Ok(value.clone()),
        Some(Err(AppError::Server { status, message })) => Err(server_error(*status, message)),
        Some(Err(other)) => Err(AppError::System(other.to_string())),
        None => Err(AppError::System("no scripted response".to_string())),
    }
}

#[async_trait]
impl VideoApi for MockVideoApi {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResultItem>> {
        self.searches.lock().push(query.to_string());
        replay(&self.search_response)
    }

    async fn download(&self, request: &DownloadRequest) -> AppResult<DownloadedFile> {
        self.downloads.lock().push(request.clone());
        replay(&self.download_response).map(|bytes| DownloadedFile {
            bytes,
            content_type: Some("audio/mpeg".to_string()),
        })
    }
}

pub struct Harness {
    pub controller: Controller,
    pub api: Arc<MockVideoApi>,
    pub sink: Arc<MemoryFileSink>,
    pub store: Arc<MemoryQueryStore>,
}

pub fn harness(api: MockVideoApi) -> Harness {
    harness_with_store(api, MemoryQueryStore::new())
}

pub fn harness_with_store(api: MockVideoApi, store: MemoryQueryStore) -> Harness {
    let api = Arc::new(api);
    let sink = Arc::new(MemoryFileSink::new());
    let store = Arc::new(store);
    let executor = RequestExecutor::new(api.clone(), sink.clone());
    let controller = Controller::new(executor, store.clone(), ControllerSettings::default());
    Harness {
        controller,
        api,
        sink,
        store,
    }
}

pub fn lofi_item() -> SearchResultItem {
    SearchResultItem::new("abc123", "Lofi Beats Mix")
}
