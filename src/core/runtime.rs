//! Request runtime.
//!
//! Network work runs on tokio tasks, away from the loop that owns the
//! [`Controller`](crate::core::controller::Controller). Finished requests come
//! back as [`Completion`] values over a channel and are applied by that loop.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::core::api::VideoApi;
use crate::core::file_sink::FileSink;
use crate::core::generation::GenerationToken;
use crate::core::models::{AppResult, DownloadRequest, SearchResultItem};

/// A search the controller has prepared the page for
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub token: GenerationToken,
    pub query: String,
}

/// A download the controller has prepared the dialog for
#[derive(Debug, Clone)]
pub struct DownloadTicket {
    pub token: GenerationToken,
    pub request: DownloadRequest,
}

#[derive(Debug, Clone)]
pub enum PendingRequest {
    Search(SearchTicket),
    Download(DownloadTicket),
}

#[derive(Debug)]
pub enum Completion {
    Search {
        ticket: SearchTicket,
        result: AppResult<Vec<SearchResultItem>>,
    },
    Download {
        ticket: DownloadTicket,
        result: AppResult<PathBuf>,
    },
}

/// Runs prepared requests against the API and stores downloaded files
#[derive(Clone)]
pub struct RequestExecutor {
    api: Arc<dyn VideoApi>,
    sink: Arc<dyn FileSink>,
}

impl RequestExecutor {
    pub fn new(api: Arc<dyn VideoApi>, sink: Arc<dyn FileSink>) -> Self {
        Self { api, sink }
    }

    pub async fn run(&self, pending: PendingRequest) -> Option<Completion> {
        match pending {
            PendingRequest::Search(ticket) => Some(self.search(ticket).await),
            PendingRequest::Download(ticket) => self.download(ticket).await,
        }
    }

    #[instrument(skip(self, ticket), fields(generation = ticket.token.id(), query = %ticket.query))]
    pub async fn search(&self, ticket: SearchTicket) -> Completion {
        info!("Searching");
        let result = self.api.search(&ticket.query).await;
        Completion::Search { ticket, result }
    }

    /// `None` when a newer download took over before the payload was saved
    #[instrument(skip(self, ticket), fields(generation = ticket.token.id(), video_id = %ticket.request.video_id))]
    pub async fn download(&self, ticket: DownloadTicket) -> Option<Completion> {
        info!("Downloading as {}", ticket.request.format);
        let result = match self.api.download(&ticket.request).await {
            Ok(file) => {
                if !ticket.token.is_current() {
                    debug!("Discarding payload of superseded download");
                    return None;
                }
                info!(
                    "Saving {} bytes ({})",
                    file.bytes.len(),
                    file.content_type.as_deref().unwrap_or("unknown type")
                );
                self.sink.save(&ticket.request.file_name(), file.bytes).await
            }
            Err(err) => Err(err),
        };
        Some(Completion::Download { ticket, result })
    }
}

/// Handle used by front ends to start requests without blocking their loop
#[derive(Clone)]
pub struct RequestRuntimeHandle {
    executor: RequestExecutor,
    sender: mpsc::Sender<Completion>,
}

impl RequestRuntimeHandle {
    pub fn submit(&self, pending: PendingRequest) {
        let executor = self.executor.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Some(completion) = executor.run(pending).await {
                if sender.send(completion).await.is_err() {
                    debug!("Completion channel closed, dropping result");
                }
            }
        });
    }
}

/// Create the handle plus the receiver the owning loop drains
pub fn spawn_request_runtime(
    executor: RequestExecutor,
) -> (RequestRuntimeHandle, mpsc::Receiver<Completion>) {
    let (sender, receiver) = mpsc::channel(32);
    (RequestRuntimeHandle { executor, sender }, receiver)
}
