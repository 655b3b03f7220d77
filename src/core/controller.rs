//! Client interaction controller
//!
//! Owns the [`PageModel`] and the [`SelectionState`] and turns typed UI events
//! into page mutations plus prepared network requests. Requests are split into a
//! `begin_*` step (validate input, update the page, hand out a ticket) and a
//! `finish_*` step (apply the result), so the network call itself can run
//! anywhere. Completions whose ticket has been superseded are dropped.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::core::generation::RequestGeneration;
use crate::core::models::{AppResult, DownloadRequest, SearchResultItem, SelectionState};
use crate::core::page::{
    PageModel, ResultList, ResultRow, SearchIcon, StatusMessage, DOWNLOAD_SUCCESS_MESSAGE,
    EMPTY_QUERY_ALERT, NO_RESULTS_PLACEHOLDER, NO_SELECTION_ALERT, SEARCHING_PLACEHOLDER,
};
use crate::core::runtime::{
    Completion, DownloadTicket, PendingRequest, RequestExecutor, SearchTicket,
};
use crate::core::storage::QueryStore;

/// Keys the query field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey {
    Enter,
    Other,
}

/// Everything a front end can report to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Loaded,
    QueryInput(String),
    QueryKey(QueryKey),
    SearchClicked,
    /// Title region of a result row was activated
    RowSelected(usize),
    /// Per-row download control was activated
    RowDownload(usize),
    FormatChanged(String),
    DownloadConfirmed,
    DialogClosed,
    AlertDismissed,
    Scrolled(u32),
}

/// What the front end has to do after an event
#[derive(Debug, Default)]
pub struct Dispatch {
    pub pending: Option<PendingRequest>,
    /// The event's default behaviour (e.g. submitting the field) must not run
    pub default_prevented: bool,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub default_format: String,
    pub logo_pin_threshold: u32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            default_format: crate::core::models::DEFAULT_FORMAT.to_string(),
            logo_pin_threshold: 50,
        }
    }
}

pub struct Controller {
    page: PageModel,
    selection: SelectionState,
    store: Arc<dyn QueryStore>,
    executor: RequestExecutor,
    search_generation: RequestGeneration,
    download_generation: RequestGeneration,
    logo_pin_threshold: u32,
}

impl Controller {
    pub fn new(
        executor: RequestExecutor,
        store: Arc<dyn QueryStore>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            page: PageModel::new(settings.default_format.clone()),
            selection: SelectionState::new(settings.default_format),
            store,
            executor,
            search_generation: RequestGeneration::new(),
            download_generation: RequestGeneration::new(),
            logo_pin_threshold: settings.logo_pin_threshold,
        }
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Route one UI event
    pub fn handle(&mut self, event: UiEvent) -> Dispatch {
        let mut dispatch = Dispatch::default();
        match event {
            UiEvent::Loaded => self.on_load(),
            UiEvent::QueryInput(text) => self.page.query_field = text,
            UiEvent::QueryKey(QueryKey::Enter) => {
                dispatch.default_prevented = true;
                dispatch.pending = self.begin_search().map(PendingRequest::Search);
            }
            UiEvent::QueryKey(QueryKey::Other) => {}
            UiEvent::SearchClicked => {
                if !self.page.search_button.disabled {
                    dispatch.pending = self.begin_search().map(PendingRequest::Search);
                }
            }
            UiEvent::RowSelected(index) => {
                self.select_row(index);
            }
            UiEvent::RowDownload(index) => self.download_row(index),
            UiEvent::FormatChanged(format) => self.set_format(format),
            UiEvent::DownloadConfirmed => {
                if self.page.dialog.confirm_enabled {
                    dispatch.pending = self.begin_download().map(PendingRequest::Download);
                }
            }
            UiEvent::DialogClosed => self.page.dialog.open = false,
            UiEvent::AlertDismissed => self.page.alert = None,
            UiEvent::Scrolled(offset) => self.on_scroll(offset),
        }
        dispatch
    }

    /// Apply a finished request
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Search { ticket, result } => self.finish_search(ticket, result),
            Completion::Download { ticket, result } => self.finish_download(ticket, result),
        }
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        let format = format.into();
        debug!("Format set to {}", format);
        self.selection.selected_format = format.clone();
        self.page.format_control = format;
    }

    fn alert(&mut self, message: &str) {
        warn!("{}", message);
        self.page.alert = Some(message.to_string());
    }

    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        let query = self.page.query_field.trim().to_string();
        if query.is_empty() {
            self.alert(EMPTY_QUERY_ALERT);
            return None;
        }

        if let Err(err) = self.store.save_last_query(&query) {
            warn!("Failed to persist last search: {}", err);
        }

        self.page.search_button.disabled = true;
        self.page.search_button.icon = SearchIcon::Busy;
        self.page.results = ResultList::Placeholder(SEARCHING_PLACEHOLDER.to_string());

        let token = self.search_generation.advance();
        info!("Search #{} started for {:?}", token.id(), query);
        Some(SearchTicket { token, query })
    }

    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: AppResult<Vec<SearchResultItem>>,
    ) {
        if !ticket.token.is_current() {
            debug!("Dropping superseded search #{}", ticket.token.id());
            return;
        }

        self.page.results = match result {
            Ok(items) if items.is_empty() => {
                ResultList::Placeholder(NO_RESULTS_PLACEHOLDER.to_string())
            }
            Ok(items) => ResultList::Rows(
                items
                    .into_iter()
                    .map(|item| ResultRow {
                        item,
                        active: false,
                    })
                    .collect(),
            ),
            Err(err) => {
                warn!("Search #{} failed: {}", ticket.token.id(), err);
                ResultList::Failed(err.to_string())
            }
        };

        self.page.search_button.disabled = false;
        self.page.search_button.icon = SearchIcon::Search;
    }

    pub async fn search_videos(&mut self) {
        if let Some(ticket) = self.begin_search() {
            let completion = self.executor.search(ticket).await;
            self.complete(completion);
        }
    }

    /// Mark one row as the sole active row and make it the selection
    pub fn select_row(&mut self, index: usize) -> bool {
        let rows = match &mut self.page.results {
            ResultList::Rows(rows) if index < rows.len() => rows,
            _ => return false,
        };

        for (i, row) in rows.iter_mut().enumerate() {
            row.active = i == index;
        }
        self.selection.selected_video = Some(rows[index].item.clone());
        self.page.dialog.progress_visible = false;
        self.page.dialog.status = None;
        true
    }

    /// Per-row download control: select the row's item and open the dialog
    pub fn download_row(&mut self, index: usize) {
        let item = match self.page.results.rows().get(index) {
            Some(row) => row.item.clone(),
            None => return,
        };
        self.selection.selected_video = Some(item);
        self.download_selected();
    }

    pub fn download_selected(&mut self) {
        let title = match &self.selection.selected_video {
            Some(video) => video.title.clone(),
            None => {
                self.alert(NO_SELECTION_ALERT);
                return;
            }
        };

        let dialog = &mut self.page.dialog;
        dialog.title = title;
        dialog.status = None;
        dialog.progress.set(0);
        dialog.open = true;
    }

    pub fn begin_download(&mut self) -> Option<DownloadTicket> {
        let video = match &self.selection.selected_video {
            Some(video) => video.clone(),
            None => {
                self.alert(NO_SELECTION_ALERT);
                return None;
            }
        };
        let format = self.page.format_control.clone();

        let dialog = &mut self.page.dialog;
        dialog.confirm_enabled = false;
        dialog.loading_visible = true;
        dialog.status = None;
        dialog.progress_visible = true;

        let token = self.download_generation.advance();
        info!(
            "Download #{} started for {} as {}",
            token.id(),
            video.video_id,
            format
        );
        Some(DownloadTicket {
            token,
            request: DownloadRequest::for_item(&video, format),
        })
    }

    pub fn finish_download(&mut self, ticket: DownloadTicket, result: AppResult<PathBuf>) {
        if !ticket.token.is_current() {
            debug!("Dropping superseded download #{}", ticket.token.id());
            return;
        }

        let dialog = &mut self.page.dialog;
        match result {
            Ok(path) => {
                info!("Download #{} saved to {}", ticket.token.id(), path.display());
                dialog.progress.set(100);
                dialog.status = Some(StatusMessage::success(DOWNLOAD_SUCCESS_MESSAGE));
            }
            Err(err) => {
                error!("Download #{} failed: {}", ticket.token.id(), err);
                dialog.status = Some(StatusMessage::failure(format!("Error: {}", err)));
            }
        }

        dialog.confirm_enabled = true;
        dialog.loading_visible = false;
    }

    pub async fn start_download(&mut self) {
        if let Some(ticket) = self.begin_download() {
            if let Some(completion) = self.executor.download(ticket).await {
                self.complete(completion);
            }
        }
    }

    pub fn on_scroll(&mut self, offset: u32) {
        self.page.logo_fixed = offset > self.logo_pin_threshold;
    }

    /// Prefill the query field with the persisted query; never searches
    pub fn on_load(&mut self) {
        match self.store.load_last_query() {
            Ok(Some(last)) if !last.is_empty() => self.page.query_field = last,
            Ok(_) => {}
            Err(err) => warn!("Failed to read last search: {}", err),
        }
    }
}
