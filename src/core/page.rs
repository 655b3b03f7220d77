//! Page model
//!
//! Everything a front end needs to draw the search/download page. The controller
//! is the only writer; renderers and tests only read it.

use crate::core::models::SearchResultItem;

pub const SEARCHING_PLACEHOLDER: &str = "Searching...";
pub const NO_RESULTS_PLACEHOLDER: &str = "No videos found.";
pub const DOWNLOAD_SUCCESS_MESSAGE: &str = "Download completed successfully!";
pub const EMPTY_QUERY_ALERT: &str = "Please enter a search term.";
pub const NO_SELECTION_ALERT: &str = "Please select a video.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchIcon {
    #[default]
    Search,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchButton {
    pub disabled: bool,
    pub icon: SearchIcon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub item: SearchResultItem,
    pub active: bool,
}

/// Contents of the result list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultList {
    #[default]
    Empty,
    /// A single neutral entry (`Searching...`, `No videos found.`)
    Placeholder(String),
    /// A single entry styled as failure, shown as `Error: <message>`
    Failed(String),
    Rows(Vec<ResultRow>),
}

impl ResultList {
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            ResultList::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Number of entries the list shows, placeholders included
    pub fn entry_count(&self) -> usize {
        match self {
            ResultList::Empty => 0,
            ResultList::Placeholder(_) | ResultList::Failed(_) => 1,
            ResultList::Rows(rows) => rows.len(),
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.rows().iter().position(|row| row.active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failure,
            text: text.into(),
        }
    }
}

/// Only ever 0% or 100%: the API reports no partial progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressIndicator {
    percent: u8,
}

impl ProgressIndicator {
    pub fn set(&mut self, percent: u8) {
        self.percent = percent.min(100);
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    pub fn text(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn width(&self) -> String {
        self.text()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDialog {
    pub open: bool,
    pub title: String,
    pub status: Option<StatusMessage>,
    pub progress: ProgressIndicator,
    pub progress_visible: bool,
    pub confirm_enabled: bool,
    pub loading_visible: bool,
}

impl Default for DownloadDialog {
    fn default() -> Self {
        Self {
            open: false,
            title: String::new(),
            status: None,
            progress: ProgressIndicator::default(),
            progress_visible: false,
            confirm_enabled: true,
            loading_visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageModel {
    pub query_field: String,
    pub search_button: SearchButton,
    pub results: ResultList,
    pub format_control: String,
    pub dialog: DownloadDialog,
    pub logo_fixed: bool,
    pub alert: Option<String>,
}

impl PageModel {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            query_field: String::new(),
            search_button: SearchButton::default(),
            results: ResultList::Empty,
            format_control: format.into(),
            dialog: DownloadDialog::default(),
            logo_fixed: false,
            alert: None,
        }
    }
}
