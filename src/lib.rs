//! Video Search Client - Core Library
//!
//! This library provides the search/download page controller, the HTTP client for
//! the search and download endpoints, persisted client state, and the terminal
//! front end that drives them.

pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    api::{HttpVideoApi, VideoApi},
    config::AppConfig,
    controller::{Controller, ControllerSettings, UiEvent},
    file_sink::{DirectoryFileSink, FileSink},
    models::{AppError, AppResult, SearchResultItem, SelectionState},
    page::PageModel,
    runtime::{spawn_request_runtime, RequestExecutor},
    storage::{FileQueryStore, QueryStore},
};

use std::sync::Arc;

/// Everything a front end needs, wired from one configuration
pub struct AppState {
    pub config: AppConfig,
    pub controller: Controller,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let api = HttpVideoApi::new(&config.api)
            .map_err(|e| anyhow::anyhow!("Failed to create API client: {}", e))?;
        let sink = DirectoryFileSink::new(&config.storage.output_directory);
        let store = FileQueryStore::new(config.state_file_path()?);

        tracing::info!(
            "Using API at {} and saving downloads to {}",
            api.base_url(),
            sink.directory().display()
        );

        let executor = RequestExecutor::new(Arc::new(api), Arc::new(sink));
        let controller = Controller::new(
            executor,
            Arc::new(store),
            ControllerSettings {
                default_format: config.ui.default_format.clone(),
                logo_pin_threshold: config.ui.logo_pin_threshold,
            },
        );

        Ok(Self { config, controller })
    }
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
