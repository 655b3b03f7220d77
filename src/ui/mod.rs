//! Interactive terminal page
//!
//! Draws the [`PageModel`](crate::core::page::PageModel) with ratatui and feeds
//! key presses to the controller as typed events.

pub mod app;
pub mod input;
pub mod render;

use std::time::Duration;

use anyhow::Result;

use crate::AppState;
pub use app::TerminalApp;

/// Run the terminal page until the user quits
pub async fn run(state: AppState) -> Result<()> {
    let AppState { config, controller } = state;
    let mut app = TerminalApp::new(
        controller,
        config.ui.formats.clone(),
        Duration::from_millis(config.ui.tick_rate_ms),
    );
    app.run().await
}
