//! Headless search

use std::io::Write;

use tracing::info;

use crate::core::controller::UiEvent;
use crate::core::page::{PageModel, ResultList};
use crate::AppState;

/// Run one search and print the result list. Returns whether it succeeded.
pub async fn run_search(
    state: &mut AppState,
    query: String,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    info!("🔍 Headless search for {:?}", query);

    let controller = &mut state.controller;
    controller.handle(UiEvent::QueryInput(query));
    controller.search_videos().await;

    print_results(controller.page(), out)
}

pub(crate) fn print_results(page: &PageModel, out: &mut impl Write) -> anyhow::Result<bool> {
    if let Some(alert) = &page.alert {
        writeln!(out, "{}", alert)?;
        return Ok(false);
    }

    match &page.results {
        ResultList::Rows(rows) => {
            for row in rows {
                writeln!(out, "{}\t{}", row.item.video_id, row.item.title)?;
            }
            Ok(true)
        }
        ResultList::Placeholder(text) => {
            writeln!(out, "{}", text)?;
            Ok(true)
        }
        ResultList::Failed(message) => {
            writeln!(out, "Error: {}", message)?;
            Ok(false)
        }
        ResultList::Empty => Ok(false),
    }
}
