//! Headless download
//!
//! Mirrors the page flow: search, activate the chosen row's download control,
//! confirm with the format currently shown by the format control.

use std::io::Write;

use anyhow::anyhow;
use tracing::info;

use crate::commands::search::print_results;
use crate::core::controller::UiEvent;
use crate::core::page::StatusKind;
use crate::AppState;

/// Which search result to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPick {
    Index(usize),
    VideoId(String),
}

pub async fn run_download(
    state: &mut AppState,
    query: String,
    pick: RowPick,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    info!("⬇️ Headless download for {:?} ({:?})", query, pick);

    let controller = &mut state.controller;
    controller.handle(UiEvent::QueryInput(query));
    controller.search_videos().await;

    let rows = controller.page().results.rows();
    if rows.is_empty() {
        print_results(controller.page(), out)?;
        return Ok(false);
    }

    let index = match &pick {
        RowPick::Index(index) if *index < rows.len() => *index,
        RowPick::Index(index) => {
            return Err(anyhow!(
                "Result {} does not exist ({} results)",
                index,
                rows.len()
            ))
        }
        RowPick::VideoId(id) => rows
            .iter()
            .position(|row| &row.item.video_id == id)
            .ok_or_else(|| anyhow!("No result with video id {}", id))?,
    };

    controller.handle(UiEvent::RowDownload(index));
    controller.start_download().await;

    let dialog = &controller.page().dialog;
    match &dialog.status {
        Some(status) => {
            writeln!(out, "{} [{}]", status.text, dialog.progress.text())?;
            Ok(status.kind == StatusKind::Success)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::core::file_sink::MemoryFileSink;
    use crate::core::test_support::{harness, lofi_item, MockVideoApi};
    use std::sync::Arc;

    fn state(api: MockVideoApi) -> (AppState, Arc<MemoryFileSink>) {
        let h = harness(api);
        (
            AppState {
                config: AppConfig::default(),
                controller: h.controller,
            },
            h.sink,
        )
    }

    #[tokio::test]
    async fn downloads_the_picked_row() {
        let (mut state, sink) = state(
            MockVideoApi::new()
                .with_results(vec![lofi_item()])
                .with_payload(b"ID3"),
        );
        let mut out = Vec::new();

        let ok = run_download(
            &mut state,
            "lofi beats".into(),
            RowPick::VideoId("abc123".into()),
            &mut out,
        )
        .await
        .unwrap();

        assert!(ok);
        assert_eq!(sink.saved()[0].0, "Lofi Beats Mix.mp3");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Download completed successfully! [100%]\n"
        );
    }

    #[tokio::test]
    async fn reports_server_error() {
        let (mut state, _sink) = state(
            MockVideoApi::new()
                .with_results(vec![lofi_item()])
                .with_download_error(404, "Video unavailable"),
        );
        let mut out = Vec::new();

        let ok = run_download(&mut state, "lofi".into(), RowPick::Index(0), &mut out)
            .await
            .unwrap();

        assert!(!ok);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Video unavailable [0%]\n"
        );
    }

    #[tokio::test]
    async fn out_of_range_pick_is_an_error() {
        let (mut state, _sink) = state(MockVideoApi::new().with_results(vec![lofi_item()]));
        let mut out = Vec::new();

        let result = run_download(&mut state, "lofi".into(), RowPick::Index(3), &mut out).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_results_print_placeholder() {
        let (mut state, _sink) = state(MockVideoApi::new().with_results(vec![]));
        let mut out = Vec::new();

        let ok = run_download(&mut state, "lofi".into(), RowPick::Index(0), &mut out)
            .await
            .unwrap();

        assert!(!ok);
        assert_eq!(String::from_utf8(out).unwrap(), "No videos found.\n");
    }
}
