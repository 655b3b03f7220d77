use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use ratatui::crossterm::execute;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::controller::{Controller, QueryKey, UiEvent};
use crate::core::runtime::{spawn_request_runtime, RequestRuntimeHandle};
use crate::ui::input::TextInput;

/// Terminal rows are reported to the controller as this many scroll units
pub const ROW_SCROLL_UNITS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Results,
}

pub struct TerminalApp {
    pub controller: Controller,
    pub input: TextInput,
    pub focus: Focus,
    pub list_state: ListState,
    pub formats: Vec<String>,
    pub tick_rate: Duration,
    pub should_quit: bool,
    runtime: Option<RequestRuntimeHandle>,
}

impl TerminalApp {
    pub fn new(controller: Controller, formats: Vec<String>, tick_rate: Duration) -> Self {
        Self {
            controller,
            input: TextInput::new(),
            focus: Focus::Query,
            list_state: ListState::default(),
            formats,
            tick_rate,
            should_quit: false,
            runtime: None,
        }
    }

    /// Send an event to the controller and start whatever request it prepared
    pub fn dispatch(&mut self, event: UiEvent) {
        let dispatch = self.controller.handle(event);
        if let Some(pending) = dispatch.pending {
            match &self.runtime {
                Some(runtime) => runtime.submit(pending),
                None => debug!("No request runtime attached, dropping {:?}", pending),
            }
        }
    }

    fn sync_query(&mut self) {
        self.dispatch(UiEvent::QueryInput(self.input.value().to_string()));
    }

    fn row_count(&self) -> usize {
        self.controller.page().results.rows().len()
    }

    fn move_highlight(&mut self, forward: bool) {
        let count = self.row_count();
        if count == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if forward => (i + 1) % count,
            Some(0) => count - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.list_state.select(Some(next));
        self.dispatch(UiEvent::Scrolled(next as u32 * ROW_SCROLL_UNITS));
    }

    fn cycle_format(&mut self) {
        if self.formats.is_empty() {
            return;
        }
        let current = &self.controller.page().format_control;
        let next = match self.formats.iter().position(|f| f == current) {
            Some(i) => (i + 1) % self.formats.len(),
            None => 0,
        };
        let format = self.formats[next].clone();
        self.dispatch(UiEvent::FormatChanged(format));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let page = self.controller.page();
        if page.alert.is_some() {
            self.dispatch(UiEvent::AlertDismissed);
            return;
        }

        if page.dialog.open {
            match key.code {
                KeyCode::Enter => self.dispatch(UiEvent::DownloadConfirmed),
                KeyCode::Esc => self.dispatch(UiEvent::DialogClosed),
                KeyCode::Tab | KeyCode::Char('f') => self.cycle_format(),
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Query => self.handle_query_key(key),
            Focus::Results => self.handle_results_key(key),
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.dispatch(UiEvent::QueryKey(QueryKey::Enter)),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.cycle_format(),
            KeyCode::Down => {
                if self.row_count() > 0 {
                    self.focus = Focus::Results;
                    if self.list_state.selected().is_none() {
                        self.list_state.select(Some(0));
                    }
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c);
                self.sync_query();
                self.dispatch(UiEvent::QueryKey(QueryKey::Other));
            }
            KeyCode::Backspace => {
                self.input.delete_back();
                self.sync_query();
            }
            KeyCode::Delete => {
                self.input.delete_forward();
                self.sync_query();
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_start(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_highlight(true),
            KeyCode::Char('k') | KeyCode::Up => {
                if self.list_state.selected() == Some(0) {
                    self.focus = Focus::Query;
                } else {
                    self.move_highlight(false);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = self.list_state.selected() {
                    self.dispatch(UiEvent::RowSelected(index));
                }
            }
            KeyCode::Char('d') => {
                if let Some(index) = self.list_state.selected() {
                    self.dispatch(UiEvent::RowDownload(index));
                }
            }
            KeyCode::Tab | KeyCode::Char('f') => self.cycle_format(),
            KeyCode::Char('/') | KeyCode::Esc => self.focus = Focus::Query,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Query && !self.controller.page().dialog.open {
            self.input.insert_str(text);
            self.sync_query();
        }
    }

    /// Keep the highlight inside the current list after results change
    fn clamp_highlight(&mut self) {
        let count = self.row_count();
        match self.list_state.selected() {
            Some(_) if count == 0 => {
                self.list_state.select(None);
                if self.focus == Focus::Results {
                    self.focus = Focus::Query;
                }
            }
            Some(i) if i >= count => self.list_state.select(Some(count - 1)),
            _ => {}
        }
    }

    /// Pump terminal events and request completions until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let (runtime, mut completions) = spawn_request_runtime(self.controller.executor().clone());
        self.runtime = Some(runtime);

        self.dispatch(UiEvent::Loaded);
        let prefill = self.controller.page().query_field.clone();
        self.input.set(&prefill);

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let poll_interval = self.tick_rate;
        std::thread::Builder::new()
            .name("terminal-input".into())
            .spawn(move || -> std::io::Result<()> {
                loop {
                    if event::poll(poll_interval)? {
                        if event_tx.send(event::read()?).is_err() {
                            return Ok(());
                        }
                    } else if event_tx.is_closed() {
                        return Ok(());
                    }
                }
            })?;

        let mut terminal = ratatui::init();
        let _ = execute!(std::io::stdout(), EnableBracketedPaste);
        let mut ticker = tokio::time::interval(self.tick_rate);
        info!("Terminal page started");

        let result: Result<()> = loop {
            if let Err(err) = terminal.draw(|frame| self.render(frame)) {
                break Err(err.into());
            }

            tokio::select! {
                maybe_event = event_rx.recv() => match maybe_event {
                    Some(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Some(Event::Paste(text)) => self.handle_paste(&text),
                    Some(_) => {}
                    None => break Err(anyhow::anyhow!("input event channel disconnected")),
                },
                Some(completion) = completions.recv() => {
                    self.controller.complete(completion);
                    self.clamp_highlight();
                }
                _ = ticker.tick() => {}
            }

            if self.should_quit {
                break Ok(());
            }
        };

        let _ = execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        drop(event_rx);
        info!("Terminal page closed");
        result
    }
}
