use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{palette::tailwind, Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::core::page::{PageModel, ResultList, SearchIcon, StatusKind};
use crate::ui::app::{Focus, TerminalApp};

const LOGO: &str = "▶ Video Search";
const ACCENT: Color = tailwind::RED.c500;
const GAUGE_COLOR: Color = tailwind::GRAY.c800;

impl TerminalApp {
    pub fn render(&mut self, frame: &mut Frame) {
        let [header, query, results, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_logo(frame, header);
        self.render_query(frame, query);
        self.render_results(frame, results);
        self.render_footer(frame, footer);

        let page = self.controller.page();
        if page.dialog.open {
            render_dialog(frame, page);
        }
        if let Some(alert) = &page.alert {
            render_alert(frame, alert);
        }
    }

    fn render_logo(&self, frame: &mut Frame, area: Rect) {
        let pinned = self.controller.page().logo_fixed;
        let style = if pinned {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        };
        let logo = Paragraph::new(LOGO)
            .style(style)
            .alignment(if pinned {
                Alignment::Left
            } else {
                Alignment::Center
            })
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(logo, area);
    }

    fn render_query(&self, frame: &mut Frame, area: Rect) {
        let button = &self.controller.page().search_button;
        let icon = match button.icon {
            SearchIcon::Search => "🔍",
            SearchIcon::Busy => "⏳",
        };
        let border = if self.focus == Focus::Query {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let title_style = if button.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(format!(" {} Search ", icon), title_style));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(self.input.value()).block(block), area);

        if self.focus == Focus::Query && !self.controller.page().dialog.open {
            let x = inner.x + (self.input.cursor() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Results {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Results ");

        match &self.controller.page().results {
            ResultList::Rows(rows) => {
                let items: Vec<ListItem> = rows
                    .iter()
                    .map(|row| {
                        let style = if row.active {
                            Style::default().fg(Color::Black).bg(Color::Green)
                        } else {
                            Style::default()
                        };
                        ListItem::new(Line::from(vec![
                            Span::styled(row.item.title.clone(), style),
                            Span::raw("  "),
                            Span::styled("[⬇]", Style::default().fg(Color::Green)),
                        ]))
                    })
                    .collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                    .highlight_symbol(" >");
                frame.render_stateful_widget(list, area, &mut self.list_state);
            }
            ResultList::Placeholder(text) => {
                frame.render_widget(List::new(vec![ListItem::new(text.as_str())]).block(block), area);
            }
            ResultList::Failed(message) => {
                let item = ListItem::new(format!("Error: {}", message))
                    .style(Style::default().fg(Color::Red));
                frame.render_widget(List::new(vec![item]).block(block), area);
            }
            ResultList::Empty => frame.render_widget(block, area),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let keys = match self.focus {
            Focus::Query => "Enter search · ↓ results · Tab format · Esc quit",
            Focus::Results => "Space select · d download · f format · / query · q quit",
        };
        let footer = Line::from(vec![
            Span::styled(" Format: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                self.controller.page().format_control.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(keys, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}

fn render_dialog(frame: &mut Frame, page: &PageModel) {
    let dialog = &page.dialog;
    let area = popup(frame.area(), 60, 40);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Download ");
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [title, format, progress, status, confirm] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(dialog.title.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true }),
        title,
    );
    frame.render_widget(
        Paragraph::new(format!("Format: {}   (Tab to change)", page.format_control)),
        format,
    );

    if dialog.progress_visible {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(GAUGE_COLOR)
            .ratio(dialog.progress.ratio())
            .label(dialog.progress.text());
        frame.render_widget(gauge, progress);
    }

    let status_line = match (&dialog.status, dialog.loading_visible) {
        (_, true) => Line::styled("Downloading...", Style::default().fg(Color::Yellow)),
        (Some(message), false) => {
            let color = match message.kind {
                StatusKind::Success => Color::Green,
                StatusKind::Failure => Color::Red,
            };
            Line::styled(message.text.clone(), Style::default().fg(color))
        }
        (None, false) => Line::default(),
    };
    frame.render_widget(Paragraph::new(status_line).wrap(Wrap { trim: true }), status);

    let confirm_style = if dialog.confirm_enabled {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Enter: Download ", confirm_style),
            Span::raw("  Esc: Close"),
        ]))
        .alignment(Alignment::Center),
        confirm,
    );
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = popup(frame.area(), 40, 20);
    let alert = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("Press any key", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Notice "),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(alert, area);
}

fn popup(area: Rect, per_x: u16, per_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(per_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(per_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
