use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::panel::{PanelApp, PanelRow, PANEL_ROWS};

/// Label column width; values line up to the right of it
const LABEL_WIDTH: usize = 26;

pub struct PanelFormWidget;

impl PanelFormWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &PanelApp) {
        let theme = &app.theme;

        let title = match &app.hostname {
            Some(host) => {
                let state = if app.site_enabled() { "Enabled" } else { "Disabled" };
                format!(" {} [{}] ", host, state)
            }
            None => " wheelwright settings ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let items: Vec<ListItem> = PANEL_ROWS
            .iter()
            .map(|row| ListItem::new(Self::row_line(app, *row)))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default();
        state.select(Some(app.selected));

        frame.render_stateful_widget(list, area, &mut state);
    }

    fn row_line(app: &PanelApp, row: PanelRow) -> Line<'static> {
        let theme = &app.theme;
        let toggle = |on: bool| {
            if on {
                Span::styled("[on] ", Style::default().fg(theme.enabled))
            } else {
                Span::styled("[off]", Style::default().fg(theme.disabled))
            }
        };

        let (label, value) = match row {
            PanelRow::EnableSite => {
                let label = match &app.hostname {
                    Some(host) => format!("Enable on {}", host),
                    None => "Enable (no page)".to_string(),
                };
                // Site status badge is green/red, unlike the plain toggles
                let badge = if app.site_enabled() {
                    Span::styled("[on] ", Style::default().fg(theme.enabled))
                } else {
                    Span::styled("[off]", Style::default().fg(theme.red))
                };
                (label, badge)
            }
            PanelRow::SpeedEnabled => (
                "Speed control".to_string(),
                toggle(app.settings.speed_enabled),
            ),
            PanelRow::ScrollSpeed => {
                let style = if app.settings.speed_enabled {
                    Style::default().fg(theme.fg0)
                } else {
                    Style::default().fg(theme.grey0)
                };
                (
                    "Scroll speed".to_string(),
                    Span::styled(format!("◄ {:.1}x ►", app.settings.scroll_speed), style),
                )
            }
            PanelRow::SmoothScrolling => (
                "Smooth scrolling".to_string(),
                toggle(app.settings.smooth_scrolling),
            ),
            PanelRow::SmoothDuration => {
                let style = if app.settings.smooth_scrolling {
                    Style::default().fg(theme.fg0)
                } else {
                    Style::default().fg(theme.grey0)
                };
                (
                    "Smooth duration".to_string(),
                    Span::styled(format!("◄ {} ms ►", app.settings.smooth_duration), style),
                )
            }
            PanelRow::Reset => {
                return Line::from(Span::styled(
                    " [ Reset preferences ]",
                    Style::default().fg(theme.orange),
                ));
            }
        };

        let padding = " ".repeat(LABEL_WIDTH.saturating_sub(label.width()));
        Line::from(vec![
            Span::styled(format!(" {}", label), Style::default().fg(theme.fg1)),
            Span::raw(padding),
            value,
        ])
    }
}

pub struct PanelStatusBarWidget;

impl PanelStatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &PanelApp) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else if let Some(url) = &app.page_url {
            format!(" {}", url)
        } else {
            " No page viewer running".to_string()
        };

        let help_hint = " j/k:rows space:toggle h/l:adjust q:quit ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
